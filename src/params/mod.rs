// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parameters for each `gwemlc` subcommand.
//!
//! The code here mirrors the code within the `cli` module; `cli` is unparsed,
//! user-facing code, whereas parameters have been parsed and are ready to be
//! used directly.

mod kilonova;
mod model_batch;
mod model_mags;
mod posterior_plot;

pub(crate) use kilonova::KilonovaRunParams;
#[cfg(test)]
pub(crate) use model_batch::BatchJob;
pub(crate) use model_batch::ModelBatchParams;
pub(crate) use model_mags::ModelMagsParams;
pub(crate) use posterior_plot::PosteriorPlotParams;

use std::path::{Path, PathBuf};

use log::warn;
use thiserror::Error;

use crate::{
    filters::{BandName, FilterSet},
    io::{
        write::{create_output_dir, write_lbol_table, write_mag_table, write_spectra, WriteError},
        GlobError,
    },
    kilonova::KilonovaError,
    lightcurve::{Lightcurve, SpectraGrid},
    models::{get_spec, model_lightcurve, ModelError, ModelFiles, ModelKind},
    plotting::{
        plot_lbol, plot_lightcurve, plot_spectra, DrawError, PlotColour, MODEL_LIGHTCURVE_BANDS,
    },
    posterior::PosteriorError,
};

/// Where a subcommand's tables and plots go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OutputParams {
    /// Tables go to `<output_base>/<model>/`.
    pub(crate) output_base: PathBuf,

    /// Plots go to `<plot_base>/<model>/`. `None` if plotting is disabled.
    pub(crate) plot_base: Option<PathBuf>,

    pub(crate) filters_file: PathBuf,
}

impl OutputParams {
    /// The output table directory for `model`, created if necessary.
    pub(crate) fn output_dir(&self, model: &str) -> Result<PathBuf, WriteError> {
        create_output_dir(&self.output_base, model)
    }

    /// The plot directory for `model`, created if necessary.
    pub(crate) fn plot_dir(&self, model: &str) -> Result<Option<PathBuf>, WriteError> {
        self.plot_base
            .as_deref()
            .map(|base| create_output_dir(base, model))
            .transpose()
    }

    /// Where the magnitude table of a model run would be written.
    pub(crate) fn mag_table_path(&self, model: &str, name: &str) -> PathBuf {
        self.output_base.join(model).join(format!("{name}.dat"))
    }

    /// Where the spectral grid of a model run would be written.
    pub(crate) fn spectra_path(&self, model: &str, name: &str) -> PathBuf {
        self.output_base.join(model).join(format!("{name}_spec.dat"))
    }
}

/// Write (and plot) the magnitudes and luminosity of a lightcurve.
/// `time_precision` is the number of decimal places of the times in the
/// magnitude table.
pub(crate) fn write_lightcurve(
    lc: &Lightcurve,
    model: &str,
    name: &str,
    output: &OutputParams,
    time_precision: usize,
    plot: LightcurvePlot,
) -> Result<(), RunError> {
    let out_dir = output.output_dir(model)?;
    write_mag_table(&out_dir.join(format!("{name}.dat")), lc, time_precision)?;
    write_lbol_table(&out_dir.join(format!("{name}_Lbol.dat")), &lc.t, &lc.lbol)?;

    if let Some(plot_dir) = output.plot_dir(model)? {
        let to_plot = match plot {
            LightcurvePlot::TrimmedToU(bands) => lc.trimmed_to(BandName::U).map(|t| (t, bands)),
            LightcurvePlot::Whole(bands) => Some((lc.clone(), bands)),
        };
        match to_plot {
            Some((lc_to_plot, bands)) => plot_or_warn(plot_lightcurve(
                &plot_dir.join(format!("{name}.png")),
                &lc_to_plot,
                bands,
            ))?,
            None => warn!("{name} has no finite u-band magnitudes; not plotting its lightcurve"),
        }
        plot_or_warn(plot_lbol(
            &plot_dir.join(format!("{name}_Lbol.png")),
            &lc.t,
            &lc.lbol,
        ))?;
    }
    Ok(())
}

/// Which rows of a lightcurve are plotted, and in which bands.
#[derive(Debug, Clone, Copy)]
pub(crate) enum LightcurvePlot {
    /// Only the rows between the first and last finite u-band magnitudes.
    TrimmedToU(&'static [(BandName, PlotColour)]),

    Whole(&'static [(BandName, PlotColour)]),
}

/// Derive, write and plot the magnitudes of a tabulated model run.
pub(crate) fn write_model_mags(
    kind: ModelKind,
    name: &str,
    files: &ModelFiles,
    filters: &FilterSet,
    output: &OutputParams,
) -> Result<(), RunError> {
    let lc = model_lightcurve(kind, files, filters)?;
    write_lightcurve(
        &lc,
        &kind.to_string(),
        name,
        output,
        5,
        LightcurvePlot::TrimmedToU(&MODEL_LIGHTCURVE_BANDS),
    )
}

/// Write and plot the spectral grid of a tabulated model run.
pub(crate) fn write_model_spectra(
    kind: ModelKind,
    name: &str,
    files: &ModelFiles,
    output: &OutputParams,
) -> Result<SpectraGrid, RunError> {
    let path = match files {
        ModelFiles::Single(path) => path,
        ModelFiles::AbsAb { .. } => return Err(ModelError::NotSpectral(kind).into()),
    };
    let grid = get_spec(path, kind)?;

    let model = kind.to_string();
    let out_dir = output.output_dir(&model)?;
    write_spectra(&out_dir.join(format!("{name}_spec.dat")), &grid)?;
    if let Some(plot_dir) = output.plot_dir(&model)? {
        plot_or_warn(plot_spectra(
            &plot_dir.join(format!("{name}_spec.png")),
            &grid,
        ))?;
    }
    Ok(grid)
}

/// A plot with nothing finite to show is skipped with a warning; other
/// drawing errors are fatal.
fn plot_or_warn(result: Result<(), DrawError>) -> Result<(), DrawError> {
    match result {
        Err(DrawError::NothingToPlot(what)) => {
            warn!("Nothing to plot for {what}; skipping it");
            Ok(())
        }
        r => r,
    }
}

/// Does every file of a model run exist? Returns the first missing file.
pub(crate) fn first_missing(files: &ModelFiles) -> Option<&Path> {
    files.paths().into_iter().find(|p| !p.exists())
}

#[derive(Error, Debug)]
pub(crate) enum RunError {
    #[error("{failed} of {total} model runs failed")]
    BatchFailures { failed: usize, total: usize },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Kilonova(#[from] KilonovaError),

    #[error(transparent)]
    Posterior(#[from] PosteriorError),

    #[error(transparent)]
    Write(#[from] WriteError),

    #[error(transparent)]
    Draw(#[from] DrawError),

    #[error(transparent)]
    Glob(#[from] GlobError),

    #[error(transparent)]
    ProgressTemplate(#[from] indicatif::style::TemplateError),
}
