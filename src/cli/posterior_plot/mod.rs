// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::common::{display_warnings, InfoPrinter, Warn, ARG_FILE_HELP, DEFAULT_PLOT_DIR};
use crate::{
    params::PosteriorPlotParams,
    posterior::{posterior_plot_dir, LabelType, Parametrisation, PlotDirInfo},
    GwemError,
};

pub(super) const DEFAULT_OUTPUT_NAME: &str = "G298048_PS1_GROND_SOFI";
pub(super) const DEFAULT_LABEL_TYPE: &str = "name";
pub(super) const DEFAULT_DIRS: &str = "../plots/gws/Blue_EOSFit/u_g_r_i_z_y_J_H_K/0_14/masses/G298048_PS1_GROND_SOFI/1.00,../plots/gws/BNS_EOSFit/y_J_H_K/5_14/masses/G298048_PS1_GROND_SOFI/1.00";

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct PosteriorPlotArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    /// The name of this comparison; plots go to
    /// <PLOT_DIR>/gws/<OUTPUT_NAME>/<masses|ejecta>/. [default:
    /// G298048_PS1_GROND_SOFI]
    #[clap(long, alias = "outputName", help_heading = "OUTPUT")]
    pub(super) output_name: Option<String>,

    /// Plot the chirp mass and mass ratio. Takes precedence over
    /// --do-ejecta.
    #[clap(long, alias = "doMasses")]
    #[serde(default)]
    pub(super) do_masses: bool,

    /// Plot the ejecta mass and velocity.
    #[clap(long, alias = "doEjecta")]
    #[serde(default)]
    pub(super) do_ejecta: bool,

    /// Comma-separated plot directories of parameter-estimation runs, each
    /// like .../<model>/<bands>/<trange>/<kind>/<run>/<errorbudget>.
    /// [default: the GW170817 Blue and BNS mass fits]
    #[clap(short, long, help_heading = "INPUT")]
    pub(super) name: Option<String>,

    /// How curves are labelled: "errorbar" labels each error budget, "name"
    /// labels each model by its reference, anything else gives unlabelled
    /// curves. [default: name]
    #[clap(short, long, alias = "labelType")]
    pub(super) label_type: Option<String>,

    /// The base directory for plots. [default: ../plots]
    #[clap(short, long, alias = "plotDir", help_heading = "OUTPUT")]
    pub(super) plot_dir: Option<PathBuf>,
}

impl PosteriorPlotArgs {
    /// Consolidate the command-line arguments with those in the argument
    /// file (if any), preferring the command line.
    pub(super) fn merge(self) -> Result<PosteriorPlotArgs, GwemError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let PosteriorPlotArgs {
                args_file: _,
                output_name,
                do_masses,
                do_ejecta,
                name,
                label_type,
                plot_dir,
            } = unpack_arg_file!(arg_file);

            Ok(PosteriorPlotArgs {
                args_file: None,
                output_name: cli_args.output_name.or(output_name),
                do_masses: cli_args.do_masses || do_masses,
                do_ejecta: cli_args.do_ejecta || do_ejecta,
                name: cli_args.name.or(name),
                label_type: cli_args.label_type.or(label_type),
                plot_dir: cli_args.plot_dir.or(plot_dir),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn parse(self) -> Result<PosteriorPlotParams, GwemError> {
        debug!("{:#?}", self);

        let Self {
            args_file: _,
            output_name,
            do_masses,
            do_ejecta,
            name,
            label_type,
            plot_dir,
        } = self;

        let parametrisation = match (do_masses, do_ejecta) {
            (true, _) => Parametrisation::Masses,
            (false, true) => Parametrisation::Ejecta,
            (false, false) => return Err(PosteriorPlotArgsError::NoParametrisation.into()),
        };
        let dirs: Vec<PathBuf> = name
            .as_deref()
            .unwrap_or(DEFAULT_DIRS)
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .collect();
        if dirs.is_empty() {
            return Err(PosteriorPlotArgsError::NoDirectories.into());
        }
        // Catch badly-shaped directories before anything is read.
        for dir in &dirs {
            let info = PlotDirInfo::parse(dir)?;
            trace!("{}: {info:?}", dir.display());
            if !dir.is_dir() {
                format!("{} doesn't exist; it contributes no samples", dir.display()).warn();
            }
        }

        let label_type_str = label_type.unwrap_or_else(|| DEFAULT_LABEL_TYPE.to_string());
        let label_type = LabelType::new(&label_type_str);
        let output_name = output_name.unwrap_or_else(|| DEFAULT_OUTPUT_NAME.to_string());
        let plot_base = plot_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_PLOT_DIR));
        let plot_dir = posterior_plot_dir(&plot_base, &output_name, parametrisation);

        let mut printer =
            InfoPrinter::new(format!("Posterior {parametrisation} of {output_name}").into());
        printer.push_block(
            dirs.iter()
                .map(|d| format!("From {}", d.display()).into())
                .collect(),
        );
        printer.push_line(format!("Labels: {label_type_str} ({label_type:?})").into());
        printer.push_line(format!("Plots to {}", plot_dir.display()).into());
        printer.display();
        display_warnings();

        Ok(PosteriorPlotParams {
            dirs,
            parametrisation,
            label_type,
            plot_dir,
        })
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), GwemError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let params = self.parse()?;

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        let written = params.run()?;
        info!("Wrote {} plots", written.len());
        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub(super) enum PosteriorPlotArgsError {
    #[error("Neither --do-masses nor --do-ejecta was given; one of them is required")]
    NoParametrisation,

    #[error("No posterior directories were given")]
    NoDirectories,
}
