// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use log::{debug, info, warn};

use super::RunError;
use crate::{
    io::write::WriteError,
    plotting::plot_histograms,
    posterior::{histogram_curves, LabelType, Parametrisation, Posteriors},
};

pub(crate) struct PosteriorPlotParams {
    /// The plot directories of the parameter-estimation runs.
    pub(crate) dirs: Vec<PathBuf>,

    pub(crate) parametrisation: Parametrisation,
    pub(crate) label_type: LabelType,

    /// Where the histograms are written.
    pub(crate) plot_dir: PathBuf,
}

impl PosteriorPlotParams {
    /// Plot every histogram of the parametrisation, returning the files
    /// written.
    pub(crate) fn run(&self) -> Result<Vec<PathBuf>, RunError> {
        let Self {
            dirs,
            parametrisation,
            label_type,
            plot_dir,
        } = self;

        let posteriors = Posteriors::read(dirs, *parametrisation)?;
        if posteriors.is_empty() {
            warn!("No posterior samples were found; the plots will be empty");
        }

        if !plot_dir.is_dir() {
            debug!("Creating directory {}", plot_dir.display());
            std::fs::create_dir_all(plot_dir).map_err(|err| WriteError::CreateDir {
                path: plot_dir.clone(),
                err,
            })?;
        }

        let mut written = vec![];
        for spec in parametrisation.plots() {
            let curves = histogram_curves(&posteriors, spec, *label_type)?;
            debug!("{} {} curves", curves.len(), spec.quantity);
            let path = plot_dir.join(format!("{}.png", spec.file_stem()));
            plot_histograms(&path, spec, &curves)?;
            info!("Wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}
