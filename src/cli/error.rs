// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all gwemlc-related errors. This should be the *only* error
//! enum that is publicly visible.

use thiserror::Error;

use super::{
    kilonova::KilonovaArgsError, model_mags::ModelMagsArgsError,
    posterior_plot::PosteriorPlotArgsError,
};
use crate::{
    filters::FilterError,
    io::{read::ReadError, write::WriteError, GlobError},
    kilonova::KilonovaError,
    models::ModelError,
    params::RunError,
    plotting::DrawError,
    posterior::PosteriorError,
};

const HINT_VERBOSE: &str = "Turning up the verbosity (-v or -vv) shows which file was being handled.";

/// The *only* publicly visible error from gwemlc. Each variant is a category
/// that users can act on; the message carries the detail.
#[derive(Error, Debug)]
pub enum GwemError {
    /// An error reading or writing a data table.
    #[error("{0}\n\n{HINT_VERBOSE}")]
    DataTable(String),

    /// An error related to the passband file.
    #[error("{0}\n\nThe filter file needs a wavelength column [nm] followed by columns for u g r i z y J H K.")]
    Filters(String),

    /// An error deriving lightcurves from a tabulated model.
    #[error("{0}\n\n{HINT_VERBOSE}")]
    Model(String),

    /// An error generating a parameterised kilonova.
    #[error("{0}")]
    Kilonova(String),

    /// An error related to posterior files or their directories.
    #[error("{0}\n\nPosterior directories look like .../<model>/<bands>/<trange>/<kind>/<run>/<errorbudget>.")]
    Posterior(String),

    /// An error making a plot.
    #[error("{0}")]
    Plotting(String),

    /// An error related to argument files.
    #[error("{0}")]
    ArgFile(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// Binary sub-command errors.

impl From<ModelMagsArgsError> for GwemError {
    fn from(e: ModelMagsArgsError) -> Self {
        let s = e.to_string();
        match e {
            ModelMagsArgsError::UnknownModel(_) | ModelMagsArgsError::MissingData { .. } => {
                Self::Model(s)
            }
        }
    }
}

impl From<KilonovaArgsError> for GwemError {
    fn from(e: KilonovaArgsError) -> Self {
        let s = e.to_string();
        match e {
            KilonovaArgsError::NoEjectaSource
            | KilonovaArgsError::UnknownModel(_)
            | KilonovaArgsError::UnknownEos(_) => Self::Kilonova(s),
        }
    }
}

impl From<PosteriorPlotArgsError> for GwemError {
    fn from(e: PosteriorPlotArgsError) -> Self {
        let s = e.to_string();
        match e {
            PosteriorPlotArgsError::NoParametrisation | PosteriorPlotArgsError::NoDirectories => {
                Self::Posterior(s)
            }
        }
    }
}

// Library code errors.

impl From<RunError> for GwemError {
    fn from(e: RunError) -> Self {
        let s = e.to_string();
        match e {
            RunError::BatchFailures { .. } => Self::Model(s),
            RunError::Model(e) => Self::from(e),
            RunError::Kilonova(e) => Self::from(e),
            RunError::Posterior(e) => Self::from(e),
            RunError::Write(e) => Self::from(e),
            RunError::Draw(e) => Self::from(e),
            RunError::Glob(_) | RunError::ProgressTemplate(_) => Self::Generic(s),
        }
    }
}

impl From<ReadError> for GwemError {
    fn from(e: ReadError) -> Self {
        Self::DataTable(e.to_string())
    }
}

impl From<WriteError> for GwemError {
    fn from(e: WriteError) -> Self {
        Self::DataTable(e.to_string())
    }
}

impl From<FilterError> for GwemError {
    fn from(e: FilterError) -> Self {
        Self::Filters(e.to_string())
    }
}

impl From<ModelError> for GwemError {
    fn from(e: ModelError) -> Self {
        let s = e.to_string();
        match e {
            ModelError::Read(e) => Self::from(e),
            _ => Self::Model(s),
        }
    }
}

impl From<KilonovaError> for GwemError {
    fn from(e: KilonovaError) -> Self {
        Self::Kilonova(e.to_string())
    }
}

impl From<PosteriorError> for GwemError {
    fn from(e: PosteriorError) -> Self {
        let s = e.to_string();
        match e {
            PosteriorError::Read(e) => Self::from(e),
            PosteriorError::Glob(e) => Self::from(e),
            PosteriorError::ShortPath(_)
            | PosteriorError::UnknownModel { .. }
            | PosteriorError::BadErrorBudget { .. }
            | PosteriorError::TooFewColumns { .. }
            | PosteriorError::Math(_) => Self::Posterior(s),
        }
    }
}

impl From<DrawError> for GwemError {
    fn from(e: DrawError) -> Self {
        Self::Plotting(e.to_string())
    }
}

impl From<GlobError> for GwemError {
    fn from(e: GlobError) -> Self {
        Self::Generic(e.to_string())
    }
}

impl From<std::io::Error> for GwemError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
