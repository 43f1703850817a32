// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use thiserror::Error;

use super::ModelKind;
use crate::{io::read::ReadError, math::MathError};

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Model '{0}' does not provide spectra")]
    NotSpectral(ModelKind),

    #[error("Model '{0}' does not tabulate absolute magnitudes")]
    NotAbsolute(ModelKind),

    #[error("The wrong kind of data files were given for model '{0}'")]
    WrongFiles(ModelKind),

    #[error("No spectra were found in {}", .0.display())]
    NoSpectra(PathBuf),

    #[error("In {}, the spectrum at t = {t} days has {got} wavelengths, but the first spectrum has {expected}", .path.display())]
    RaggedSpectra {
        path: PathBuf,
        t: f64,
        expected: usize,
        got: usize,
    },

    #[error("{} should alternate between magnitude lines and luminosity lines, but a luminosity line is missing", .0.display())]
    UnpairedLbol(PathBuf),

    #[error("{}:{line}: expected at least {expected} values, but got {got}", .path.display())]
    ShortRow {
        path: PathBuf,
        line: usize,
        expected: usize,
        got: usize,
    },

    #[error("{} has {got} luminosities, but there are {expected} times", .path.display())]
    LbolLength {
        path: PathBuf,
        expected: usize,
        got: usize,
    },

    #[error("Bands disagree on the number of times ({expected} vs. {got})")]
    InconsistentTimes { expected: usize, got: usize },

    #[error("No bands were supplied")]
    NoBands,

    #[error(transparent)]
    Read(#[from] ReadError),

    #[error(transparent)]
    Math(#[from] MathError),
}
