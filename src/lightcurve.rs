// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The products shared by all models: multi-band lightcurves and spectral
//! grids.

use ndarray::prelude::*;

use crate::filters::BandName;

/// Absolute AB magnitudes in every band, plus the bolometric luminosity, as a
/// function of time.
#[derive(Debug, Clone, PartialEq)]
pub struct Lightcurve {
    /// [days]
    pub t: Vec<f64>,

    /// Absolute AB magnitudes (`[time][band]`). Undefined magnitudes are NaN.
    pub mags: Array2<f64>,

    /// Bolometric luminosity [erg/s].
    pub lbol: Vec<f64>,
}

impl Lightcurve {
    pub fn mag(&self, band: BandName) -> ArrayView1<f64> {
        self.mags.column(band.index())
    }

    /// The indices of the first and last finite magnitudes in `band`, if
    /// there are any.
    pub fn finite_span(&self, band: BandName) -> Option<(usize, usize)> {
        let mags = self.mag(band);
        let first = mags.iter().position(|m| m.is_finite())?;
        let last = mags.iter().rposition(|m| m.is_finite())?;
        Some((first, last))
    }

    pub fn total_lbol(&self) -> f64 {
        self.lbol.iter().sum()
    }

    /// The rows from the first to the last finite magnitude in `band`
    /// (inclusive), or `None` if `band` has no finite magnitudes.
    pub fn trimmed_to(&self, band: BandName) -> Option<Lightcurve> {
        let (first, last) = self.finite_span(band)?;
        Some(Lightcurve {
            t: self.t[first..=last].to_vec(),
            mags: self.mags.slice(s![first..=last, ..]).to_owned(),
            lbol: self.lbol[first..=last].to_vec(),
        })
    }
}

/// Spectra on a common wavelength grid, one per time.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectraGrid {
    /// [days]
    pub t: Vec<f64>,

    /// [A]
    pub wavelength: Vec<f64>,

    /// Flux density at 10 pc [erg/s/cm^2/A] (`[time][wavelength]`).
    pub flux: Array2<f64>,
}
