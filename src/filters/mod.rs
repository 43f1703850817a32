// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Photometric passbands, and synthetic photometry through them.


use std::path::{Path, PathBuf};

use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::{
    constants::AB_ZERO_POINT_FLAM,
    io::read::{read_table, ReadError},
    math::{easyint, trapz, MathError},
};

lazy_static::lazy_static! {
    pub static ref BAND_NAMES_SPACE_SEPARATED: String = BandName::iter().join(" ");
}

/// The bands that every model is evaluated in, in their canonical order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
pub enum BandName {
    #[strum(serialize = "u")]
    U,
    #[strum(serialize = "g")]
    G,
    #[strum(serialize = "r")]
    R,
    #[strum(serialize = "i")]
    I,
    #[strum(serialize = "z")]
    Z,
    #[strum(serialize = "y")]
    Y,
    #[strum(serialize = "J")]
    J,
    #[strum(serialize = "H")]
    H,
    #[strum(serialize = "K")]
    K,
}

pub const NUM_BANDS: usize = 9;

impl BandName {
    /// The position of this band in the canonical order.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Option<BandName> {
        BandName::iter().nth(i)
    }
}

/// A single passband: a transmission curve sampled at wavelengths [A].
#[derive(Debug, Clone)]
pub struct Band {
    pub name: BandName,
    pub wavelength: Vec<f64>,
    pub transmission: Vec<f64>,
}

impl Band {
    /// The transmission-weighted mean wavelength [A].
    pub fn effective_wavelength(&self) -> f64 {
        let weighted: f64 = self
            .wavelength
            .iter()
            .zip(self.transmission.iter())
            .map(|(w, t)| w * t)
            .sum();
        let total: f64 = self.transmission.iter().sum();
        weighted / total
    }

    /// The band-integrated flux of an AB magnitude 0 source.
    pub fn ab_zero_point(&self) -> f64 {
        let s: Vec<f64> = self
            .wavelength
            .iter()
            .zip(self.transmission.iter())
            .map(|(w, t)| AB_ZERO_POINT_FLAM / (w * w) * t)
            .collect();
        trapz(&s, &self.wavelength)
    }

    /// Synthetic AB magnitude of a spectrum whose flux density
    /// [erg/s/cm^2/A] is already sampled on this band's wavelengths.
    pub fn mag_from_sampled_flux(&self, flux: &[f64]) -> f64 {
        let conv: Vec<f64> = flux
            .iter()
            .zip(self.transmission.iter())
            .map(|(f, t)| f * t)
            .collect();
        let band_flux = trapz(&conv, &self.wavelength);
        let mag = -2.5 * (band_flux / self.ab_zero_point()).log10();
        if mag.is_finite() {
            mag
        } else {
            f64::NAN
        }
    }

    /// Synthetic AB magnitude of a spectrum with flux density `flux`
    /// [erg/s/cm^2/A] sampled at `wavelength` [A]. The spectrum is
    /// interpolated onto the band; beyond the spectrum's range its edge values
    /// are used. Non-finite magnitudes become NaN.
    pub fn synthetic_mag(&self, wavelength: &[f64], flux: &[f64]) -> Result<f64, MathError> {
        let resampled = easyint(wavelength, flux, &self.wavelength)?;
        Ok(self.mag_from_sampled_flux(&resampled))
    }
}

/// The full set of u g r i z y J H K passbands.
#[derive(Debug, Clone)]
pub struct FilterSet {
    bands: Vec<Band>,
}

impl FilterSet {
    /// Read a filter file. The first column is the wavelength in nanometres,
    /// and the next 9 columns are the transmissions of u g r i z y J H K.
    pub fn read(path: &Path) -> Result<FilterSet, FilterError> {
        debug!("Reading filters from {}", path.display());
        let table = read_table(path, 0)?;
        let num_cols = table.ncols();
        if num_cols != NUM_BANDS + 1 {
            return Err(FilterError::WrongColumnCount {
                path: path.to_path_buf(),
                got: num_cols,
            });
        }

        let wavelength: Vec<f64> = table.column(0).iter().map(|nm| nm * 10.0).collect();
        let bands = BandName::iter()
            .map(|name| Band {
                name,
                wavelength: wavelength.clone(),
                transmission: table.column(name.index() + 1).to_vec(),
            })
            .collect();
        Ok(FilterSet { bands })
    }

    /// Make a filter set from bands that are already in memory. All 9 bands
    /// must be present.
    pub fn from_bands(mut bands: Vec<Band>) -> Result<FilterSet, FilterError> {
        bands.sort_by_key(|b| b.name);
        bands.dedup_by_key(|b| b.name);
        if bands.len() != NUM_BANDS {
            return Err(FilterError::MissingBands(bands.len()));
        }
        Ok(FilterSet { bands })
    }

    pub fn band(&self, name: BandName) -> &Band {
        &self.bands[name.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Band> {
        self.bands.iter()
    }
}

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Filter file {} has {got} columns; expected a wavelength column and one for each of {}", .path.display(), *BAND_NAMES_SPACE_SEPARATED)]
    WrongColumnCount { path: PathBuf, got: usize },

    #[error("Expected 9 bands (u g r i z y J H K), but only {0} distinct bands were given")]
    MissingBands(usize),

    #[error(transparent)]
    Read(#[from] ReadError),
}

/// Top-hat passbands 1000 A wide, centred on each band's central wavelength,
/// all sampled on the same grid like a filter file.
#[cfg(test)]
pub(crate) fn box_filters() -> FilterSet {
    use crate::{constants::BAND_WAVELENGTHS_A, math::linspace};

    let wavelength = linspace(2000.0, 25000.0, 2301);
    let bands = BandName::iter()
        .map(|name| {
            let centre = BAND_WAVELENGTHS_A[name.index()];
            Band {
                name,
                wavelength: wavelength.clone(),
                transmission: wavelength
                    .iter()
                    .map(|w| if (w - centre).abs() <= 500.0 { 1.0 } else { 0.0 })
                    .collect(),
            }
        })
        .collect();
    FilterSet { bands }
}

/// Write [`box_filters`] as a filter file in `dir` and return its path.
#[cfg(test)]
pub(crate) fn write_box_filters(dir: &Path) -> PathBuf {
    use std::fmt::Write;

    let filters = box_filters();
    let wavelength = &filters.bands[0].wavelength;
    let mut contents = format!("# wavelength[nm] {}\n", *BAND_NAMES_SPACE_SEPARATED);
    for (i, w) in wavelength.iter().enumerate() {
        write!(contents, "{}", w / 10.0).unwrap();
        for band in filters.iter() {
            write!(contents, " {}", band.transmission[i]).unwrap();
        }
        contents.push('\n');
    }
    let path = dir.join("filters.dat");
    std::fs::write(&path, contents).unwrap();
    path
}
