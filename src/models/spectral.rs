// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Models that provide spectra as a function of time.
//!
//! The data files have a header row, then one row per (time, wavelength)
//! pair. Rows with the same time are contiguous, and each such block is one
//! spectrum.

use std::path::Path;

use log::trace;
use ndarray::prelude::*;

use super::{BandLightcurve, ModelError, ModelKind};
use crate::{
    constants::{DAY_S, KILONOVA_WIND_SELECTOR, PI, TEN_PC_CM},
    filters::Band,
    io::read::read_table_with_columns,
    lightcurve::SpectraGrid,
    math::trapz,
};

/// The area of a sphere with a radius of 10 pc [cm^2].
fn ten_pc_sphere_area() -> f64 {
    4.0 * PI * TEN_PC_CM * TEN_PC_CM
}

/// One spectrum of a model.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralGroup {
    /// [days]
    pub t: f64,

    /// [A]
    pub wavelength: Vec<f64>,

    /// Flux density at 10 pc [erg/s/cm^2/A].
    pub flux: Vec<f64>,
}

impl SpectralGroup {
    /// The bolometric luminosity of this spectrum [erg/s].
    pub fn lbol(&self) -> f64 {
        let area = ten_pc_sphere_area();
        let lum: Vec<f64> = self.flux.iter().map(|f| f * area).collect();
        trapz(&lum, &self.wavelength)
    }
}

/// How the columns of a spectral model file are laid out.
struct Layout {
    /// The column holding the luminosity (or flux) density.
    value_col: usize,

    /// Is the value column a luminosity density [erg/s/A] (rather than a flux
    /// density at 10 pc)?
    is_luminosity: bool,

    /// Is the time column in seconds (rather than days)?
    time_in_seconds: bool,

    /// Only keep rows with this value in column 2.
    selector: Option<f64>,
}

impl Layout {
    fn new(kind: ModelKind) -> Result<Layout, ModelError> {
        let layout = match kind {
            ModelKind::KilonovaWindSpectra => Layout {
                value_col: 3,
                is_luminosity: true,
                time_in_seconds: true,
                selector: Some(KILONOVA_WIND_SELECTOR),
            },
            ModelKind::MacronovaeRosswog => Layout {
                value_col: 2,
                is_luminosity: false,
                time_in_seconds: false,
                selector: None,
            },
            ModelKind::BarnesKilonovaSpectra | ModelKind::NsMergerSpectra => Layout {
                value_col: 2,
                is_luminosity: true,
                time_in_seconds: true,
                selector: None,
            },
            _ => return Err(ModelError::NotSpectral(kind)),
        };
        Ok(layout)
    }
}

/// Read a spectral model file and split it into one spectrum per time. The
/// fluxes are converted to flux densities at 10 pc and the times to days.
pub fn read_spectral_groups(
    path: &Path,
    kind: ModelKind,
) -> Result<Vec<SpectralGroup>, ModelError> {
    let layout = Layout::new(kind)?;
    let table = read_table_with_columns(path, 1, layout.value_col + 1)?;

    let area = ten_pc_sphere_area();
    let mut groups: Vec<SpectralGroup> = vec![];
    for row in table.outer_iter() {
        if let Some(sel) = layout.selector {
            if row[2] != sel {
                continue;
            }
        }

        let t = if layout.time_in_seconds {
            row[0] / DAY_S
        } else {
            row[0]
        };
        let value = if layout.is_luminosity {
            row[layout.value_col] / area
        } else {
            row[layout.value_col]
        };

        match groups.last_mut() {
            Some(g) if g.t == t => {
                g.wavelength.push(row[1]);
                g.flux.push(value);
            }
            _ => groups.push(SpectralGroup {
                t,
                wavelength: vec![row[1]],
                flux: vec![value],
            }),
        }
    }

    if groups.is_empty() {
        return Err(ModelError::NoSpectra(path.to_path_buf()));
    }
    trace!("{} has {} spectra", path.display(), groups.len());
    Ok(groups)
}

/// The magnitude in `band` (and the bolometric luminosity) of every spectrum.
pub(super) fn mags_from_groups(
    groups: &[SpectralGroup],
    band: &Band,
) -> Result<BandLightcurve, ModelError> {
    let mut t = Vec::with_capacity(groups.len());
    let mut mag = Vec::with_capacity(groups.len());
    let mut lbol = Vec::with_capacity(groups.len());
    for g in groups {
        t.push(g.t);
        mag.push(band.synthetic_mag(&g.wavelength, &g.flux)?);
        lbol.push(g.lbol());
    }
    Ok(BandLightcurve { t, mag, lbol })
}

/// The AB magnitude in `band`, and the bolometric luminosity, of a spectral
/// model as a function of time.
pub fn get_mag_spec(
    path: &Path,
    band: &Band,
    kind: ModelKind,
) -> Result<BandLightcurve, ModelError> {
    let groups = read_spectral_groups(path, kind)?;
    mags_from_groups(&groups, band)
}

/// All spectra of a model on a (time, wavelength) grid. Every spectrum must be
/// sampled at the same number of wavelengths as the first; the wavelengths of
/// the first spectrum are used for the grid.
pub fn get_spec(path: &Path, kind: ModelKind) -> Result<SpectraGrid, ModelError> {
    let groups = read_spectral_groups(path, kind)?;
    let wavelength = groups[0].wavelength.clone();

    let mut flux = Array2::zeros((groups.len(), wavelength.len()));
    for (mut out, g) in flux.outer_iter_mut().zip(groups.iter()) {
        if g.flux.len() != wavelength.len() {
            return Err(ModelError::RaggedSpectra {
                path: path.to_path_buf(),
                t: g.t,
                expected: wavelength.len(),
                got: g.flux.len(),
            });
        }
        out.iter_mut()
            .zip(g.flux.iter())
            .for_each(|(o, &f)| *o = f);
    }

    Ok(SpectraGrid {
        t: groups.iter().map(|g| g.t).collect(),
        wavelength,
        flux,
    })
}
