// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tabulated kilonova models. Each model family stores its simulation output
//! differently (full spectra, AB magnitudes at a handful of frequencies,
//! absolute magnitudes per band), but all of them are turned into the same
//! [`Lightcurve`].

mod error;
mod photometric;
mod spectral;

pub use error::ModelError;
pub use photometric::{get_mag_ab, get_mag_abs_ab, get_mag_lbol};
pub use spectral::{get_mag_spec, get_spec, read_spectral_groups, SpectralGroup};

use std::path::{Path, PathBuf};

use itertools::Itertools;
use log::debug;
use ndarray::prelude::*;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::{
    filters::{FilterSet, NUM_BANDS},
    lightcurve::Lightcurve,
};

lazy_static::lazy_static! {
    pub static ref MODEL_KINDS_COMMA_SEPARATED: String = ModelKind::iter().join(", ");
}

/// Every tabulated model that can be turned into lightcurves.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumString,
)]
pub enum ModelKind {
    /// Barnes et al. (2016)
    #[strum(serialize = "barnes_kilonova_spectra")]
    BarnesKilonovaSpectra,

    /// Barnes and Kasen (2013)
    #[strum(serialize = "ns_merger_spectra")]
    NsMergerSpectra,

    /// Kasen et al. (2014)
    #[strum(serialize = "kilonova_wind_spectra")]
    KilonovaWindSpectra,

    /// Rosswog et al. (2017)
    #[strum(serialize = "macronovae-rosswog")]
    MacronovaeRosswog,

    /// Metzger et al. (2015), AB magnitudes.
    #[strum(serialize = "ns_precursor_AB")]
    NsPrecursorAb,

    /// Metzger et al. (2015), AB magnitudes and bolometric luminosities.
    #[strum(serialize = "ns_precursor_Lbol")]
    NsPrecursorLbol,

    /// Tanaka and Hotokezaka (2013)
    #[strum(serialize = "tanaka_compactmergers")]
    TanakaCompactMergers,

    /// Wollaeger et al. (2017)
    #[strum(serialize = "korobkin_kilonova")]
    KorobkinKilonova,
}

/// How a model's data are stored, and therefore how magnitudes are derived
/// from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFamily {
    /// Spectra as a function of time; magnitudes come from integrating
    /// through each band.
    Spectral,

    /// AB magnitudes at 4 frequencies.
    Ab,

    /// AB magnitudes at 4 frequencies, interleaved with bolometric
    /// luminosities.
    Lbol,

    /// Absolute AB magnitudes already in (most of) our bands.
    AbsAb,
}

/// The models that `model-batch` turns into magnitudes.
pub const BATCH_AB_MODELS: [ModelKind; 6] = [
    ModelKind::BarnesKilonovaSpectra,
    ModelKind::NsMergerSpectra,
    ModelKind::KilonovaWindSpectra,
    ModelKind::NsPrecursorLbol,
    ModelKind::TanakaCompactMergers,
    ModelKind::MacronovaeRosswog,
];

/// The models that `model-batch` turns into spectral grids.
pub const BATCH_SPEC_MODELS: [ModelKind; 4] = [
    ModelKind::BarnesKilonovaSpectra,
    ModelKind::NsMergerSpectra,
    ModelKind::KilonovaWindSpectra,
    ModelKind::MacronovaeRosswog,
];

impl ModelKind {
    pub fn family(self) -> ModelFamily {
        match self {
            ModelKind::BarnesKilonovaSpectra
            | ModelKind::NsMergerSpectra
            | ModelKind::KilonovaWindSpectra
            | ModelKind::MacronovaeRosswog => ModelFamily::Spectral,
            ModelKind::NsPrecursorAb => ModelFamily::Ab,
            ModelKind::NsPrecursorLbol => ModelFamily::Lbol,
            ModelKind::TanakaCompactMergers | ModelKind::KorobkinKilonova => ModelFamily::AbsAb,
        }
    }

    /// Where the data for the model run `name` live under `data_dir`.
    pub fn data_files(self, data_dir: &Path, name: &str) -> ModelFiles {
        let dir = data_dir.join(self.to_string());
        match self {
            ModelKind::KilonovaWindSpectra => ModelFiles::Single(dir.join(format!("{name}.mod"))),
            ModelKind::BarnesKilonovaSpectra | ModelKind::NsMergerSpectra => {
                ModelFiles::Single(dir.join(format!("{name}.spec")))
            }
            ModelKind::MacronovaeRosswog | ModelKind::NsPrecursorAb | ModelKind::NsPrecursorLbol => {
                ModelFiles::Single(dir.join(format!("{name}.dat")))
            }
            ModelKind::TanakaCompactMergers => ModelFiles::AbsAb {
                ab: dir.join(format!("{name}_AB.txt")),
                bol: Some(dir.join(format!("{name}.txt"))),
            },
            ModelKind::KorobkinKilonova => ModelFiles::AbsAb {
                ab: dir.join(format!("{name}.dat")),
                bol: None,
            },
        }
    }
}

/// The file(s) holding a single model run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelFiles {
    Single(PathBuf),

    /// Absolute magnitudes, and optionally a separate bolometric luminosity
    /// file.
    AbsAb { ab: PathBuf, bol: Option<PathBuf> },
}

impl ModelFiles {
    /// The files that must exist for this model run to be usable.
    pub fn paths(&self) -> Vec<&Path> {
        match self {
            ModelFiles::Single(p) => vec![p],
            ModelFiles::AbsAb { ab, bol } => {
                let mut v = vec![ab.as_path()];
                if let Some(b) = bol {
                    v.push(b);
                }
                v
            }
        }
    }
}

/// The magnitude in a single band and the bolometric luminosity of a model,
/// as a function of time [days].
#[derive(Debug, Clone, PartialEq)]
pub struct BandLightcurve {
    pub t: Vec<f64>,
    pub mag: Vec<f64>,
    pub lbol: Vec<f64>,
}

/// Derive the magnitudes in every band (and the bolometric luminosity) of a
/// model run.
pub fn model_lightcurve(
    kind: ModelKind,
    files: &ModelFiles,
    filters: &FilterSet,
) -> Result<Lightcurve, ModelError> {
    debug!("Deriving {kind} lightcurves from {:?}", files.paths());

    let per_band: Vec<BandLightcurve> = match (kind.family(), files) {
        (ModelFamily::Spectral, ModelFiles::Single(path)) => {
            // Read the spectra once for all bands.
            let groups = read_spectral_groups(path, kind)?;
            filters
                .iter()
                .map(|band| spectral::mags_from_groups(&groups, band))
                .collect::<Result<_, _>>()?
        }
        (ModelFamily::Ab, ModelFiles::Single(path)) => filters
            .iter()
            .map(|band| get_mag_ab(path, band))
            .collect::<Result<_, _>>()?,
        (ModelFamily::Lbol, ModelFiles::Single(path)) => filters
            .iter()
            .map(|band| get_mag_lbol(path, band))
            .collect::<Result<_, _>>()?,
        (ModelFamily::AbsAb, ModelFiles::AbsAb { ab, bol }) => filters
            .iter()
            .map(|band| get_mag_abs_ab(ab, bol.as_deref(), band.name, kind))
            .collect::<Result<_, _>>()?,
        _ => return Err(ModelError::WrongFiles(kind)),
    };

    assemble(per_band)
}

/// Put single-band lightcurves (in the canonical band order) together.
fn assemble(per_band: Vec<BandLightcurve>) -> Result<Lightcurve, ModelError> {
    debug_assert_eq!(per_band.len(), NUM_BANDS);
    let num_times = per_band.first().map(|b| b.t.len()).unwrap_or(0);
    let mut mags = Array2::from_elem((num_times, per_band.len()), f64::NAN);
    for (i_band, b) in per_band.iter().enumerate() {
        if b.mag.len() != num_times {
            return Err(ModelError::InconsistentTimes {
                expected: num_times,
                got: b.mag.len(),
            });
        }
        mags.column_mut(i_band)
            .iter_mut()
            .zip(b.mag.iter())
            .for_each(|(m, &v)| *m = v);
    }

    let BandLightcurve { t, mag: _, lbol } =
        per_band.into_iter().last().ok_or(ModelError::NoBands)?;
    Ok(Lightcurve { t, mags, lbol })
}

/// The name of the model run held in a data file: the file name up to its
/// first '.', with any "_AB" removed.
pub fn run_name_from_data_file(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_str()?.replace("_AB", "");
    let stem = file_name.split('.').next()?;
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}

/// Write a spectral model file like the tabulated ones: a header row, then
/// `time [s] wavelength [A] luminosity density` rows. Every spectrum is flat
/// in f_nu at the AB zero point (at 10 pc), scaled by `scales[i]`.
#[cfg(test)]
pub(crate) fn write_test_spectra(path: &Path, times_s: &[f64], scales: &[f64]) {
    use crate::{
        constants::{AB_ZERO_POINT_FLAM, PI, TEN_PC_CM},
        math::linspace,
    };

    let area = 4.0 * PI * TEN_PC_CM * TEN_PC_CM;
    let mut s = String::from("time wavelength value\n");
    for (t, scale) in times_s.iter().zip(scales) {
        for w in linspace(1000.0, 30000.0, 291) {
            let v = scale * AB_ZERO_POINT_FLAM / (w * w) * area;
            s.push_str(&format!("{t} {w} {v:e}\n"));
        }
    }
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).unwrap();
    }
    std::fs::write(path, s).unwrap();
}
