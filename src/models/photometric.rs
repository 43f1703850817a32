// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Models that provide magnitudes rather than spectra.

use std::path::Path;

use log::trace;

use super::{BandLightcurve, ModelError, ModelKind};
use crate::{
    constants::{
        BAND_WAVELENGTHS_A, DAY_S, NS_PRECURSOR_DISTANCE_PC, NS_PRECURSOR_FREQS_HZ,
        SPEED_OF_LIGHT_M_S,
    },
    filters::{Band, BandName},
    io::read::{parse_row, read_lines, read_table_with_columns},
    math::{interp, trapz},
};

lazy_static::lazy_static! {
    /// The wavelengths of the `ns_precursor` magnitude columns [A].
    static ref PRECURSOR_WAVELENGTHS: [f64; 4] =
        NS_PRECURSOR_FREQS_HZ.map(|nu| 1e10 / (nu / SPEED_OF_LIGHT_M_S));
}

/// The `ns_precursor` tables are AB magnitudes at 200 Mpc; this turns them
/// into absolute magnitudes.
fn precursor_distance_modulus() -> f64 {
    5.0 * NS_PRECURSOR_DISTANCE_PC.log10() - 5.0
}

/// Interpolate precursor magnitudes (already shifted to 10 pc) at the
/// effective wavelength of `band`. Also returns the "bolometric luminosity"
/// of the row, i.e. the magnitudes integrated over wavelength.
fn precursor_row(band: &Band, mags: &[f64]) -> Result<(f64, f64), ModelError> {
    let mag = interp(band.effective_wavelength(), &*PRECURSOR_WAVELENGTHS, mags)?;
    let lbol = trapz(mags, &*PRECURSOR_WAVELENGTHS);
    Ok((if mag.is_finite() { mag } else { f64::NAN }, lbol))
}

fn shifted_precursor_mags(row: &[f64]) -> Vec<f64> {
    let dm = precursor_distance_modulus();
    row.iter().map(|m| m - dm).collect()
}

/// The AB magnitude in `band` of an `ns_precursor_AB` model. Each row of the
/// table is a time [s] followed by the AB magnitudes at 200 Mpc at each of
/// [`NS_PRECURSOR_FREQS_HZ`].
pub fn get_mag_ab(path: &Path, band: &Band) -> Result<BandLightcurve, ModelError> {
    let table = read_table_with_columns(path, 0, NS_PRECURSOR_FREQS_HZ.len() + 1)?;

    let mut t = Vec::with_capacity(table.nrows());
    let mut mag = Vec::with_capacity(table.nrows());
    let mut lbol = Vec::with_capacity(table.nrows());
    for row in table.outer_iter() {
        let row = row.to_vec();
        let mags = shifted_precursor_mags(&row[1..=NS_PRECURSOR_FREQS_HZ.len()]);
        let (m, l) = precursor_row(band, &mags)?;
        t.push(row[0] / DAY_S);
        mag.push(m);
        lbol.push(l);
    }
    Ok(BandLightcurve { t, mag, lbol })
}

/// The AB magnitude in `band` of an `ns_precursor_Lbol` model. The lines of
/// the file alternate between a row like those read by [`get_mag_ab`] and a
/// line holding the bolometric luminosity [erg/s] at that time.
pub fn get_mag_lbol(path: &Path, band: &Band) -> Result<BandLightcurve, ModelError> {
    let lines: Vec<(usize, String)> = read_lines(path)?
        .into_iter()
        .enumerate()
        .map(|(i, l)| (i + 1, l))
        .filter(|(_, l)| {
            let l = l.trim();
            !l.is_empty() && !l.starts_with('#')
        })
        .collect();
    if lines.len() % 2 != 0 {
        return Err(ModelError::UnpairedLbol(path.to_path_buf()));
    }
    trace!("{} has {} times", path.display(), lines.len() / 2);

    let mut t = Vec::with_capacity(lines.len() / 2);
    let mut mag = Vec::with_capacity(lines.len() / 2);
    let mut lbol = Vec::with_capacity(lines.len() / 2);
    for pair in lines.chunks_exact(2) {
        let (mags_line_num, mags_line) = &pair[0];
        let (lbol_line_num, lbol_line) = &pair[1];

        let row = parse_row(path, *mags_line_num, mags_line)?;
        if row.len() < NS_PRECURSOR_FREQS_HZ.len() + 1 {
            return Err(ModelError::ShortRow {
                path: path.to_path_buf(),
                line: *mags_line_num,
                expected: NS_PRECURSOR_FREQS_HZ.len() + 1,
                got: row.len(),
            });
        }
        let l = parse_row(path, *lbol_line_num, lbol_line)?
            .first()
            .copied()
            .ok_or_else(|| ModelError::UnpairedLbol(path.to_path_buf()))?;

        let mags = shifted_precursor_mags(&row[1..=NS_PRECURSOR_FREQS_HZ.len()]);
        let (m, _) = precursor_row(band, &mags)?;
        t.push(row[0] / DAY_S);
        mag.push(m);
        lbol.push(l);
    }
    Ok(BandLightcurve { t, mag, lbol })
}

/// The absolute AB magnitude in `band` of a model that tabulates magnitudes
/// directly. Bands that the model doesn't tabulate are interpolated (in
/// wavelength) from the bands that it does.
///
/// * `tanaka_compactmergers`: columns are `t u g r i z J H K`; the luminosity
///   comes from column 1 of `bol_path`.
/// * `korobkin_kilonova`: columns are `t Lbol g r i z y J H K`.
///
/// If `bol_path` isn't given, column 1 of `ab_path` is the luminosity.
pub fn get_mag_abs_ab(
    ab_path: &Path,
    bol_path: Option<&Path>,
    band: BandName,
    kind: ModelKind,
) -> Result<BandLightcurve, ModelError> {
    let layout = AbsAbLayout::new(kind)?;
    let table = read_table_with_columns(ab_path, 0, layout.columns.len())?;
    let t = table.column(0).to_vec();

    let mag: Vec<f64> = match layout.column_of(band) {
        Some(col) => table.column(col).to_vec(),
        None => {
            let (wavelengths, cols) = layout.interp_source(band);
            let target = BAND_WAVELENGTHS_A[band.index()];
            table
                .outer_iter()
                .map(|row| {
                    let mags: Vec<f64> = cols.iter().map(|&c| row[c]).collect();
                    interp(target, &wavelengths, &mags)
                })
                .collect::<Result<_, _>>()?
        }
    };

    let lbol = match bol_path {
        Some(p) => {
            let bol = read_table_with_columns(p, 0, 2)?;
            bol.column(1).to_vec()
        }
        None => table.column(1).to_vec(),
    };
    if lbol.len() != t.len() {
        return Err(ModelError::LbolLength {
            path: bol_path.unwrap_or(ab_path).to_path_buf(),
            expected: t.len(),
            got: lbol.len(),
        });
    }

    Ok(BandLightcurve { t, mag, lbol })
}

/// The column names of an absolute-magnitude table.
struct AbsAbLayout {
    columns: &'static [&'static str],
}

impl AbsAbLayout {
    fn new(kind: ModelKind) -> Result<AbsAbLayout, ModelError> {
        match kind {
            ModelKind::TanakaCompactMergers => Ok(AbsAbLayout {
                columns: &["t", "u", "g", "r", "i", "z", "J", "H", "K"],
            }),
            ModelKind::KorobkinKilonova => Ok(AbsAbLayout {
                columns: &["t", "Lbol", "g", "r", "i", "z", "y", "J", "H", "K"],
            }),
            _ => Err(ModelError::NotAbsolute(kind)),
        }
    }

    fn column_of(&self, band: BandName) -> Option<usize> {
        let name = band.to_string();
        self.columns.iter().position(|c| *c == name)
    }

    /// The wavelengths and columns of all tabulated bands.
    fn interp_source(&self, missing: BandName) -> (Vec<f64>, Vec<usize>) {
        let mut wavelengths = vec![];
        let mut cols = vec![];
        for (i, w) in BAND_WAVELENGTHS_A.iter().enumerate() {
            if i == missing.index() {
                continue;
            }
            let name = BandName::from_index(i);
            if let Some(col) = name.and_then(|n| self.column_of(n)) {
                wavelengths.push(*w);
                cols.push(col);
            }
        }
        (wavelengths, cols)
    }
}
