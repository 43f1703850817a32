// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to write lightcurve products. The formats are plain text and
//! formatted the same way as printf-style `%f`/`%e` output, so files can be
//! read by existing analysis scripts.


use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use log::{debug, trace};
use thiserror::Error;

use crate::{
    filters::BAND_NAMES_SPACE_SEPARATED,
    lightcurve::{Lightcurve, SpectraGrid},
};

/// Format a number like printf's `%.<precision>f`. Non-finite numbers are
/// written as `nan`, `inf` or `-inf`.
pub fn fmt_fixed(x: f64, precision: usize) -> String {
    match non_finite(x) {
        Some(s) => s.to_string(),
        None => format!("{x:.precision$}"),
    }
}

/// Format a number like printf's `%.<precision>e`, i.e. with a signed,
/// at-least-two-digit exponent (`1.50000e+44`).
pub fn fmt_sci(x: f64, precision: usize) -> String {
    if let Some(s) = non_finite(x) {
        return s.to_string();
    }

    let s = format!("{x:.precision$e}");
    match s.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => s,
    }
}

fn non_finite(x: f64) -> Option<&'static str> {
    if x.is_nan() {
        Some("nan")
    } else if x == f64::INFINITY {
        Some("inf")
    } else if x == f64::NEG_INFINITY {
        Some("-inf")
    } else {
        None
    }
}

/// Make `<base>/<sub>` (and `base`, if needed) and return it.
pub fn create_output_dir(base: &Path, sub: &str) -> Result<PathBuf, WriteError> {
    let dir = base.join(sub);
    if !dir.is_dir() {
        debug!("Creating directory {}", dir.display());
        std::fs::create_dir_all(&dir).map_err(|err| WriteError::CreateDir {
            path: dir.clone(),
            err,
        })?;
    }
    Ok(dir)
}

fn create(path: &Path) -> Result<BufWriter<File>, WriteError> {
    trace!("Writing {}", path.display());
    Ok(BufWriter::new(File::create(path).map_err(|err| {
        WriteError::IO {
            path: path.to_path_buf(),
            err,
        }
    })?))
}

/// Write the magnitudes of a lightcurve. Each row is the time followed by the
/// magnitude in every band. The time is written with `time_precision`
/// decimal places and the magnitudes with 3.
pub fn write_mag_table(
    path: &Path,
    lc: &Lightcurve,
    time_precision: usize,
) -> Result<(), WriteError> {
    let mut f = create(path)?;
    let io_err = |err| WriteError::IO {
        path: path.to_path_buf(),
        err,
    };

    writeln!(f, "# t[days] {}", *BAND_NAMES_SPACE_SEPARATED).map_err(io_err)?;
    for (t, mags) in lc.t.iter().zip(lc.mags.outer_iter()) {
        write!(f, "{} ", fmt_fixed(*t, time_precision)).map_err(io_err)?;
        for m in mags {
            write!(f, "{} ", fmt_fixed(*m, 3)).map_err(io_err)?;
        }
        writeln!(f).map_err(io_err)?;
    }
    f.flush().map_err(io_err)?;
    Ok(())
}

/// Write the bolometric luminosity as a function of time.
pub fn write_lbol_table(path: &Path, t: &[f64], lbol: &[f64]) -> Result<(), WriteError> {
    let mut f = create(path)?;
    let io_err = |err| WriteError::IO {
        path: path.to_path_buf(),
        err,
    };

    writeln!(f, "# t[days] Lbol[erg/s]").map_err(io_err)?;
    for (t, l) in t.iter().zip(lbol.iter()) {
        writeln!(f, "{} {}", fmt_fixed(*t, 5), fmt_sci(*l, 5)).map_err(io_err)?;
    }
    f.flush().map_err(io_err)?;
    Ok(())
}

/// Write a spectral grid. The first row is `nan` followed by the wavelengths;
/// every subsequent row is a time followed by the flux at each wavelength.
pub fn write_spectra(path: &Path, grid: &SpectraGrid) -> Result<(), WriteError> {
    let mut f = create(path)?;
    let io_err = |err| WriteError::IO {
        path: path.to_path_buf(),
        err,
    };

    write!(f, "nan").map_err(io_err)?;
    for w in &grid.wavelength {
        write!(f, " {}", fmt_fixed(*w, 3)).map_err(io_err)?;
    }
    writeln!(f).map_err(io_err)?;
    for (t, spec) in grid.t.iter().zip(grid.flux.outer_iter()) {
        write!(f, "{} ", fmt_fixed(*t, 5)).map_err(io_err)?;
        for s in spec {
            write!(f, "{} ", fmt_sci(*s, 5)).map_err(io_err)?;
        }
        writeln!(f).map_err(io_err)?;
    }
    f.flush().map_err(io_err)?;
    Ok(())
}

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Couldn't create directory {}: {err}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    #[error("IO error when writing {}: {err}", .path.display())]
    IO {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },
}
