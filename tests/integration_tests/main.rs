// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod arg_files;
mod kilonova;
mod model_batch;
mod model_mags;
mod no_stderr;
mod posterior_plot;

use std::{
    fmt::Write,
    path::{Path, PathBuf},
    process::Output,
    str::from_utf8,
};

use assert_cmd::{output::OutputError, Command};

use gwem_lightcurves::constants::{AB_ZERO_POINT_FLAM, BAND_WAVELENGTHS_A, PI, TEN_PC_CM};

fn gwemlc() -> Command {
    Command::cargo_bin("gwemlc").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

/// Write a filter file of 1000 A wide top-hat passbands centred on each
/// band, and return its path.
fn write_filters(dir: &Path) -> PathBuf {
    let mut contents = String::from("# wavelength[nm] u g r i z y J H K\n");
    for i in 0..=2300 {
        let w = 2000.0 + 10.0 * i as f64;
        write!(contents, "{}", w / 10.0).unwrap();
        for centre in BAND_WAVELENGTHS_A {
            let t = if (w - centre).abs() <= 500.0 { 1 } else { 0 };
            write!(contents, " {t}").unwrap();
        }
        contents.push('\n');
    }
    let path = dir.join("filters.dat");
    std::fs::write(&path, contents).unwrap();
    path
}

/// Write a spectral model file whose spectra are flat in f_nu. A `scale` of
/// 1 is 0 AB magnitudes in every band.
fn write_flat_spectra(path: &Path, times_s: &[f64], scales: &[f64]) {
    let area = 4.0 * PI * TEN_PC_CM * TEN_PC_CM;
    let mut contents = String::from("time wavelength value\n");
    for (t, scale) in times_s.iter().zip(scales) {
        for i in 0..=290 {
            let w = 1000.0 + 100.0 * i as f64;
            let v = scale * AB_ZERO_POINT_FLAM / (w * w) * area;
            writeln!(contents, "{t} {w} {v:e}").unwrap();
        }
    }
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

/// A temporary directory with filters and a single barnes_kilonova_spectra
/// run called "flat".
struct Workspace {
    tmp: tempfile::TempDir,
    filters: String,
    data: String,
    output: String,
    plots: String,
}

impl Workspace {
    fn new() -> Workspace {
        let tmp = tempfile::TempDir::new().expect("couldn't make tmp dir");
        let filters = write_filters(tmp.path());
        let data = tmp.path().join("data");
        write_flat_spectra(
            &data.join("barnes_kilonova_spectra/flat.spec"),
            &[86400.0, 172800.0],
            &[1.0, 0.1],
        );
        Workspace {
            filters: filters.display().to_string(),
            data: data.display().to_string(),
            output: tmp.path().join("output").display().to_string(),
            plots: tmp.path().join("plots").display().to_string(),
            tmp,
        }
    }

    fn path(&self) -> &Path {
        self.tmp.path()
    }
}
