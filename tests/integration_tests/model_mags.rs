// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;

use crate::{get_cmd_output, gwemlc, Workspace};

#[test]
fn test_model_mags_ab() {
    let ws = Workspace::new();
    #[rustfmt::skip]
    let cmd = gwemlc()
        .args([
            "model-mags",
            "--model", "barnes_kilonova_spectra",
            "--name", "flat",
            "--data-dir", &ws.data,
            "--filters", &ws.filters,
            "--output-dir", &ws.output,
            "--do-ab",
            "--no-plots",
        ])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("gwemlc model-mags complete."), "{stdout}");

    let table =
        std::fs::read_to_string(ws.path().join("output/barnes_kilonova_spectra/flat.dat")).unwrap();
    let rows: Vec<Vec<f64>> = table
        .lines()
        .filter(|l| !l.starts_with('#'))
        .map(|l| l.split_whitespace().map(|v| v.parse().unwrap()).collect())
        .collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0], 1.0);
    assert_eq!(rows[1][0], 2.0);
    for &m in &rows[0][1..] {
        assert_abs_diff_eq!(m, 0.0, epsilon = 2e-3);
    }
    for &m in &rows[1][1..] {
        assert_abs_diff_eq!(m, 2.5, epsilon = 2e-3);
    }
    assert!(ws
        .path()
        .join("output/barnes_kilonova_spectra/flat_Lbol.dat")
        .exists());
}

#[test]
fn test_original_script_name() {
    let ws = Workspace::new();
    #[rustfmt::skip]
    let cmd = gwemlc()
        .args([
            "run-models",
            "-m", "barnes_kilonova_spectra",
            "-n", "flat",
            "-d", &ws.data,
            "-o", &ws.output,
            "--do-spec",
            "--no-plots",
        ])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let spec = std::fs::read_to_string(
        ws.path()
            .join("output/barnes_kilonova_spectra/flat_spec.dat"),
    )
    .unwrap();
    assert_eq!(spec.lines().count(), 3);
}

#[test]
fn test_missing_data_file() {
    let ws = Workspace::new();
    #[rustfmt::skip]
    let cmd = gwemlc()
        .args([
            "model-mags",
            "--name", "not_there",
            "--data-dir", &ws.data,
            "--filters", &ws.filters,
            "--do-ab",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.starts_with("Error: "), "{stderr}");
    assert!(stderr.contains("not_there.spec"), "{stderr}");
}

#[test]
fn test_missing_filters() {
    let ws = Workspace::new();
    #[rustfmt::skip]
    let cmd = gwemlc()
        .args([
            "model-mags",
            "--name", "flat",
            "--data-dir", &ws.data,
            "--filters", "/does/not/exist/filters.dat",
            "--do-ab",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("filter file"), "{stderr}");
}
