// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::{get_cmd_output, gwemlc, write_flat_spectra, Workspace};

#[test]
fn test_model_batch() {
    let ws = Workspace::new();
    write_flat_spectra(
        &ws.path().join("data/ns_merger_spectra/other.spec"),
        &[86400.0],
        &[1.0],
    );

    #[rustfmt::skip]
    let cmd = gwemlc()
        .args([
            "model-batch",
            "--data-dir", &ws.data,
            "--filters", &ws.filters,
            "--output-dir", &ws.output,
            "--no-plots",
            "--no-progress-bars",
        ])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let out = ws.path().join("output");
    assert!(out.join("barnes_kilonova_spectra/flat.dat").exists());
    assert!(out.join("ns_merger_spectra/other.dat").exists());
    // The spectral pass is off by default.
    assert!(!out.join("ns_merger_spectra/other_spec.dat").exists());

    // A second run only does the spectral pass.
    #[rustfmt::skip]
    let cmd = gwemlc()
        .args([
            "run-run-models",
            "--data-dir", &ws.data,
            "--filters", &ws.filters,
            "--output-dir", &ws.output,
            "--spec",
            "--no-plots",
            "--no-progress-bars",
            "-v",
        ])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Processing 2 model runs"), "{stdout}");
    assert!(out.join("ns_merger_spectra/other_spec.dat").exists());
}

#[test]
fn test_model_batch_dry_run() {
    let ws = Workspace::new();
    #[rustfmt::skip]
    let cmd = gwemlc()
        .args([
            "model-batch",
            "--data-dir", &ws.data,
            "--filters", &ws.filters,
            "--output-dir", &ws.output,
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("1 model runs would be processed"), "{stdout}");
    assert!(!ws.path().join("output").exists());
}
