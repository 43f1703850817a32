// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests to ensure there is no stderr output for successful commands.

use crate::{get_cmd_output, gwemlc, Workspace};

#[test]
fn test_model_mags_no_stderr() {
    let ws = Workspace::new();
    #[rustfmt::skip]
    let cmd = gwemlc()
        .args([
            "model-mags",
            "--name", "flat",
            "--data-dir", &ws.data,
            "--filters", &ws.filters,
            "--output-dir", &ws.output,
            "--do-ab",
            "--do-spec",
            "--no-plots",
        ])
        .ok();
    assert!(cmd.is_ok(), "model-mags failed: {:?}", get_cmd_output(cmd));
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}

#[test]
fn test_kilonova_no_stderr() {
    let ws = Workspace::new();
    #[rustfmt::skip]
    let cmd = gwemlc()
        .args([
            "kilonova",
            "--do-ejecta",
            "--tmax", "1",
            "--filters", &ws.filters,
            "--output-dir", &ws.output,
            "--no-plots",
        ])
        .ok();
    assert!(cmd.is_ok(), "kilonova failed: {:?}", get_cmd_output(cmd));
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}
