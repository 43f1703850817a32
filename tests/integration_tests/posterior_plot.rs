// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::{get_cmd_output, gwemlc, Workspace};

#[test]
fn test_posterior_plot_dry_run() {
    let ws = Workspace::new();
    let run = ws.path().join("gws/BNS/g_r/0_7/ejecta/GW170817/0.10");
    std::fs::create_dir_all(&run).unwrap();
    std::fs::write(
        run.join("2-post_equal_weights.dat"),
        "0.1 -2.0 0.2 1 1 1 1 0\n0.2 -1.5 0.25 1 1 1 1 0\n",
    )
    .unwrap();

    #[rustfmt::skip]
    let cmd = gwemlc()
        .args([
            "plot-lightcurves-gws",
            "--doEjecta",
            "--name", &run.display().to_string(),
            "--plot-dir", &ws.plots,
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("gws/G298048_PS1_GROND_SOFI/ejecta"), "{stdout}");
    assert!(!ws.path().join("plots").exists());
}

#[test]
fn test_posterior_plot_bad_directory() {
    let cmd = gwemlc()
        .args(["posterior-plot", "--do-masses", "--name", "x/Nope/b/t/masses/r/1.00"])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Nope"), "{stderr}");
}
