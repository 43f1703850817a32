// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::{get_cmd_output, gwemlc, Workspace};

#[test]
fn test_kilonova_masses() {
    let ws = Workspace::new();
    #[rustfmt::skip]
    let cmd = gwemlc()
        .args([
            "kilonova",
            "--do-masses",
            "--eos", "APR4",
            "--m1", "1.4",
            "--m2", "1.3",
            "--tmax", "3",
            "--dt", "0.5",
            "--filters", &ws.filters,
            "--output-dir", &ws.output,
            "--no-plots",
        ])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let table = std::fs::read_to_string(ws.path().join("output/Me2017/APR4M140m130.dat")).unwrap();
    let times: Vec<&str> = table
        .lines()
        .filter(|l| !l.starts_with('#'))
        .map(|l| l.split_whitespace().next().unwrap())
        .collect();
    assert_eq!(times, ["0.10", "0.60", "1.10", "1.60", "2.10", "2.60", "3.10"]);
}

#[test]
fn test_kilonova_needs_an_ejecta_source() {
    let ws = Workspace::new();
    let cmd = gwemlc()
        .args(["kilonova", "--filters", &ws.filters])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("--do-ejecta"), "{stderr}");
}

#[test]
fn test_kilonova_external_model() {
    let ws = Workspace::new();
    #[rustfmt::skip]
    let cmd = gwemlc()
        .args([
            "run-parameterized-models",
            "--do-ejecta",
            "--model", "WoKo2017",
            "--filters", &ws.filters,
            "--output-dir", &ws.output,
            "--no-plots",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("WoKo2017"), "{stderr}");
    assert!(stderr.contains("external"), "{stderr}");
}
