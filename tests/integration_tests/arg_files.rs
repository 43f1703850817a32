// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::{get_cmd_output, gwemlc, Workspace};

#[test]
fn test_save_toml_reproduces_a_run() {
    let ws = Workspace::new();
    let saved = ws.path().join("saved.toml");
    #[rustfmt::skip]
    let cmd = gwemlc()
        .args([
            "model-mags",
            "--name", "flat",
            "--data-dir", &ws.data,
            "--filters", &ws.filters,
            "--output-dir", &ws.output,
            "--do-ab",
            "--no-plots",
            "--save-toml", &saved.display().to_string(),
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let contents = std::fs::read_to_string(&saved).unwrap();
    assert!(contents.contains("name = \"flat\""), "{contents}");
    assert!(contents.contains("do_ab = true"), "{contents}");
    assert!(contents.contains("[output]"), "{contents}");

    // Running from the saved file makes the outputs.
    let cmd = gwemlc()
        .args(["model-mags", &saved.display().to_string()])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    assert!(ws
        .path()
        .join("output/barnes_kilonova_spectra/flat.dat")
        .exists());
}

#[test]
fn test_json_arg_file() {
    let ws = Workspace::new();
    let arg_file = ws.path().join("kilonova.json");
    std::fs::write(
        &arg_file,
        format!(
            r#"{{
                "do_ejecta": true,
                "parameters": {{ "mej": 0.01, "vej": 0.25, "tmax": 1.0 }},
                "output": {{ "output_dir": "{}", "filters": "{}", "no_plots": true }}
            }}"#,
            ws.output, ws.filters
        ),
    )
    .unwrap();

    let cmd = gwemlc()
        .args(["kilonova", &arg_file.display().to_string()])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    assert!(ws
        .path()
        .join("output/Me2017/Me2017_H4M010V25.dat")
        .exists());
}
