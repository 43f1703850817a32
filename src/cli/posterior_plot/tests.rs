// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use clap::Parser;

use super::PosteriorPlotArgs;
use crate::{
    posterior::{LabelType, Parametrisation},
    GwemError,
};

fn posterior_args(extra: &[&str]) -> PosteriorPlotArgs {
    let mut args = vec!["posterior-plot"];
    args.extend_from_slice(extra);
    PosteriorPlotArgs::parse_from(args)
}

#[test]
fn test_defaults() {
    let params = posterior_args(&["--do-masses"]).parse().unwrap();
    assert_eq!(params.parametrisation, Parametrisation::Masses);
    assert_eq!(params.label_type, LabelType::Name);
    assert_eq!(
        params.dirs,
        vec![
            PathBuf::from(
                "../plots/gws/Blue_EOSFit/u_g_r_i_z_y_J_H_K/0_14/masses/G298048_PS1_GROND_SOFI/1.00"
            ),
            PathBuf::from("../plots/gws/BNS_EOSFit/y_J_H_K/5_14/masses/G298048_PS1_GROND_SOFI/1.00"),
        ]
    );
    assert_eq!(
        params.plot_dir,
        PathBuf::from("../plots/gws/G298048_PS1_GROND_SOFI/masses")
    );
}

#[test]
fn test_masses_beat_ejecta() {
    let params = posterior_args(&[
        "--do-ejecta",
        "--do-masses",
        "--output-name",
        "GW170817",
        "-l",
        "errorbar",
        "-p",
        "plots",
    ])
    .parse()
    .unwrap();
    assert_eq!(params.parametrisation, Parametrisation::Masses);
    assert_eq!(params.label_type, LabelType::ErrorBar);
    assert_eq!(params.plot_dir, PathBuf::from("plots/gws/GW170817/masses"));

    let params = posterior_args(&["--do-ejecta", "-l", "whatever"])
        .parse()
        .unwrap();
    assert_eq!(params.parametrisation, Parametrisation::Ejecta);
    assert_eq!(params.label_type, LabelType::Plain);
}

#[test]
fn test_original_flag_names() {
    let args = posterior_args(&["--doEjecta", "--outputName", "x", "--labelType", "name"]);
    assert!(args.do_ejecta);
    assert_eq!(args.output_name.as_deref(), Some("x"));
    assert_eq!(args.label_type.as_deref(), Some("name"));
}

#[test]
fn test_bad_inputs() {
    let err = posterior_args(&[]).parse().err().unwrap();
    assert!(matches!(err, GwemError::Posterior(_)));
    assert!(err.to_string().contains("--do-masses"), "{err}");

    let result = posterior_args(&["--do-masses", "-n", " , "]).parse();
    assert!(matches!(result, Err(GwemError::Posterior(_))));

    // Too few path components to find the model.
    let result = posterior_args(&["--do-masses", "-n", "a/b/1.00"]).parse();
    assert!(matches!(result, Err(GwemError::Posterior(_))));

    let result = posterior_args(&["--do-masses", "-n", "x/Foo_EOSFit/b/t/masses/r/1.00"]).parse();
    assert!(matches!(result, Err(GwemError::Posterior(_))));

    let result = posterior_args(&["--do-masses", "-n", "x/BNS/b/t/masses/r/big"]).parse();
    assert!(matches!(result, Err(GwemError::Posterior(_))));
}

#[test]
fn test_dry_run_makes_no_plot_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let plot_dir = tmp.path().join("plots");
    let args = posterior_args(&[
        "--do-ejecta",
        "-n",
        "x/BHNS/b/t/ejecta/r/0.10",
        "-p",
        plot_dir.to_str().unwrap(),
    ]);
    assert!(args.run(true).is_ok());
    assert!(!plot_dir.exists());
}

#[test]
fn test_arg_file() {
    let tmp = tempfile::tempdir().unwrap();
    let arg_file = tmp.path().join("post.json");
    std::fs::write(
        &arg_file,
        r#"{"do_ejecta": true, "name": "a/BNS/b/t/ejecta/r/0.04,a/BNS/b/t/ejecta/r/1.00", "output_name": "from_file"}"#,
    )
    .unwrap();
    let mut args = posterior_args(&["--output-name", "from_cli"]);
    args.args_file = Some(arg_file);
    let params = args.merge().unwrap().parse().unwrap();
    assert_eq!(params.parametrisation, Parametrisation::Ejecta);
    assert_eq!(params.dirs.len(), 2);
    assert!(params.plot_dir.ends_with("gws/from_cli/ejecta"));
}
