// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;
use clap::Parser;
use tempfile::TempDir;

use super::KilonovaArgs;
use crate::{
    conversions::Eos,
    filters::write_box_filters,
    io::read::{read_lbol_table, read_mag_table},
    kilonova::{EjectaSource, KilonovaModel},
    GwemError,
};

fn kilonova_args(tmp: &TempDir, extra: &[&str]) -> KilonovaArgs {
    let filters = write_box_filters(tmp.path()).display().to_string();
    let out = tmp.path().join("output").display().to_string();
    #[rustfmt::skip]
    let mut args = vec![
        "kilonova",
        "--filters", &filters,
        "--output-dir", &out,
        "--no-plots",
        "--tini", "0.5",
        "--tmax", "2",
        "--dt", "0.5",
    ];
    args.extend_from_slice(extra);
    KilonovaArgs::parse_from(args)
}

#[test]
fn test_ejecta_run() {
    let tmp = TempDir::new().unwrap();
    let result = kilonova_args(&tmp, &["--do-ejecta"]).run(false);
    assert!(result.is_ok(), "{result:?}");

    let dir = tmp.path().join("output/Me2017");
    let contents = std::fs::read_to_string(dir.join("Me2017_H4M005V20.dat")).unwrap();
    let first_row = contents.lines().nth(1).unwrap();
    assert!(first_row.starts_with("0.50 "), "{first_row}");

    let (t, mags) = read_mag_table(&dir.join("Me2017_H4M005V20.dat")).unwrap();
    assert_eq!(t, vec![0.5, 1.0, 1.5, 2.0]);
    assert_eq!(mags.dim(), (4, 9));
    let (t_lbol, lbol) = read_lbol_table(&dir.join("Me2017_H4M005V20_Lbol.dat")).unwrap();
    assert_eq!(t_lbol.len(), 4);
    assert!(lbol.iter().all(|l| *l > 0.0));
}

#[test]
fn test_parse_defaults() {
    let tmp = TempDir::new().unwrap();
    let params = kilonova_args(&tmp, &["--do-masses"]).parse().unwrap();
    assert_eq!(params.model, KilonovaModel::Me2017);
    assert_eq!(params.source, EjectaSource::Masses);
    assert_eq!(params.params.eos, Eos::H4);
    assert_abs_diff_eq!(params.params.q, 3.0);
    assert_abs_diff_eq!(params.params.eps, 1.58e10);
    assert_abs_diff_eq!(params.params.tmax, 2.0);
    assert_eq!(params.name, "H4M135m135");
}

#[test]
fn test_ejecta_beats_masses() {
    let tmp = TempDir::new().unwrap();
    let params = kilonova_args(
        &tmp,
        &[
            "--do-masses",
            "--do-ejecta",
            "-e",
            "APR4",
            "--mej",
            "0.05",
            "--vej",
            "0.3",
            "--slope-r",
            "-2.5",
        ],
    )
    .parse()
    .unwrap();
    assert_eq!(params.source, EjectaSource::Ejecta);
    assert_abs_diff_eq!(params.params.slope_r, -2.5);
    assert_eq!(params.name, "Me2017_APR4M050V30");
}

#[test]
fn test_bad_inputs() {
    let tmp = TempDir::new().unwrap();
    let err = kilonova_args(&tmp, &[]).parse().err().unwrap();
    assert!(matches!(err, GwemError::Kilonova(_)));
    assert!(err.to_string().contains("--do-ejecta"), "{err}");

    let result = kilonova_args(&tmp, &["--do-ejecta", "-m", "Ba2017"]).parse();
    assert!(matches!(result, Err(GwemError::Kilonova(_))));

    let result = kilonova_args(&tmp, &["--do-ejecta", "-e", "SLy"]).parse();
    assert!(matches!(result, Err(GwemError::Kilonova(_))));
}

#[test]
fn test_unbounded_times_fail() {
    let tmp = TempDir::new().unwrap();
    let mut args = kilonova_args(&tmp, &["--do-ejecta"]);
    args.param_args.tmax = Some(f64::INFINITY);
    let err = args.run(false).err().unwrap();
    assert!(matches!(err, GwemError::Kilonova(_)));
    assert!(err.to_string().contains("finite"), "{err}");

    let mut args = kilonova_args(&tmp, &["--do-ejecta"]);
    args.param_args.dt = Some(1e-300);
    let err = args.run(false).err().unwrap();
    assert!(err.to_string().contains("epochs"), "{err}");
    assert!(!tmp.path().join("output/Me2017").exists());
}

#[test]
fn test_external_models_fail_at_run_time() {
    let tmp = TempDir::new().unwrap();
    let args = kilonova_args(&tmp, &["--do-ejecta", "-m", "KaKy2016"]);
    // Parsing is fine; only generating the lightcurve needs the external code.
    assert!(args.clone().run(true).is_ok());
    let err = args.run(false).err().unwrap();
    assert!(err.to_string().contains("external"), "{err}");
    assert!(!tmp.path().join("output/KaKy2016").exists());
}

#[test]
fn test_parameters_from_arg_file() {
    let tmp = TempDir::new().unwrap();
    let arg_file = tmp.path().join("kn.toml");
    std::fs::write(
        &arg_file,
        indoc::indoc! {r#"
            eos = "MS1"
            do_masses = true

            [parameters]
            m1 = 1.4
            tmax = 7.0
        "#},
    )
    .unwrap();

    let mut args = kilonova_args(&tmp, &["--m2", "1.2"]);
    args.args_file = Some(arg_file);
    let params = args.merge().unwrap().parse().unwrap();
    assert_eq!(params.params.eos, Eos::Ms1);
    assert_eq!(params.source, EjectaSource::Masses);
    assert_abs_diff_eq!(params.params.m1, 1.4);
    assert_abs_diff_eq!(params.params.m2, 1.2);
    // The command line wins.
    assert_abs_diff_eq!(params.params.tmax, 2.0);
    assert_eq!(params.name, "MS1M140m120");
}
