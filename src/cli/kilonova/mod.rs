// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#[cfg(test)]
mod tests;

use std::{path::PathBuf, str::FromStr};

use clap::{Args, Parser};
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::common::{display_warnings, read_filters, InfoPrinter, OutputArgs, ARG_FILE_HELP};
use crate::{
    conversions::{Eos, EOS_COMMA_SEPARATED},
    kilonova::{
        output_name, EjectaSource, KilonovaModel, KilonovaParams, KILONOVA_MODELS_COMMA_SEPARATED,
    },
    params::KilonovaRunParams,
    GwemError,
};

pub(super) const DEFAULT_MODEL: KilonovaModel = KilonovaModel::Me2017;
pub(super) const DEFAULT_EOS: Eos = Eos::H4;

lazy_static::lazy_static! {
    static ref MODEL_HELP: String =
        format!("The kilonova model. Only {DEFAULT_MODEL} can be generated here; the others need external codes. Supported models: {} [default: {DEFAULT_MODEL}]", *KILONOVA_MODELS_COMMA_SEPARATED);

    static ref EOS_HELP: String =
        format!("The neutron-star equation of state. Supported: {} [default: {DEFAULT_EOS}]", *EOS_COMMA_SEPARATED);
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct KilonovaArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(short, long, help = MODEL_HELP.as_str(), help_heading = "MODEL")]
    pub(super) model: Option<String>,

    #[clap(short, long, help = EOS_HELP.as_str(), help_heading = "MODEL")]
    pub(super) eos: Option<String>,

    /// Use the given ejecta mass and velocity. Takes precedence over
    /// --do-masses.
    #[clap(long, help_heading = "MODEL")]
    #[serde(default)]
    pub(super) do_ejecta: bool,

    /// Derive the ejecta from the component masses and the equation of
    /// state.
    #[clap(long, help_heading = "MODEL")]
    #[serde(default)]
    pub(super) do_masses: bool,

    #[clap(flatten)]
    #[serde(rename = "parameters")]
    #[serde(default)]
    pub(super) param_args: KilonovaParamArgs,

    #[clap(flatten)]
    #[serde(rename = "output")]
    #[serde(default)]
    pub(super) output_args: OutputArgs,
}

/// The physical parameters of a run. Anything not given keeps its default.
#[derive(Args, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct KilonovaParamArgs {
    /// The mass ratio. [default: 3.0]
    #[clap(short = 'q', long = "massratio", help_heading = "BINARY")]
    pub(super) q: Option<f64>,

    /// The effective spin. [default: 0.1]
    #[clap(short = 'a', long, alias = "chi_eff", help_heading = "BINARY")]
    pub(super) chi_eff: Option<f64>,

    /// The ejecta mass [solar masses]. [default: 0.005]
    #[clap(long, help_heading = "EJECTA")]
    pub(super) mej: Option<f64>,

    /// The ejecta velocity [c]. [default: 0.2]
    #[clap(long, help_heading = "EJECTA")]
    pub(super) vej: Option<f64>,

    /// The mass of the first component [solar masses]. [default: 1.35]
    #[clap(long, help_heading = "BINARY")]
    pub(super) m1: Option<f64>,

    /// The mass of the second component [solar masses]. [default: 1.35]
    #[clap(long, help_heading = "BINARY")]
    pub(super) m2: Option<f64>,

    /// The jet opening angle [rad]. [default: 0.1]
    #[clap(long, alias = "theta_0", help_heading = "AFTERGLOW")]
    pub(super) theta_0: Option<f64>,

    /// The isotropic-equivalent energy [erg]. [default: 1e53]
    #[clap(long = "E", help_heading = "AFTERGLOW")]
    pub(super) e: Option<f64>,

    /// The circumburst density [cm^-3]. [default: 1.0]
    #[clap(long, help_heading = "AFTERGLOW")]
    pub(super) n: Option<f64>,

    /// The observer angle [rad]. [default: 0.0]
    #[clap(long, alias = "theta_obs", help_heading = "AFTERGLOW")]
    pub(super) theta_obs: Option<f64>,

    /// The power-law index of the ejecta's mass distribution. [default: 3.0]
    #[clap(long, help_heading = "EJECTA")]
    pub(super) beta: Option<f64>,

    /// The grey opacity [cm^2/g]. [default: 0.1]
    #[clap(long, alias = "kappa_r", help_heading = "EJECTA")]
    pub(super) kappa_r: Option<f64>,

    /// [default: -1.2]
    #[clap(long, alias = "slope_r", allow_hyphen_values = true, help_heading = "EJECTA")]
    pub(super) slope_r: Option<f64>,

    /// The first time of the lightcurve [days]. [default: 0.1]
    #[clap(long, help_heading = "TIMES")]
    pub(super) tini: Option<f64>,

    /// The last time of the lightcurve [days]. [default: 14.0]
    #[clap(long, help_heading = "TIMES")]
    pub(super) tmax: Option<f64>,

    /// The time step [days]. [default: 0.1]
    #[clap(long, help_heading = "TIMES")]
    pub(super) dt: Option<f64>,

    /// The minimum ejecta velocity [c]. [default: 0.02]
    #[clap(long, help_heading = "EJECTA")]
    pub(super) vmin: Option<f64>,

    /// [default: 0.2]
    #[clap(long, help_heading = "EJECTA")]
    pub(super) th: Option<f64>,

    /// [default: 3.14]
    #[clap(long, help_heading = "EJECTA")]
    pub(super) ph: Option<f64>,

    /// [default: 10.0]
    #[clap(long, help_heading = "EJECTA")]
    pub(super) kappa: Option<f64>,

    /// The radioactive heating rate at 1 day [erg/g/s]. [default: 1.58e10]
    #[clap(long, help_heading = "EJECTA")]
    pub(super) eps: Option<f64>,

    /// The power-law index of the heating rate. [default: 1.2]
    #[clap(long, help_heading = "EJECTA")]
    pub(super) alp: Option<f64>,

    /// The thermalisation efficiency. [default: 0.5]
    #[clap(long, help_heading = "EJECTA")]
    pub(super) eth: Option<f64>,

    /// [default: 1.0]
    #[clap(long, help_heading = "EJECTA")]
    pub(super) flgbct: Option<f64>,
}

/// Expands to code for every listed field of [`KilonovaParamArgs`].
macro_rules! for_each_param {
    ($m:ident) => {
        $m!(
            q, chi_eff, mej, vej, m1, m2, theta_0, e, n, theta_obs, beta, kappa_r, slope_r, tini,
            tmax, dt, vmin, th, ph, kappa, eps, alp, eth, flgbct
        )
    };
}

impl KilonovaParamArgs {
    fn merge(self, other: Self) -> Self {
        macro_rules! prefer_self {
            ($($f:ident),*) => {
                Self { $($f: self.$f.or(other.$f)),* }
            };
        }
        for_each_param!(prefer_self)
    }

    /// Overwrite the defaults in `params` with everything that was given.
    fn apply(self, params: &mut KilonovaParams) {
        macro_rules! overwrite {
            ($($f:ident),*) => {
                $(
                    if let Some(v) = self.$f {
                        params.$f = v;
                    }
                )*
            };
        }
        for_each_param!(overwrite);
    }
}

impl KilonovaArgs {
    /// Consolidate the command-line arguments with those in the argument
    /// file (if any), preferring the command line.
    pub(super) fn merge(self) -> Result<KilonovaArgs, GwemError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let KilonovaArgs {
                args_file: _,
                model,
                eos,
                do_ejecta,
                do_masses,
                param_args,
                output_args,
            } = unpack_arg_file!(arg_file);

            Ok(KilonovaArgs {
                args_file: None,
                model: cli_args.model.or(model),
                eos: cli_args.eos.or(eos),
                do_ejecta: cli_args.do_ejecta || do_ejecta,
                do_masses: cli_args.do_masses || do_masses,
                param_args: cli_args.param_args.merge(param_args),
                output_args: cli_args.output_args.merge(output_args),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn parse(self) -> Result<KilonovaRunParams, GwemError> {
        debug!("{:#?}", self);

        let Self {
            args_file: _,
            model,
            eos,
            do_ejecta,
            do_masses,
            param_args,
            output_args,
        } = self;

        let source = match (do_ejecta, do_masses) {
            (true, _) => EjectaSource::Ejecta,
            (false, true) => EjectaSource::Masses,
            (false, false) => return Err(KilonovaArgsError::NoEjectaSource.into()),
        };
        let model = match model {
            None => DEFAULT_MODEL,
            Some(m) => KilonovaModel::from_str(&m).map_err(|_| KilonovaArgsError::UnknownModel(m))?,
        };
        let eos = match eos {
            None => DEFAULT_EOS,
            Some(e) => Eos::from_str(&e).map_err(|_| KilonovaArgsError::UnknownEos(e))?,
        };

        let mut params = KilonovaParams {
            eos,
            ..Default::default()
        };
        param_args.apply(&mut params);
        for (name, value) in params.sample_table() {
            debug!("{name:>9}: {value}");
        }

        let name = output_name(model, source, &params);
        let output = output_args.parse();
        let filters = read_filters(&output)?;

        let (mej, vej) = params.ejecta(source);
        let mut printer = InfoPrinter::new(format!("{model} kilonova {name}").into());
        printer.push_block(vec![
            match source {
                EjectaSource::Ejecta => "Ejecta given directly".into(),
                EjectaSource::Masses => format!(
                    "Ejecta from masses {} and {} Msun with the {eos} equation of state",
                    params.m1, params.m2
                )
                .into(),
            },
            format!("mej: {mej:.5} Msun, vej: {vej:.4} c").into(),
        ]);
        printer.push_line(
            format!(
                "{} to {} days in steps of {} days",
                params.tini, params.tmax, params.dt
            )
            .into(),
        );
        printer.push_line(
            format!(
                "Tables to {}",
                output.output_base.join(model.to_string()).display()
            )
            .into(),
        );
        printer.display();
        display_warnings();

        Ok(KilonovaRunParams {
            model,
            source,
            params,
            name,
            filters,
            output,
        })
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), GwemError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let params = self.parse()?;

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        params.run()?;
        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub(super) enum KilonovaArgsError {
    #[error("Neither --do-ejecta nor --do-masses was given; one of them is required")]
    NoEjectaSource,

    #[error("Unknown kilonova model '{0}'. Supported models: {}", *KILONOVA_MODELS_COMMA_SEPARATED)]
    UnknownModel(String),

    #[error("Unknown equation of state '{0}'. Supported: {}", *EOS_COMMA_SEPARATED)]
    UnknownEos(String),
}
