// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.


use std::{path::PathBuf, str::FromStr};

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::common::{
    display_warnings, read_filters, InfoPrinter, OutputArgs, Warn, ARG_FILE_HELP,
    DEFAULT_DATA_DIR,
};
use crate::{
    models::{ModelError, ModelFamily, ModelKind, MODEL_KINDS_COMMA_SEPARATED},
    params::{first_missing, ModelMagsParams},
    GwemError,
};

pub(super) const DEFAULT_MODEL: &str = "barnes_kilonova_spectra";
pub(super) const DEFAULT_NAME: &str = "rpft_m001_v1";

lazy_static::lazy_static! {
    pub(super) static ref MODEL_HELP: String =
        format!("The tabulated model. Supported models: {} [default: {DEFAULT_MODEL}]", *MODEL_KINDS_COMMA_SEPARATED);
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct ModelMagsArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(short, long, help = MODEL_HELP.as_str(), help_heading = "MODEL")]
    pub(super) model: Option<String>,

    /// The name of the model run, i.e. its data file without the extension.
    /// [default: rpft_m001_v1]
    #[clap(short, long, help_heading = "MODEL")]
    pub(super) name: Option<String>,

    /// The directory holding <MODEL>/<NAME> data files. [default: ../data]
    #[clap(short, long, help_heading = "INPUT")]
    pub(super) data_dir: Option<PathBuf>,

    /// Derive magnitudes in every band and the bolometric luminosity.
    #[clap(long)]
    #[serde(default)]
    pub(super) do_ab: bool,

    /// Write the spectra on a common wavelength grid. Only spectral models
    /// can do this.
    #[clap(long)]
    #[serde(default)]
    pub(super) do_spec: bool,

    #[clap(flatten)]
    #[serde(rename = "output")]
    #[serde(default)]
    pub(super) output_args: OutputArgs,
}

impl ModelMagsArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified
    /// into a single struct. Where applicable, it will prefer CLI parameters
    /// over those in the file.
    pub(super) fn merge(self) -> Result<ModelMagsArgs, GwemError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let ModelMagsArgs {
                args_file: _,
                model,
                name,
                data_dir,
                do_ab,
                do_spec,
                output_args,
            } = unpack_arg_file!(arg_file);

            Ok(ModelMagsArgs {
                args_file: None,
                model: cli_args.model.or(model),
                name: cli_args.name.or(name),
                data_dir: cli_args.data_dir.or(data_dir),
                do_ab: cli_args.do_ab || do_ab,
                do_spec: cli_args.do_spec || do_spec,
                output_args: cli_args.output_args.merge(output_args),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn parse(self) -> Result<ModelMagsParams, GwemError> {
        debug!("{:#?}", self);

        let Self {
            args_file: _,
            model,
            name,
            data_dir,
            do_ab,
            do_spec,
            output_args,
        } = self;

        let model = model.unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let kind = ModelKind::from_str(&model)
            .map_err(|_| ModelMagsArgsError::UnknownModel(model.clone()))?;
        let name = name.unwrap_or_else(|| DEFAULT_NAME.to_string());
        let data_dir = data_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let files = kind.data_files(&data_dir, &name);
        let output = output_args.parse();

        if !do_ab && !do_spec {
            "Neither --do-ab nor --do-spec was given; nothing will be written".warn();
        } else if let Some(missing) = first_missing(&files) {
            return Err(ModelMagsArgsError::MissingData {
                model: kind,
                path: missing.to_path_buf(),
            }
            .into());
        }
        if do_spec && kind.family() != ModelFamily::Spectral {
            return Err(ModelError::NotSpectral(kind).into());
        }
        let ab_filters = if do_ab {
            Some(read_filters(&output)?)
        } else {
            None
        };

        let mut printer = InfoPrinter::new(format!("{kind} run {name}").into());
        printer.push_block(
            files
                .paths()
                .into_iter()
                .map(|p| format!("Data: {}", p.display()).into())
                .collect(),
        );
        let mut products = vec![];
        if do_ab {
            products.push(format!("Magnitudes with filters from {}", output.filters_file.display()).into());
        }
        if do_spec {
            products.push("Spectral grid".into());
        }
        if !products.is_empty() {
            printer.push_block(products);
        }
        printer.push_line(format!("Tables to {}", output.output_base.join(kind.to_string()).display()).into());
        match &output.plot_base {
            Some(p) => printer.push_line(format!("Plots to {}", p.join(kind.to_string()).display()).into()),
            None => printer.push_line("No plots".into()),
        }
        printer.display();
        display_warnings();

        Ok(ModelMagsParams {
            kind,
            name,
            files,
            output,
            ab_filters,
            do_spec,
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
pub(super) enum ModelMagsArgsError {
    #[error("Unknown model '{0}'. Supported models: {}", *MODEL_KINDS_COMMA_SEPARATED)]
    UnknownModel(String),

    #[error("Model '{model}' needs {}, which doesn't exist", .path.display())]
    MissingData { model: ModelKind, path: PathBuf },
}
