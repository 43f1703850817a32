// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.


use std::path::PathBuf;

use clap::Parser;
use itertools::Itertools;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::common::{
    display_warnings, read_filters, InfoPrinter, OutputArgs, ARG_FILE_HELP, DEFAULT_DATA_DIR,
};
use crate::{
    models::{BATCH_AB_MODELS, BATCH_SPEC_MODELS},
    params::ModelBatchParams,
    GwemError,
};

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct ModelBatchArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    /// The directory holding a directory of data files per model.
    /// [default: ../data]
    #[clap(short, long, help_heading = "INPUT")]
    pub(super) data_dir: Option<PathBuf>,

    /// Also write the spectral grids of the spectral models.
    #[clap(long)]
    #[serde(default)]
    pub(super) spec: bool,

    #[clap(flatten)]
    #[serde(rename = "output")]
    #[serde(default)]
    pub(super) output_args: OutputArgs,
}

impl ModelBatchArgs {
    /// Consolidate the command-line arguments with those in the argument
    /// file (if any), preferring the command line.
    pub(super) fn merge(self) -> Result<ModelBatchArgs, GwemError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let ModelBatchArgs {
                args_file: _,
                data_dir,
                spec,
                output_args,
            } = unpack_arg_file!(arg_file);

            Ok(ModelBatchArgs {
                args_file: None,
                data_dir: cli_args.data_dir.or(data_dir),
                spec: cli_args.spec || spec,
                output_args: cli_args.output_args.merge(output_args),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn parse(self) -> Result<ModelBatchParams, GwemError> {
        debug!("{:#?}", self);

        let Self {
            args_file: _,
            data_dir,
            spec,
            output_args,
        } = self;

        let data_dir = data_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let output = output_args.parse();
        let filters = read_filters(&output)?;

        let mut printer = InfoPrinter::new("Batch of tabulated model runs".into());
        printer.push_block(vec![
            format!("Data under {}", data_dir.display()).into(),
            format!("Magnitudes of: {}", BATCH_AB_MODELS.iter().join(", ")).into(),
        ]);
        if spec {
            printer.push_line(
                format!("Spectral grids of: {}", BATCH_SPEC_MODELS.iter().join(", ")).into(),
            );
        }
        printer.push_line(format!("Tables under {}", output.output_base.display()).into());
        if let Some(plot_base) = &output.plot_base {
            printer.push_line(format!("Plots under {}", plot_base.display()).into());
        }
        printer.display();
        display_warnings();

        Ok(ModelBatchParams {
            data_dir,
            output,
            filters,
            spec,
        })
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), GwemError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let params = self.parse()?;

        if dry_run {
            let jobs = params.jobs()?;
            info!("Dry run -- {} model runs would be processed; exiting now.", jobs.len());
            return Ok(());
        }

        params.run()?;
        Ok(())
    }
}
