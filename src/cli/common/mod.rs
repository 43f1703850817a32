// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Arguments and helpers shared by several subcommands.

mod printers;

pub(crate) use printers::{display_warnings, InfoPrinter, Warn};

use std::path::PathBuf;

use clap::Args;
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use super::GwemError;
use crate::{filters::FilterSet, params::OutputParams};

lazy_static::lazy_static! {
    pub(super) static ref ARG_FILE_TYPES_COMMA_SEPARATED: String = ArgFileTypes::iter().join(", ");

    pub(super) static ref ARG_FILE_HELP: String =
        format!("All arguments may be specified in a file. Any CLI arguments override arguments set in the file. Supported formats: {}", *ARG_FILE_TYPES_COMMA_SEPARATED);
}

pub(super) const DEFAULT_OUTPUT_DIR: &str = "../output";
pub(super) const DEFAULT_PLOT_DIR: &str = "../plots";
pub(super) const DEFAULT_DATA_DIR: &str = "../data";
pub(super) const DEFAULT_FILTERS_FILE: &str = "../input/filters.dat";

#[derive(Debug, Display, EnumIter, EnumString)]
pub(super) enum ArgFileTypes {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
}

macro_rules! unpack_arg_file {
    ($arg_file:expr) => ({
        use std::{fs::File, io::Read, str::FromStr};

        use log::debug;

        use crate::cli::common::{ArgFileTypes, ARG_FILE_TYPES_COMMA_SEPARATED};

        debug!("Attempting to parse argument file {} ...", $arg_file.display());

        let mut contents = String::new();
        let arg_file_type = $arg_file
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| ArgFileTypes::from_str(&e).ok());

        match arg_file_type {
            Some(ArgFileTypes::Toml) => {
                debug!("Parsing toml file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match toml::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(GwemError::ArgFile(format!(
                            "Couldn't decode toml structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }

            Some(ArgFileTypes::Json) => {
                debug!("Parsing json file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match serde_json::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(GwemError::ArgFile(format!(
                            "Couldn't decode json structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }

            _ => {
                return Err(GwemError::ArgFile(format!(
                    "Argument file '{:?}' doesn't have a recognised file extension! Valid extensions are: {}", $arg_file, *ARG_FILE_TYPES_COMMA_SEPARATED)
                ))
            }
        }
    });
}

/// Where lightcurve tables and plots go, and the passbands used to make them.
#[derive(Debug, Clone, Default, Args, Serialize, Deserialize)]
pub(super) struct OutputArgs {
    /// The base directory for output tables. Files are written to
    /// <OUTPUT_DIR>/<MODEL>/. [default: ../output]
    #[clap(short = 'o', long, help_heading = "OUTPUT")]
    pub(super) output_dir: Option<PathBuf>,

    /// The base directory for plots. Plots are written to
    /// <PLOT_DIR>/<MODEL>/. [default: ../plots]
    #[clap(short = 'p', long, help_heading = "OUTPUT")]
    pub(super) plot_dir: Option<PathBuf>,

    /// Don't make any plots.
    #[clap(long, help_heading = "OUTPUT")]
    #[serde(default)]
    pub(super) no_plots: bool,

    /// The file of passband transmissions (a wavelength column in nm, then
    /// one column per band: u g r i z y J H K). [default:
    /// ../input/filters.dat]
    #[clap(long, help_heading = "INPUT")]
    pub(super) filters: Option<PathBuf>,
}

impl OutputArgs {
    pub(super) fn merge(self, other: Self) -> Self {
        Self {
            output_dir: self.output_dir.or(other.output_dir),
            plot_dir: self.plot_dir.or(other.plot_dir),
            no_plots: self.no_plots || other.no_plots,
            filters: self.filters.or(other.filters),
        }
    }

    /// Work out where outputs go. Nothing is created on disk, and the filter
    /// file is only read by subcommands that need it.
    pub(super) fn parse(self) -> OutputParams {
        let OutputArgs {
            output_dir,
            plot_dir,
            no_plots,
            filters,
        } = self;

        let filters_file = filters.unwrap_or_else(|| PathBuf::from(DEFAULT_FILTERS_FILE));
        let output_base = output_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        let plot_base = if no_plots {
            None
        } else {
            Some(plot_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_PLOT_DIR)))
        };

        OutputParams {
            output_base,
            plot_base,
            filters_file,
        }
    }
}

/// Read the passbands, logging where they came from.
pub(super) fn read_filters(params: &OutputParams) -> Result<FilterSet, GwemError> {
    debug!("Reading filters from {}", params.filters_file.display());
    let filters = FilterSet::read(&params.filters_file)?;
    Ok(filters)
}
