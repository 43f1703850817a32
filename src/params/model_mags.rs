// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use log::info;

use super::{write_model_mags, write_model_spectra, OutputParams, RunError};
use crate::{
    filters::FilterSet,
    models::{ModelFiles, ModelKind},
};

/// A single run of a tabulated model.
pub(crate) struct ModelMagsParams {
    pub(crate) kind: ModelKind,
    pub(crate) name: String,
    pub(crate) files: ModelFiles,
    pub(crate) output: OutputParams,

    /// The passbands to derive magnitudes in. `None` if magnitudes aren't
    /// wanted.
    pub(crate) ab_filters: Option<FilterSet>,

    pub(crate) do_spec: bool,
}

impl ModelMagsParams {
    pub(crate) fn run(&self) -> Result<(), RunError> {
        let Self {
            kind,
            name,
            files,
            output,
            ab_filters,
            do_spec,
        } = self;

        if let Some(filters) = ab_filters {
            info!("Deriving magnitudes of {kind} run {name}");
            write_model_mags(*kind, name, files, filters, output)?;
            info!(
                "Wrote {}",
                output.mag_table_path(&kind.to_string(), name).display()
            );
        }
        if *do_spec {
            info!("Deriving spectra of {kind} run {name}");
            let grid = write_model_spectra(*kind, name, files, output)?;
            info!(
                "Wrote {} spectra at {} wavelengths to {}",
                grid.t.len(),
                grid.wavelength.len(),
                output.spectra_path(&kind.to_string(), name).display()
            );
        }
        Ok(())
    }
}
