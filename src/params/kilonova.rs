// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use log::{error, info};

use super::{write_lightcurve, LightcurvePlot, OutputParams, RunError};
use crate::{
    filters::FilterSet,
    kilonova::{lightcurve, EjectaSource, KilonovaError, KilonovaModel, KilonovaParams},
    plotting::KILONOVA_LIGHTCURVE_BANDS,
};

pub(crate) struct KilonovaRunParams {
    pub(crate) model: KilonovaModel,
    pub(crate) source: EjectaSource,
    pub(crate) params: KilonovaParams,

    /// The stem of the output files.
    pub(crate) name: String,

    pub(crate) filters: FilterSet,
    pub(crate) output: OutputParams,
}

impl KilonovaRunParams {
    pub(crate) fn run(&self) -> Result<(), RunError> {
        let Self {
            model,
            source,
            params,
            name,
            filters,
            output,
        } = self;

        let lc = match lightcurve(*model, *source, params, filters) {
            Ok(lc) => lc,
            Err(e @ KilonovaError::NoLuminosity) => {
                error!("{model} gives no luminosity for {name}");
                return Err(e.into());
            }
            Err(e) => return Err(e.into()),
        };
        info!(
            "Generated {} epochs between {:.2} and {:.2} days",
            lc.t.len(),
            lc.t.first().copied().unwrap_or(f64::NAN),
            lc.t.last().copied().unwrap_or(f64::NAN),
        );

        let model = model.to_string();
        write_lightcurve(
            &lc,
            &model,
            name,
            output,
            2,
            LightcurvePlot::Whole(&KILONOVA_LIGHTCURVE_BANDS),
        )?;
        info!("Wrote {}", output.mag_table_path(&model, name).display());
        Ok(())
    }
}
