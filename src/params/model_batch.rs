// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{collections::BTreeSet, path::PathBuf};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::{debug, info, warn};
use rayon::prelude::*;

use super::{first_missing, write_model_mags, write_model_spectra, OutputParams, RunError};
use crate::{
    filters::FilterSet,
    io::get_all_matches_from_glob,
    models::{run_name_from_data_file, ModelKind, BATCH_AB_MODELS, BATCH_SPEC_MODELS},
    PROGRESS_BARS,
};

/// Every tabulated model run under a data directory.
pub(crate) struct ModelBatchParams {
    pub(crate) data_dir: PathBuf,
    pub(crate) output: OutputParams,
    pub(crate) filters: FilterSet,

    /// Also write spectral grids.
    pub(crate) spec: bool,
}

/// A single model run that is missing an output.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct BatchJob {
    pub(crate) kind: ModelKind,
    pub(crate) name: String,

    /// Write the spectral grid rather than the magnitudes.
    pub(crate) spectra: bool,
}

impl ModelBatchParams {
    /// The jobs whose outputs don't exist yet. Data files that share a run
    /// name (e.g. `x_AB.txt` and `x.txt`) give a single job.
    pub(crate) fn jobs(&self) -> Result<Vec<BatchJob>, RunError> {
        let mut jobs = BTreeSet::new();
        let ab_models: &[ModelKind] = &BATCH_AB_MODELS;
        let spec_models: &[ModelKind] = &BATCH_SPEC_MODELS;

        for (kinds, spectra) in [(ab_models, false), (spec_models, true)] {
            if spectra && !self.spec {
                continue;
            }
            for &kind in kinds {
                let model = kind.to_string();
                let pattern = self.data_dir.join(&model).join("*");
                let files = get_all_matches_from_glob(&pattern.display().to_string())?;
                debug!("{} data files for {model}", files.len());

                for file in files {
                    let name = match run_name_from_data_file(&file) {
                        Some(n) => n,
                        None => {
                            warn!("Couldn't get a run name from {}; skipping", file.display());
                            continue;
                        }
                    };
                    let output = if spectra {
                        self.output.spectra_path(&model, &name)
                    } else {
                        self.output.mag_table_path(&model, &name)
                    };
                    if output.exists() {
                        debug!("{} exists; skipping", output.display());
                        continue;
                    }
                    jobs.insert(BatchJob {
                        kind,
                        name,
                        spectra,
                    });
                }
            }
        }
        Ok(jobs.into_iter().collect())
    }

    fn run_job(&self, job: &BatchJob) -> Result<(), RunError> {
        let BatchJob {
            kind,
            name,
            spectra,
        } = job;
        let files = kind.data_files(&self.data_dir, name);
        if let Some(missing) = first_missing(&files) {
            warn!("{kind} run {name} has no {}; skipping", missing.display());
            return Ok(());
        }

        if *spectra {
            write_model_spectra(*kind, name, &files, &self.output)?;
        } else {
            write_model_mags(*kind, name, &files, &self.filters, &self.output)?;
        }
        Ok(())
    }

    pub(crate) fn run(&self) -> Result<(), RunError> {
        let jobs = self.jobs()?;
        if jobs.is_empty() {
            info!("Every model run already has outputs; nothing to do");
            return Ok(());
        }
        info!("Processing {} model runs", jobs.len());

        let progress = ProgressBar::with_draw_target(
            Some(jobs.len() as _),
            if PROGRESS_BARS.load() {
                ProgressDrawTarget::stdout()
            } else {
                ProgressDrawTarget::hidden()
            },
        )
        .with_style(
            ProgressStyle::default_bar()
                .template(
                    "{msg:18}: [{wide_bar:.blue}] {pos:3}/{len:3} runs ({elapsed_precise}<{eta_precise})",
                )?
                .progress_chars("=> "),
        )
        .with_position(0)
        .with_message("Model runs");

        // Runs share nothing, so failures are reported and counted rather
        // than stopping the others.
        let failed = jobs
            .par_iter()
            .filter(|job| {
                let result = self.run_job(job);
                progress.inc(1);
                match result {
                    Ok(()) => false,
                    Err(e) => {
                        warn!("{} run {} failed: {e}", job.kind, job.name);
                        true
                    }
                }
            })
            .count();
        progress.abandon_with_message("Finished");

        if failed > 0 {
            return Err(RunError::BatchFailures {
                failed,
                total: jobs.len(),
            });
        }
        Ok(())
    }
}
