// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Posterior samples from parameter-estimation runs, and the histograms made
//! from them.
//!
//! Each run lives in its own plot directory, laid out like
//! `.../<Model[_EOSFit]>/<bands>/<trange>/<kind>/<run>/<errorbudget>`, which
//! holds a `2-post*` sample file.

mod labels;

pub use labels::reference_label;

use std::{
    cmp::Ordering,
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use log::{debug, warn};
use ndarray::prelude::*;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::{
    conversions::ms2mc,
    io::{get_all_matches_from_glob, read::read_table, read::ReadError, GlobError},
    math::{hist_results, MathError},
    plotting::{LineStyle, PlotColour},
};

/// The number of histogram bin edges used for every posterior plot.
pub const NUM_HISTOGRAM_EDGES: usize = 25;

/// Models that posterior files can come from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, EnumString,
)]
pub enum PosteriorModel {
    #[strum(serialize = "BHNS")]
    Bhns,

    #[strum(serialize = "BNS")]
    Bns,

    Blue,

    #[strum(serialize = "SN")]
    Sn,
}

impl PosteriorModel {
    pub fn label(self) -> &'static str {
        // Every posterior model has an entry in the label table.
        reference_label(&self.to_string()).unwrap_or("")
    }
}

/// Which parameters of a posterior are plotted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Parametrisation {
    /// Chirp mass and mass ratio.
    Masses,

    /// Ejecta mass and velocity.
    Ejecta,
}

impl Parametrisation {
    pub fn plots(self) -> &'static [HistogramSpec] {
        match self {
            Parametrisation::Masses => &MASSES_PLOTS,
            Parametrisation::Ejecta => &EJECTA_PLOTS,
        }
    }
}

/// Derived quantities that get histogrammed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Quantity {
    Mchirp,
    Q,
    Mej,
    Vej,
}

/// How a posterior histogram is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSpec {
    pub quantity: Quantity,

    /// Histogram `log10` of the samples rather than the samples themselves.
    pub log10: bool,

    /// The range of the bin edges.
    pub bounds: (f64, f64),
    pub x_limits: (f64, f64),
    pub y_limits: (f64, f64),
    pub x_label: &'static str,
}

impl HistogramSpec {
    /// The stem of the plot's file name.
    pub fn file_stem(&self) -> String {
        self.quantity.to_string()
    }
}

const EJECTA_PLOTS: [HistogramSpec; 2] = [
    HistogramSpec {
        quantity: Quantity::Mej,
        log10: true,
        bounds: (-3.0, 0.0),
        x_limits: (-3.0, 0.0),
        y_limits: (0.1, 10.0),
        x_label: "log10(Mej)",
    },
    HistogramSpec {
        quantity: Quantity::Vej,
        log10: false,
        bounds: (0.0, 1.0),
        x_limits: (0.0, 1.0),
        y_limits: (0.1, 20.0),
        x_label: "vej",
    },
];

const MASSES_PLOTS: [HistogramSpec; 2] = [
    HistogramSpec {
        quantity: Quantity::Mchirp,
        log10: false,
        bounds: (0.8, 4.0),
        x_limits: (0.8, 4.0),
        y_limits: (0.1, 10.0),
        x_label: "Mc",
    },
    HistogramSpec {
        quantity: Quantity::Q,
        log10: false,
        bounds: (0.0, 2.0),
        x_limits: (0.9, 2.0),
        y_limits: (0.1, 10.0),
        x_label: "q",
    },
];

/// An error budget [mag], ordered so it can key a map.
#[derive(Debug, Clone, Copy)]
pub struct ErrorBudget(pub f64);

impl PartialEq for ErrorBudget {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ErrorBudget {}

impl PartialOrd for ErrorBudget {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ErrorBudget {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// What a plot directory's path says about the run inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotDirInfo {
    pub model: PosteriorModel,

    /// Was the equation of state fitted too (`<Model>_EOSFit`)?
    pub eos_fit: bool,
    pub error_budget: ErrorBudget,
}

impl PlotDirInfo {
    pub fn parse(dir: &Path) -> Result<PlotDirInfo, PosteriorError> {
        let components: Vec<String> = dir
            .iter()
            .map(|c| c.to_string_lossy().into_owned())
            .collect();
        if components.len() < 6 {
            return Err(PosteriorError::ShortPath(dir.to_path_buf()));
        }

        let model_dir = &components[components.len() - 6];
        let parts: Vec<&str> = model_dir.split('_').collect();
        let model = parts[0]
            .parse()
            .map_err(|_| PosteriorError::UnknownModel {
                path: dir.to_path_buf(),
                name: parts[0].to_string(),
            })?;

        let budget = &components[components.len() - 1];
        let error_budget =
            budget
                .parse::<f64>()
                .map_err(|_| PosteriorError::BadErrorBudget {
                    path: dir.to_path_buf(),
                    value: budget.clone(),
                })?;

        Ok(PlotDirInfo {
            model,
            eos_fit: parts.len() == 2,
            error_budget: ErrorBudget(error_budget),
        })
    }
}

/// The first `2-post*` file in `dir`, if there is one.
pub fn get_post_file(dir: &Path) -> Result<Option<PathBuf>, PosteriorError> {
    let pattern = dir.join("2-post*");
    let matches = get_all_matches_from_glob(&pattern.to_string_lossy())?;
    Ok(matches.into_iter().next())
}

/// Samples of each quantity.
pub type QuantitySamples = BTreeMap<Quantity, Vec<f64>>;

/// Derive the plotted quantities from a posterior table. The layout of the
/// table's columns depends on the model, whether the equation of state was
/// fitted, and the parametrisation.
pub fn quantities_from_table(
    path: &Path,
    info: &PlotDirInfo,
    parametrisation: Parametrisation,
    table: ArrayView2<f64>,
) -> Result<QuantitySamples, PosteriorError> {
    use Parametrisation::*;
    use PosteriorModel::*;

    let expected = match (info.model, parametrisation) {
        (Sn, _) => 7,
        (_, Ejecta) => 7,
        (Bhns, Masses) if info.eos_fit => 9,
        (_, Masses) if info.eos_fit => 8,
        (_, Masses) => 10,
    };
    if table.ncols() < expected {
        return Err(PosteriorError::TooFewColumns {
            path: path.to_path_buf(),
            model: info.model,
            expected,
            got: table.ncols(),
        });
    }

    let mut quantities = QuantitySamples::new();
    match (info.model, parametrisation) {
        // SALT2 parameters aren't plotted.
        (Sn, _) => (),

        (_, Ejecta) => {
            quantities.insert(
                Quantity::Mej,
                table.column(1).iter().map(|m| 10_f64.powf(*m)).collect(),
            );
            quantities.insert(Quantity::Vej, table.column(2).to_vec());
        }

        // The mass ratio is a column, and the neutron-star mass another.
        (Bhns, Masses) => {
            let (mchirp, q): (Vec<f64>, Vec<f64>) = table
                .column(1)
                .iter()
                .zip(table.column(3).iter())
                .map(|(&q, &mns)| {
                    let (mchirp, _, q) = ms2mc(q * mns, mns);
                    (mchirp, q)
                })
                .unzip();
            quantities.insert(Quantity::Mchirp, mchirp);
            quantities.insert(Quantity::Q, q);
        }

        (Bns | Blue, Masses) => {
            let m2_col = if info.eos_fit { 3 } else { 4 };
            let (mchirp, q): (Vec<f64>, Vec<f64>) = table
                .column(1)
                .iter()
                .zip(table.column(m2_col).iter())
                .map(|(&m1, &m2)| {
                    let (mchirp, _, q) = ms2mc(m1, m2);
                    (mchirp, 1.0 / q)
                })
                .unzip();
            quantities.insert(Quantity::Mchirp, mchirp);
            quantities.insert(Quantity::Q, q);
        }
    }

    Ok(quantities)
}

/// Posterior samples by model, then by error budget.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Posteriors {
    map: BTreeMap<PosteriorModel, BTreeMap<ErrorBudget, QuantitySamples>>,
}

impl Posteriors {
    /// Read the posterior of every plot directory. Directories without a
    /// posterior file are skipped, but their model still counts towards the
    /// plot colours.
    pub fn read(
        plot_dirs: &[PathBuf],
        parametrisation: Parametrisation,
    ) -> Result<Posteriors, PosteriorError> {
        let mut posteriors = Posteriors::default();
        for dir in plot_dirs {
            let info = PlotDirInfo::parse(dir)?;
            posteriors.map.entry(info.model).or_default();

            let post_file = match get_post_file(dir)? {
                Some(f) => f,
                None => {
                    warn!("No posterior file in {}; skipping", dir.display());
                    continue;
                }
            };
            debug!(
                "Reading {} posterior (error budget {}) from {}",
                info.model,
                info.error_budget.0,
                post_file.display()
            );
            let table = read_table(&post_file, 0)?;
            let quantities =
                quantities_from_table(&post_file, &info, parametrisation, table.view())?;
            posteriors.insert(info.model, info.error_budget, quantities);
        }
        Ok(posteriors)
    }

    /// Add samples. Samples for a model and budget that already has some are
    /// appended.
    pub fn insert(
        &mut self,
        model: PosteriorModel,
        error_budget: ErrorBudget,
        quantities: QuantitySamples,
    ) {
        let existing = self
            .map
            .entry(model)
            .or_default()
            .entry(error_budget)
            .or_default();
        for (quantity, samples) in quantities {
            existing.entry(quantity).or_default().extend(samples);
        }
    }

    pub fn models(&self) -> impl Iterator<Item = PosteriorModel> + '_ {
        self.map.keys().copied()
    }

    pub fn budgets(
        &self,
        model: PosteriorModel,
    ) -> impl Iterator<Item = (ErrorBudget, &QuantitySamples)> + '_ {
        self.map
            .get(&model)
            .into_iter()
            .flat_map(|b| b.iter().map(|(budget, q)| (*budget, q)))
    }

    /// Are there no samples at all?
    pub fn is_empty(&self) -> bool {
        self.map
            .values()
            .flat_map(|b| b.values())
            .all(|q| q.values().all(|s| s.is_empty()))
    }
}

/// How the curves of a posterior plot are labelled and coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelType {
    /// One colour per error budget, labelled with the budget.
    ErrorBar,

    /// One colour per model and one line style per error budget, labelled
    /// with the model's reference.
    Name,

    /// Everything blue and unlabelled.
    Plain,
}

impl LabelType {
    pub fn new(s: &str) -> LabelType {
        match s {
            "errorbar" => LabelType::ErrorBar,
            "name" => LabelType::Name,
            _ => LabelType::Plain,
        }
    }
}

const CURVE_COLOURS: [PlotColour; 5] = [
    PlotColour::Blue,
    PlotColour::Green,
    PlotColour::Red,
    PlotColour::Magenta,
    PlotColour::Cyan,
];

const LINE_STYLES: [LineStyle; 4] = [
    LineStyle::Solid,
    LineStyle::DashDot,
    LineStyle::Dotted,
    LineStyle::Dashed,
];

/// One histogram, ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramCurve {
    /// Bin centres.
    pub centres: Vec<f64>,
    pub density: Vec<f64>,
    pub colour: PlotColour,
    pub line_style: LineStyle,
    pub label: Option<String>,
}

/// Histogram every model's samples of `spec`'s quantity. Models are visited
/// in name order and budgets in increasing order; budgets without the
/// quantity are skipped.
pub fn histogram_curves(
    posteriors: &Posteriors,
    spec: &HistogramSpec,
    label_type: LabelType,
) -> Result<Vec<HistogramCurve>, PosteriorError> {
    let mut curves = vec![];
    for (i_model, model) in posteriors.models().enumerate() {
        for (i_budget, (budget, quantities)) in posteriors.budgets(model).enumerate() {
            let samples = match quantities.get(&spec.quantity) {
                Some(s) => s,
                None => continue,
            };
            let samples: Vec<f64> = if spec.log10 {
                samples.iter().map(|s| s.log10()).collect()
            } else {
                samples.clone()
            };
            let (centres, density) =
                hist_results(&samples, NUM_HISTOGRAM_EDGES, Some(spec.bounds))?;

            let (colour, line_style, label) = match label_type {
                LabelType::ErrorBar => (
                    CURVE_COLOURS[i_budget % CURVE_COLOURS.len()],
                    LineStyle::Solid,
                    Some(format!("Δm: {:.2}", budget.0)),
                ),
                LabelType::Name => (
                    CURVE_COLOURS[i_model % CURVE_COLOURS.len()],
                    LINE_STYLES[i_budget % LINE_STYLES.len()],
                    // Only a model's first curve goes in the legend.
                    (i_budget == 0).then(|| model.label().to_string()),
                ),
                LabelType::Plain => (PlotColour::Blue, LineStyle::Solid, None),
            };
            curves.push(HistogramCurve {
                centres,
                density,
                colour,
                line_style,
                label,
            });
        }
    }
    Ok(curves)
}

/// Where posterior plots are written: `<plot_dir>/gws/<output_name>/<masses|ejecta>`.
pub fn posterior_plot_dir(
    plot_dir: &Path,
    output_name: &str,
    parametrisation: Parametrisation,
) -> PathBuf {
    plot_dir
        .join("gws")
        .join(output_name)
        .join(parametrisation.to_string())
}

#[derive(Error, Debug)]
pub enum PosteriorError {
    #[error("Plot directory {} has too few components; expected .../<model>/<bands>/<trange>/<kind>/<run>/<errorbudget>", .0.display())]
    ShortPath(PathBuf),

    #[error("Plot directory {} refers to unknown model '{name}'; expected one of BHNS, BNS, Blue, SN", .path.display())]
    UnknownModel { path: PathBuf, name: String },

    #[error("Plot directory {} ends with '{value}', which isn't an error budget", .path.display())]
    BadErrorBudget { path: PathBuf, value: String },

    #[error("Posterior file {} has {got} columns, but {model} posteriors need at least {expected}", .path.display())]
    TooFewColumns {
        path: PathBuf,
        model: PosteriorModel,
        expected: usize,
        got: usize,
    },

    #[error(transparent)]
    Glob(#[from] GlobError),

    #[error(transparent)]
    Read(#[from] ReadError),

    #[error(transparent)]
    Math(#[from] MathError),
}
