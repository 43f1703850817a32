// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Plots of lightcurves, spectra and posteriors.
//!
//! Drawing needs the "plotting" feature; without it, every plot function
//! returns [`DrawError::NoPlottingFeature`]. The helpers that prepare data for
//! drawing are always available.

#[cfg(feature = "plotting")]
mod draw;
#[cfg(test)]
mod tests;

use std::path::Path;

use thiserror::Error;

use crate::{
    filters::BandName,
    lightcurve::{Lightcurve, SpectraGrid},
    posterior::{HistogramCurve, HistogramSpec},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotColour {
    Black,
    Blue,
    Cyan,
    Green,
    Magenta,
    Red,
    Yellow,
}

impl PlotColour {
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            PlotColour::Black => (0, 0, 0),
            PlotColour::Blue => (0, 0, 255),
            PlotColour::Cyan => (0, 191, 191),
            PlotColour::Green => (0, 128, 0),
            PlotColour::Magenta => (191, 0, 191),
            PlotColour::Red => (255, 0, 0),
            PlotColour::Yellow => (191, 191, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    DashDot,
    Dotted,
    Dashed,
}

/// The bands (and their colours) on a tabulated model's lightcurve plot.
pub const MODEL_LIGHTCURVE_BANDS: [(BandName, PlotColour); 5] = [
    (BandName::G, PlotColour::Yellow),
    (BandName::R, PlotColour::Green),
    (BandName::I, PlotColour::Blue),
    (BandName::Z, PlotColour::Cyan),
    (BandName::Y, PlotColour::Black),
];

/// The bands (and their colours) on a parameterised kilonova's lightcurve
/// plot.
pub const KILONOVA_LIGHTCURVE_BANDS: [(BandName, PlotColour); 5] = [
    (BandName::U, PlotColour::Red),
    (BandName::G, PlotColour::Yellow),
    (BandName::R, PlotColour::Green),
    (BandName::I, PlotColour::Blue),
    (BandName::Z, PlotColour::Cyan),
];

/// Plot magnitudes against time, brightest at the top.
pub fn plot_lightcurve(
    path: &Path,
    lc: &Lightcurve,
    bands: &[(BandName, PlotColour)],
) -> Result<(), DrawError> {
    #[cfg(feature = "plotting")]
    return draw::lightcurve(path, lc, bands);

    #[cfg(not(feature = "plotting"))]
    {
        let _ = (path, lc, bands);
        Err(DrawError::NoPlottingFeature)
    }
}

/// Plot the bolometric luminosity against time, with a logarithmic y axis.
pub fn plot_lbol(path: &Path, t: &[f64], lbol: &[f64]) -> Result<(), DrawError> {
    #[cfg(feature = "plotting")]
    return draw::lbol(path, t, lbol);

    #[cfg(not(feature = "plotting"))]
    {
        let _ = (path, t, lbol);
        Err(DrawError::NoPlottingFeature)
    }
}

/// Plot spectra as a time-wavelength colour mesh.
pub fn plot_spectra(path: &Path, grid: &SpectraGrid) -> Result<(), DrawError> {
    #[cfg(feature = "plotting")]
    return draw::spectra(path, grid);

    #[cfg(not(feature = "plotting"))]
    {
        let _ = (path, grid);
        Err(DrawError::NoPlottingFeature)
    }
}

/// Plot posterior histograms on a logarithmic y axis.
pub fn plot_histograms(
    path: &Path,
    spec: &HistogramSpec,
    curves: &[HistogramCurve],
) -> Result<(), DrawError> {
    #[cfg(feature = "plotting")]
    return draw::histograms(path, spec, curves);

    #[cfg(not(feature = "plotting"))]
    {
        let _ = (path, spec, curves);
        Err(DrawError::NoPlottingFeature)
    }
}

/// The smallest and largest finite values, if there are any.
pub fn finite_range<'a, I: IntoIterator<Item = &'a f64>>(values: I) -> Option<(f64, f64)> {
    values
        .into_iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Widen a range by `fraction` of its size on both sides, so that data don't
/// sit on the plot's edge. A zero-width range is widened by 1.
pub fn pad_range((lo, hi): (f64, f64), fraction: f64) -> (f64, f64) {
    let pad = if hi > lo { (hi - lo) * fraction } else { 1.0 };
    (lo - pad, hi + pad)
}

/// Split a curve into the runs of points where `y` is usable, so that gaps
/// are left where it isn't.
pub fn usable_runs(x: &[f64], y: &[f64], usable: impl Fn(f64) -> bool) -> Vec<Vec<(f64, f64)>> {
    let mut runs = vec![];
    let mut current = vec![];
    for (&x, &y) in x.iter().zip(y.iter()) {
        if x.is_finite() && usable(y) {
            current.push((x, y));
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Break a polyline into the pieces that are drawn for a line style. Each
/// segment between consecutive points is drawn fully (solid), in part
/// (dashed), or as a short piece and a dot (dash-dot). Dotted lines are drawn
/// as points by the caller and give back the points themselves.
pub fn styled_pieces(points: &[(f64, f64)], style: LineStyle) -> Vec<Vec<(f64, f64)>> {
    let lerp = |a: (f64, f64), b: (f64, f64), f: f64| (a.0 + (b.0 - a.0) * f, a.1 + (b.1 - a.1) * f);
    match style {
        LineStyle::Solid => vec![points.to_vec()],
        LineStyle::Dotted => points.iter().map(|&p| vec![p]).collect(),
        LineStyle::Dashed => points
            .windows(2)
            .map(|w| vec![w[0], lerp(w[0], w[1], 0.6)])
            .collect(),
        LineStyle::DashDot => points
            .windows(2)
            .flat_map(|w| {
                [
                    vec![w[0], lerp(w[0], w[1], 0.5)],
                    vec![lerp(w[0], w[1], 0.7), lerp(w[0], w[1], 0.75)],
                ]
            })
            .collect(),
    }
}

/// The edges of the cells centred on `centres`; the outer edges are half a
/// cell beyond the outer centres.
pub fn cell_edges(centres: &[f64]) -> Vec<f64> {
    match centres {
        [] => vec![],
        [c] => vec![c - 0.5, c + 0.5],
        _ => {
            let n = centres.len();
            let mut edges = Vec::with_capacity(n + 1);
            edges.push(centres[0] - (centres[1] - centres[0]) / 2.0);
            edges.extend(centres.windows(2).map(|w| (w[0] + w[1]) / 2.0));
            edges.push(centres[n - 1] + (centres[n - 1] - centres[n - 2]) / 2.0);
            edges
        }
    }
}

/// A perceptually-uniform colour (viridis) for `fraction` between 0 and 1.
pub fn viridis(fraction: f64) -> (u8, u8, u8) {
    const ANCHORS: [(f64, f64, f64); 5] = [
        (68.0, 1.0, 84.0),
        (59.0, 82.0, 139.0),
        (33.0, 145.0, 140.0),
        (94.0, 201.0, 98.0),
        (253.0, 231.0, 37.0),
    ];
    let f = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    let scaled = f * (ANCHORS.len() - 1) as f64;
    let i = (scaled.floor() as usize).min(ANCHORS.len() - 2);
    let w = scaled - i as f64;
    let (a, b) = (ANCHORS[i], ANCHORS[i + 1]);
    let mix = |x: f64, y: f64| (x + (y - x) * w).round() as u8;
    (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

#[derive(Error, Debug)]
pub enum DrawError {
    #[cfg(not(feature = "plotting"))]
    #[error("gwemlc was not compiled with the \"plotting\" feature.\nRecompile with this feature to make plots, or skip plotting with --no-plots")]
    NoPlottingFeature,

    #[error("Nothing to plot for {0}; there are no finite values")]
    NothingToPlot(String),

    #[error("Error from the plotters library: {0}")]
    Plotters(String),
}
