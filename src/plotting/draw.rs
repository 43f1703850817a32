// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use log::trace;
use plotters::prelude::*;

use super::*;

/// The number of X pixels on the plots.
const X_PIXELS: u32 = 1600;
/// The number of Y pixels on the plots.
const Y_PIXELS: u32 = 1200;

const LINE_WIDTH: u32 = 3;

fn rgb(colour: PlotColour) -> RGBColor {
    let (r, g, b) = colour.rgb();
    RGBColor(r, g, b)
}

pub(super) fn lightcurve(
    path: &Path,
    lc: &Lightcurve,
    bands: &[(BandName, PlotColour)],
) -> Result<(), DrawError> {
    trace!("Plotting lightcurve to {}", path.display());
    let nothing = || DrawError::NothingToPlot(path.display().to_string());
    let (t_min, t_max) = finite_range(&lc.t).ok_or_else(nothing)?;
    let (m_min, m_max) = finite_range(
        bands
            .iter()
            .flat_map(|(band, _)| lc.mags.column(band.index()).into_iter()),
    )
    .ok_or_else(nothing)?;
    let (t_min, t_max) = pad_range((t_min, t_max), 0.02);
    // Magnitudes are negated so that brighter is higher up.
    let (y_min, y_max) = pad_range((-m_max, -m_min), 0.05);

    let root = BitMapBackend::new(path, (X_PIXELS, Y_PIXELS)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| DrawError::Plotters(e.to_string()))?;
    let mut chart = ChartBuilder::on(&root)
        .margin(30)
        .x_label_area_size(80)
        .y_label_area_size(100)
        .build_cartesian_2d(t_min..t_max, y_min..y_max)
        .map_err(|e| DrawError::Plotters(e.to_string()))?;
    chart
        .configure_mesh()
        .x_desc("Time [days]")
        .y_desc("Absolute AB Magnitude")
        .y_label_formatter(&|y| format!("{:.1}", -y))
        .axis_desc_style(("sans-serif", 36))
        .label_style(("sans-serif", 28))
        .light_line_style(&WHITE)
        .draw()
        .map_err(|e| DrawError::Plotters(e.to_string()))?;

    for &(band, colour) in bands {
        let colour = rgb(colour);
        let negated: Vec<f64> = lc.mag(band).iter().map(|m| -m).collect();
        let runs = usable_runs(&lc.t, &negated, f64::is_finite);
        chart
            .draw_series(
                runs.into_iter()
                    .map(|run| PathElement::new(run, colour.stroke_width(LINE_WIDTH))),
            )
            .map_err(|e| DrawError::Plotters(e.to_string()))?
            .label(format!("{band}-band"))
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 30, y)], colour.stroke_width(LINE_WIDTH))
            });
    }
    chart
        .configure_series_labels()
        .label_font(("sans-serif", 28))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| DrawError::Plotters(e.to_string()))?;

    root.present()
        .map_err(|e| DrawError::Plotters(e.to_string()))?;
    Ok(())
}

pub(super) fn lbol(path: &Path, t: &[f64], lbol: &[f64]) -> Result<(), DrawError> {
    trace!("Plotting luminosity to {}", path.display());
    let positive = |l: f64| l.is_finite() && l > 0.0;
    let nothing = || DrawError::NothingToPlot(path.display().to_string());
    let (t_min, t_max) = finite_range(t).ok_or_else(nothing)?;
    let (l_min, l_max) =
        finite_range(lbol.iter().filter(|l| positive(**l))).ok_or_else(nothing)?;
    let (t_min, t_max) = pad_range((t_min, t_max), 0.02);
    let (l_min, l_max) = (l_min / 2.0, l_max * 2.0);

    let root = BitMapBackend::new(path, (X_PIXELS, Y_PIXELS)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| DrawError::Plotters(e.to_string()))?;
    let mut chart = ChartBuilder::on(&root)
        .margin(30)
        .x_label_area_size(80)
        .y_label_area_size(140)
        .build_cartesian_2d(t_min..t_max, (l_min..l_max).log_scale())
        .map_err(|e| DrawError::Plotters(e.to_string()))?;
    chart
        .configure_mesh()
        .x_desc("Time [days]")
        .y_desc("Bolometric Luminosity [erg/s]")
        .y_label_formatter(&|y| format!("{y:.0e}"))
        .axis_desc_style(("sans-serif", 36))
        .label_style(("sans-serif", 28))
        .light_line_style(&WHITE)
        .draw()
        .map_err(|e| DrawError::Plotters(e.to_string()))?;

    for run in usable_runs(t, lbol, positive) {
        chart
            .draw_series(
                styled_pieces(&run, LineStyle::Dashed)
                    .into_iter()
                    .map(|piece| PathElement::new(piece, BLACK.stroke_width(LINE_WIDTH))),
            )
            .map_err(|e| DrawError::Plotters(e.to_string()))?;
    }

    root.present()
        .map_err(|e| DrawError::Plotters(e.to_string()))?;
    Ok(())
}

pub(super) fn spectra(path: &Path, grid: &SpectraGrid) -> Result<(), DrawError> {
    trace!("Plotting spectra to {}", path.display());
    let nothing = || DrawError::NothingToPlot(path.display().to_string());
    let (f_min, f_max) = finite_range(grid.flux.iter()).ok_or_else(nothing)?;
    let t_edges = cell_edges(&grid.t);
    let wl_edges = cell_edges(&grid.wavelength);
    let (t_min, t_max) = finite_range(&t_edges).ok_or_else(nothing)?;
    let (wl_min, wl_max) = finite_range(&wl_edges).ok_or_else(nothing)?;

    let root = BitMapBackend::new(path, (X_PIXELS, Y_PIXELS)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| DrawError::Plotters(e.to_string()))?;
    let mut chart = ChartBuilder::on(&root)
        .margin(30)
        .x_label_area_size(80)
        .y_label_area_size(120)
        .build_cartesian_2d(t_min..t_max, wl_min..wl_max)
        .map_err(|e| DrawError::Plotters(e.to_string()))?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Time [days]")
        .y_desc("Wavelength [A]")
        .axis_desc_style(("sans-serif", 36))
        .label_style(("sans-serif", 28))
        .draw()
        .map_err(|e| DrawError::Plotters(e.to_string()))?;

    let span = f_max - f_min;
    let cells = grid
        .flux
        .indexed_iter()
        .filter(|(_, f)| f.is_finite())
        .map(|((i_t, i_wl), &f)| {
            let fraction = if span > 0.0 { (f - f_min) / span } else { 0.0 };
            let (r, g, b) = viridis(fraction);
            Rectangle::new(
                [
                    (t_edges[i_t], wl_edges[i_wl]),
                    (t_edges[i_t + 1], wl_edges[i_wl + 1]),
                ],
                RGBColor(r, g, b).filled(),
            )
        });
    chart
        .draw_series(cells)
        .map_err(|e| DrawError::Plotters(e.to_string()))?;

    root.present()
        .map_err(|e| DrawError::Plotters(e.to_string()))?;
    Ok(())
}

pub(super) fn histograms(
    path: &Path,
    spec: &HistogramSpec,
    curves: &[HistogramCurve],
) -> Result<(), DrawError> {
    trace!("Plotting {} histograms to {}", curves.len(), path.display());
    let (x_min, x_max) = spec.x_limits;
    let (y_min, y_max) = spec.y_limits;

    let root = BitMapBackend::new(path, (X_PIXELS, Y_PIXELS)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| DrawError::Plotters(e.to_string()))?;
    let mut chart = ChartBuilder::on(&root)
        .margin(30)
        .x_label_area_size(80)
        .y_label_area_size(100)
        .build_cartesian_2d(x_min..x_max, (y_min..y_max).log_scale())
        .map_err(|e| DrawError::Plotters(e.to_string()))?;
    chart
        .configure_mesh()
        .x_desc(spec.x_label)
        .y_desc("Probability Density Function")
        .axis_desc_style(("sans-serif", 40))
        .label_style(("sans-serif", 32))
        .light_line_style(&WHITE)
        .draw()
        .map_err(|e| DrawError::Plotters(e.to_string()))?;

    let mut any_labels = false;
    for curve in curves {
        let colour = rgb(curve.colour);
        let style = colour.stroke_width(LINE_WIDTH);
        let points: Vec<(f64, f64)> = curve
            .centres
            .iter()
            .copied()
            .zip(curve.density.iter().copied())
            .collect();
        let annotation = if curve.line_style == LineStyle::Dotted {
            chart
                .draw_series(
                    points
                        .into_iter()
                        .map(|p| Circle::new(p, LINE_WIDTH, colour.filled())),
                )
                .map_err(|e| DrawError::Plotters(e.to_string()))?
        } else {
            chart
                .draw_series(
                    styled_pieces(&points, curve.line_style)
                        .into_iter()
                        .map(|piece| PathElement::new(piece, style)),
                )
                .map_err(|e| DrawError::Plotters(e.to_string()))?
        };
        if let Some(label) = &curve.label {
            any_labels = true;
            annotation.label(label).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 30, y)], colour.stroke_width(LINE_WIDTH))
            });
        }
    }
    if any_labels {
        chart
            .configure_series_labels()
            .label_font(("sans-serif", 32))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(|e| DrawError::Plotters(e.to_string()))?;
    }

    root.present()
        .map_err(|e| DrawError::Plotters(e.to_string()))?;
    Ok(())
}
