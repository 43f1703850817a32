// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;

use super::*;

#[test]
fn test_finite_range() {
    assert_eq!(
        finite_range(&[3.0, f64::NAN, -1.0, f64::INFINITY, 2.0]),
        Some((-1.0, 3.0))
    );
    assert_eq!(finite_range(&[f64::NAN]), None);
    assert_eq!(finite_range(&[] as &[f64]), None);
}

#[test]
fn test_pad_range() {
    assert_eq!(pad_range((0.0, 10.0), 0.1), (-1.0, 11.0));
    assert_eq!(pad_range((5.0, 5.0), 0.1), (4.0, 6.0));
}

#[test]
fn test_usable_runs() {
    let x = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
    let y = [1.0, f64::NAN, 2.0, 3.0, f64::NAN, f64::NAN];
    let runs = usable_runs(&x, &y, f64::is_finite);
    assert_eq!(runs, vec![vec![(0.0, 1.0)], vec![(2.0, 2.0), (3.0, 3.0)]]);

    let y = [1.0, 0.0, 2.0, -1.0, 4.0, 5.0];
    let runs = usable_runs(&x, &y, |l| l > 0.0);
    assert_eq!(runs.len(), 3);
    assert_eq!(runs[2], vec![(4.0, 4.0), (5.0, 5.0)]);
}

fn assert_pieces_eq(got: &[Vec<(f64, f64)>], expected: &[Vec<(f64, f64)>]) {
    assert_eq!(got.len(), expected.len());
    for (g, e) in got.iter().zip(expected) {
        assert_eq!(g.len(), e.len());
        for (g, e) in g.iter().zip(e) {
            assert_abs_diff_eq!(g.0, e.0, epsilon = 1e-12);
            assert_abs_diff_eq!(g.1, e.1, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_styled_pieces() {
    let points = [(0.0, 0.0), (10.0, 10.0), (20.0, 0.0)];
    assert_eq!(styled_pieces(&points, LineStyle::Solid), vec![points.to_vec()]);
    assert_eq!(styled_pieces(&points, LineStyle::Dotted).len(), 3);

    assert_pieces_eq(
        &styled_pieces(&points, LineStyle::Dashed),
        &[
            vec![(0.0, 0.0), (6.0, 6.0)],
            vec![(10.0, 10.0), (16.0, 4.0)],
        ],
    );
    assert_pieces_eq(
        &styled_pieces(&points, LineStyle::DashDot),
        &[
            vec![(0.0, 0.0), (5.0, 5.0)],
            vec![(7.0, 7.0), (7.5, 7.5)],
            vec![(10.0, 10.0), (15.0, 5.0)],
            vec![(17.0, 3.0), (17.5, 2.5)],
        ],
    );
    assert!(styled_pieces(&points[..1], LineStyle::Dashed).is_empty());
}

#[test]
fn test_cell_edges() {
    assert_eq!(cell_edges(&[1.0, 2.0, 4.0]), vec![0.5, 1.5, 3.0, 5.0]);
    assert_eq!(cell_edges(&[3.0]), vec![2.5, 3.5]);
    assert!(cell_edges(&[]).is_empty());
}

#[test]
fn test_viridis() {
    assert_eq!(viridis(0.0), (68, 1, 84));
    assert_eq!(viridis(1.0), (253, 231, 37));
    assert_eq!(viridis(0.5), (33, 145, 140));
    // Out of range values are clamped.
    assert_eq!(viridis(-3.0), viridis(0.0));
    assert_eq!(viridis(7.0), viridis(1.0));
    assert_eq!(viridis(f64::NAN), viridis(0.0));
    let (r, _, _) = viridis(0.125);
    assert_abs_diff_eq!(r as f64, (68.0 + 59.0) / 2.0, epsilon = 1.0);
}

#[test]
fn test_lightcurve_band_colours() {
    assert_eq!(MODEL_LIGHTCURVE_BANDS[0], (BandName::G, PlotColour::Yellow));
    assert_eq!(MODEL_LIGHTCURVE_BANDS[4], (BandName::Y, PlotColour::Black));
    assert_eq!(KILONOVA_LIGHTCURVE_BANDS[0], (BandName::U, PlotColour::Red));
    assert_eq!(PlotColour::Blue.rgb(), (0, 0, 255));
}

#[cfg(not(feature = "plotting"))]
#[test]
fn test_plotting_needs_feature() {
    let result = plot_lbol(Path::new("lbol.png"), &[1.0], &[1e40]);
    assert!(matches!(result, Err(DrawError::NoPlottingFeature)));
}
