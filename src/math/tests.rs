// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;

use super::*;

#[test]
fn test_interp_inside_and_clamped() {
    let xp = [1.0, 2.0, 4.0];
    let fp = [10.0, 20.0, 0.0];
    assert_abs_diff_eq!(interp(1.5, &xp, &fp).unwrap(), 15.0);
    assert_abs_diff_eq!(interp(3.0, &xp, &fp).unwrap(), 10.0);
    // Exactly on a knot.
    assert_abs_diff_eq!(interp(2.0, &xp, &fp).unwrap(), 20.0);
    // Clamped at both ends.
    assert_abs_diff_eq!(interp(-100.0, &xp, &fp).unwrap(), 10.0);
    assert_abs_diff_eq!(interp(100.0, &xp, &fp).unwrap(), 0.0);
}

#[test]
fn test_interp_nan_and_errors() {
    assert!(interp(f64::NAN, &[0.0, 1.0], &[0.0, 1.0]).unwrap().is_nan());
    assert_eq!(interp(0.5, &[], &[]), Err(MathError::Empty));
    assert_eq!(
        interp(0.5, &[0.0, 1.0], &[0.0]),
        Err(MathError::LengthMismatch { x: 2, y: 1 })
    );
}

#[test]
fn test_easyint_unsorted_input() {
    // Deliberately unsorted; y = 2x.
    let x = [3.0, 1.0, 2.0];
    let y = [6.0, 2.0, 4.0];
    let result = easyint(&x, &y, &[1.5, 2.5]).unwrap();
    assert_abs_diff_eq!(result[0], 3.0);
    assert_abs_diff_eq!(result[1], 5.0);
}

#[test]
fn test_easyint_out_of_range_uses_input_order() {
    // Outside of the range, the first and last values *as given* are used,
    // not the values at the smallest and largest x.
    let x = [3.0, 1.0, 2.0];
    let y = [6.0, 2.0, 4.0];
    let result = easyint(&x, &y, &[0.0, 10.0]).unwrap();
    assert_abs_diff_eq!(result[0], 6.0);
    assert_abs_diff_eq!(result[1], 4.0);
}

#[test]
fn test_trapz() {
    let x = linspace(0.0, 1.0, 101);
    let y: Vec<f64> = x.iter().map(|x| x * x).collect();
    assert_abs_diff_eq!(trapz(&y, &x), 1.0 / 3.0, epsilon = 1e-4);

    // Linear functions are integrated exactly.
    let y: Vec<f64> = x.iter().map(|x| 3.0 * x + 1.0).collect();
    assert_abs_diff_eq!(trapz(&y, &x), 2.5, epsilon = 1e-12);

    assert_abs_diff_eq!(trapz(&[1.0], &[1.0]), 0.0);
    assert_abs_diff_eq!(trapz(&[], &[]), 0.0);
}

#[test]
fn test_trapz_descending_x_is_negative() {
    assert_abs_diff_eq!(trapz(&[1.0, 1.0], &[2.0, 0.0]), -2.0);
}

#[test]
fn test_linspace() {
    assert!(linspace(0.0, 1.0, 0).is_empty());
    assert_eq!(linspace(3.0, 5.0, 1), vec![3.0]);
    let v = linspace(-3.0, 0.0, 25);
    assert_eq!(v.len(), 25);
    assert_abs_diff_eq!(v[0], -3.0);
    assert_abs_diff_eq!(v[1], -2.875);
    assert_eq!(v[24], 0.0);
}

#[test]
fn test_histogram_density_last_bin_is_closed() {
    // 2 of 5 samples in [0, 1), 3 of 5 in [1, 2].
    let hist = histogram_density(&[0.0, 0.5, 1.0, 1.0, 2.0], &[0.0, 1.0, 2.0]).unwrap();
    assert_abs_diff_eq!(hist[0], 0.4);
    assert_abs_diff_eq!(hist[1], 0.6);
}

#[test]
fn test_histogram_density_ignores_out_of_range() {
    let hist = histogram_density(&[-1.0, 0.25, 0.75, 5.0, f64::NAN], &[0.0, 0.5, 1.0]).unwrap();
    assert_abs_diff_eq!(hist[0], 1.0);
    assert_abs_diff_eq!(hist[1], 1.0);
}

#[test]
fn test_histogram_density_no_samples_in_range() {
    let hist = histogram_density(&[5.0], &[0.0, 1.0]).unwrap();
    assert!(hist[0].is_nan());
    assert_eq!(
        histogram_density(&[0.0], &[0.0]),
        Err(MathError::TooFewEdges(1))
    );
}

#[test]
fn test_hist_results_fills_empty_bins() {
    let samples = [0.1, 0.2, 0.3];
    let (centres, hist) = hist_results(&samples, 5, Some((0.0, 1.0))).unwrap();
    assert_eq!(centres.len(), 4);
    assert_abs_diff_eq!(centres[0], 0.125);
    assert_abs_diff_eq!(centres[3], 0.875);
    // 2 samples in the first bin, 1 in the second, none elsewhere.
    assert_abs_diff_eq!(hist[0], 2.0 / 3.0 / 0.25);
    assert_abs_diff_eq!(hist[1], 1.0 / 3.0 / 0.25);
    assert_abs_diff_eq!(hist[2], 1e-3);
    assert_abs_diff_eq!(hist[3], 1e-3);

    // The density integrates to 1 (ignoring the padding).
    let area: f64 = hist[..2].iter().map(|h| h * 0.25).sum();
    assert_abs_diff_eq!(area, 1.0, epsilon = 1e-12);
}

#[test]
fn test_hist_results_default_bounds() {
    let samples = [2.0, f64::NAN, 4.0, 3.0];
    let (centres, _) = hist_results(&samples, 3, None).unwrap();
    assert_abs_diff_eq!(centres[0], 2.5);
    assert_abs_diff_eq!(centres[1], 3.5);

    assert_eq!(hist_results(&[], 3, None), Err(MathError::Empty));
}
