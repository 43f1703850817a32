// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Some helper mathematics for sampled data.

#[cfg(test)]
mod tests;

use thiserror::Error;

/// One-dimensional piecewise-linear interpolation. `xp` must be ascending. Values of `x` outside of `xp` are
/// clamped to the first or last value of `fp`.
///
/// # Examples
///
/// `assert_abs_diff_eq!(interp(1.5, &[1.0, 2.0], &[10.0, 20.0])?, 15.0);`
pub fn interp(x: f64, xp: &[f64], fp: &[f64]) -> Result<f64, MathError> {
    check_lengths(xp, fp)?;
    Ok(interp_unchecked(x, xp, fp))
}

/// The same as [`interp`], but the caller has already verified that `xp` and
/// `fp` are non-empty and have equal lengths.
fn interp_unchecked(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }

    let last = xp.len() - 1;
    if x <= xp[0] {
        return fp[0];
    }
    if x >= xp[last] {
        return fp[last];
    }

    // `x` is strictly between the end points, so `j` is in 1..=last.
    let j = xp.partition_point(|&v| v <= x);
    let i = j - 1;
    let slope = (fp[j] - fp[i]) / (xp[j] - xp[i]);
    fp[i] + slope * (x - xp[i])
}

/// Interpolate `(x, y)` onto `xref`. The input doesn't need to be sorted.
/// Reference points inside the range of `x` are linearly interpolated. Points
/// below the range take the *first* value of `y` and points above it take the
/// *last* value of `y`, in the order the input was given.
pub fn easyint(x: &[f64], y: &[f64], xref: &[f64]) -> Result<Vec<f64>, MathError> {
    check_lengths(x, y)?;

    let mut order: Vec<usize> = (0..x.len()).collect();
    order.sort_by(|&a, &b| x[a].total_cmp(&x[b]));
    let x_sorted: Vec<f64> = order.iter().map(|&i| x[i]).collect();
    let y_sorted: Vec<f64> = order.iter().map(|&i| y[i]).collect();

    let x_min = x_sorted[0];
    let x_max = x_sorted[x_sorted.len() - 1];
    let y_low = y[0];
    let y_up = y[y.len() - 1];

    Ok(xref
        .iter()
        .map(|&xr| {
            if xr < x_min {
                y_low
            } else if xr > x_max {
                y_up
            } else {
                interp_unchecked(xr, &x_sorted, &y_sorted)
            }
        })
        .collect())
}

/// Integrate `y` over `x` with the trapezoidal rule. Fewer than two points
/// integrate to 0.
pub fn trapz(y: &[f64], x: &[f64]) -> f64 {
    debug_assert_eq!(y.len(), x.len());
    x.windows(2)
        .zip(y.windows(2))
        .map(|(x, y)| (x[1] - x[0]) * (y[1] + y[0]) / 2.0)
        .sum()
}

/// `n` evenly-spaced values from `start` to `end`, inclusive of both.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut v: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            // Avoid any floating-point drift on the final edge.
            v[n - 1] = end;
            v
        }
    }
}

/// A probability-density histogram; the densities integrate to 1 over the
/// edges. All bins are half open, except the last, which also includes its right
/// edge. Samples outside of the edges (and NaNs) are ignored. If no samples
/// land in any bin, all densities are NaN.
pub fn histogram_density(samples: &[f64], edges: &[f64]) -> Result<Vec<f64>, MathError> {
    if edges.len() < 2 {
        return Err(MathError::TooFewEdges(edges.len()));
    }
    let num_bins = edges.len() - 1;
    let first = edges[0];
    let last = edges[num_bins];

    let mut counts = vec![0_usize; num_bins];
    for &s in samples {
        if !(first..=last).contains(&s) {
            continue;
        }
        let bin = (edges.partition_point(|&e| e <= s) - 1).min(num_bins - 1);
        counts[bin] += 1;
    }

    let total: usize = counts.iter().sum();
    Ok(counts
        .iter()
        .zip(edges.windows(2))
        .map(|(&c, e)| c as f64 / (e[1] - e[0]) / total as f64)
        .collect())
}

/// Histogram posterior samples for plotting. The bin edges are `num_edges`
/// evenly-spaced values across `bounds` (or the finite range of the samples if
/// no bounds are given). Empty bins are given a density of `1e-3` so they
/// remain visible on logarithmic axes.
///
/// Returns the bin centres and the densities.
pub fn hist_results(
    samples: &[f64],
    num_edges: usize,
    bounds: Option<(f64, f64)>,
) -> Result<(Vec<f64>, Vec<f64>), MathError> {
    let (lo, hi) = match bounds {
        Some(b) => b,
        None => samples
            .iter()
            .copied()
            .filter(|s| s.is_finite())
            .fold(None, |acc, s| match acc {
                None => Some((s, s)),
                Some((lo, hi)) => Some((f64::min(lo, s), f64::max(hi, s))),
            })
            .ok_or(MathError::Empty)?,
    };

    let edges = linspace(lo, hi, num_edges);
    let mut hist = histogram_density(samples, &edges)?;
    for h in hist.iter_mut() {
        if *h == 0.0 {
            *h = 1e-3;
        }
    }
    let centres = edges.windows(2).map(|e| (e[0] + e[1]) / 2.0).collect();

    Ok((centres, hist))
}

fn check_lengths(x: &[f64], y: &[f64]) -> Result<(), MathError> {
    if x.is_empty() {
        return Err(MathError::Empty);
    }
    if x.len() != y.len() {
        return Err(MathError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    Ok(())
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    #[error("Cannot work with an empty set of samples")]
    Empty,

    #[error("Sample coordinates ({x}) and values ({y}) have different lengths")]
    LengthMismatch { x: usize, y: usize },

    #[error("A histogram needs at least 2 bin edges, but {0} were given")]
    TooFewEdges(usize),
}
