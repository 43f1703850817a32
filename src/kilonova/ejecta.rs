// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Dynamical ejecta properties of binary neutron star mergers, from the
//! numerical-relativity fits of Dietrich & Ujevic (2017).
//!
//! `m*` are gravitational masses and `mb*` baryonic masses [solar masses];
//! `c*` are compactnesses.

/// The dynamical ejecta mass [solar masses]. Never negative.
pub fn ejecta_mass(m1: f64, mb1: f64, c1: f64, m2: f64, mb2: f64, c2: f64) -> f64 {
    const A: f64 = -1.35695;
    const B: f64 = 6.11252;
    const C: f64 = -49.43355;
    const D: f64 = 16.1144;
    const N: f64 = -2.5484;

    let compactness_term = (mb1 * (m2 / m1).cbrt() * (1.0 - 2.0 * c1) / c1
        + mb2 * (m1 / m2).cbrt() * (1.0 - 2.0 * c2) / c2)
        * A;
    let ratio_term = (mb1 * (m2 / m1).powf(N) + mb2 * (m1 / m2).powf(N)) * B;
    let binding_term = (mb1 * (1.0 - m1 / mb1) + mb2 * (1.0 - m2 / mb2)) * C;

    // The fit is in units of 1e-3 solar masses.
    (compactness_term + ratio_term + binding_term + D).max(0.0) / 1000.0
}

fn velocity_fit(a: f64, b: f64, c: f64, m1: f64, c1: f64, m2: f64, c2: f64) -> f64 {
    ((m1 / m2) * (1.0 + c * c1) + (m2 / m1) * (1.0 + c * c2)) * a + b
}

/// The ejecta velocity in the orbital plane [c].
pub fn ejecta_vrho(m1: f64, c1: f64, m2: f64, c2: f64) -> f64 {
    velocity_fit(-0.219479, 0.444836, -2.67385, m1, c1, m2, c2)
}

/// The ejecta velocity perpendicular to the orbital plane [c].
pub fn ejecta_vz(m1: f64, c1: f64, m2: f64, c2: f64) -> f64 {
    velocity_fit(-0.315585, 0.63808, -1.00757, m1, c1, m2, c2)
}

/// The total ejecta velocity [c].
pub fn ejecta_velocity(m1: f64, c1: f64, m2: f64, c2: f64) -> f64 {
    ejecta_vrho(m1, c1, m2, c2).hypot(ejecta_vz(m1, c1, m2, c2))
}
