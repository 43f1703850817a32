// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use approx::assert_abs_diff_eq;

use super::*;

#[test]
fn test_q2eta() {
    assert_abs_diff_eq!(q2eta(1.0), 0.25);
    assert_abs_diff_eq!(q2eta(3.0), 3.0 / 16.0);
}

#[test]
fn test_ms2mc_equal_masses() {
    let (mchirp, eta, q) = ms2mc(1.35, 1.35);
    // For equal masses, mchirp = m * 2^(-1/5).
    assert_abs_diff_eq!(mchirp, 1.35 * 2.0_f64.powf(-0.2), epsilon = 1e-12);
    assert_abs_diff_eq!(eta, 0.25);
    assert_abs_diff_eq!(q, 1.0);
}

#[test]
fn test_ms2mc_gw170817_like() {
    let (mchirp, eta, q) = ms2mc(1.46, 1.27);
    assert_abs_diff_eq!(mchirp, 1.18484, epsilon = 1e-5);
    assert_abs_diff_eq!(eta, 0.248789, epsilon = 1e-6);
    assert_abs_diff_eq!(q, 1.27 / 1.46);
}

#[test]
fn test_mc2ms_inverts_ms2mc() {
    for (m1, m2) in [(1.35, 1.35), (1.6, 1.2), (7.0, 1.4)] {
        let (mchirp, eta, _) = ms2mc(m1, m2);
        let (m1_back, m2_back) = mc2ms(mchirp, eta).unwrap();
        assert_abs_diff_eq!(m1_back, m1, epsilon = 1e-9);
        assert_abs_diff_eq!(m2_back, m2, epsilon = 1e-9);
    }
}

#[test]
fn test_mc2ms_orders_masses() {
    // Swapped input order still gives m1 >= m2.
    let (mchirp, eta, _) = ms2mc(1.2, 1.6);
    let (m1, m2) = mc2ms(mchirp, eta).unwrap();
    assert!(m1 >= m2);
    assert_abs_diff_eq!(m1, 1.6, epsilon = 1e-9);
}

#[test]
fn test_mc2ms_bad_eta() {
    assert_eq!(mc2ms(1.2, 0.3), Err(ConversionError::BadEta(0.3)));
    assert_eq!(mc2ms(1.2, 0.0), Err(ConversionError::BadEta(0.0)));
    assert!(mc2ms(1.2, f64::NAN).is_err());
}

#[test]
fn test_eos_table() {
    let eos = Eos::from_str("H4").unwrap();
    assert_eq!(eos, Eos::H4);
    assert_abs_diff_eq!(eos.compactness(), 0.147);
    assert_abs_diff_eq!(eos.baryonic_mass(), 1.47);
    assert_eq!(Eos::Apr4.to_string(), "APR4");
    assert!(Eos::from_str("SLy").is_err());
}
