// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All constants are CGS unless stated otherwise. All constants *must* be double
precision.
 */

pub use std::f64::consts::PI;

/// One parsec [m].
pub const PARSEC_M: f64 = 3.0857e16;

/// The distance at which absolute magnitudes are defined (10 pc) [cm].
pub const TEN_PC_CM: f64 = 10.0 * PARSEC_M * 100.0;

/// The distance the `ns_precursor` magnitude tables are tabulated at [pc].
pub const NS_PRECURSOR_DISTANCE_PC: f64 = 200e6;

/// The speed of light used to turn frequencies into wavelengths [m/s].
pub const SPEED_OF_LIGHT_M_S: f64 = 3e8;

/// The speed of light [cm/s].
pub const SPEED_OF_LIGHT_CGS: f64 = 2.99792458e10;

/// Seconds in a day.
pub const DAY_S: f64 = 24.0 * 3600.0;

/// Mass of the Sun [g].
pub const SOLAR_MASS_G: f64 = 1.989e33;

/// Stefan-Boltzmann constant [erg/s/cm^2/K^4].
pub const STEFAN_BOLTZMANN: f64 = 5.670374e-5;

/// Planck constant [erg s].
pub const PLANCK: f64 = 6.62607015e-27;

/// Boltzmann constant [erg/K].
pub const BOLTZMANN: f64 = 1.380649e-16;

/// Centimetres in an Angstrom.
pub const ANGSTROM_CM: f64 = 1e-8;

/// The AB magnitude zero point expressed as F_lambda * lambda^2
/// [erg/s/cm^2/A * A^2]. 3631 Jy multiplied by c in A/s.
pub const AB_ZERO_POINT_FLAM: f64 = 0.1089;

/// Frequencies of the `ns_precursor` magnitude columns [Hz].
pub const NS_PRECURSOR_FREQS_HZ: [f64; 4] = [1.2e15, 7.5e14, 4.46e14, 3.7e14];

/// Central wavelengths of the u g r i z y J H K bands [A].
pub const BAND_WAVELENGTHS_A: [f64; 9] = [
    3543.0, 4775.6, 6129.5, 7484.6, 8657.8, 9603.1, 12350.0, 16620.0, 21590.0,
];

/// `kilonova_wind_spectra` tables hold many wind configurations; only rows
/// with this value in their third column are used.
pub const KILONOVA_WIND_SELECTOR: f64 = 0.05;

/// Geometric factor in the radiative diffusion time of an expanding shell.
pub const DIFFUSION_BETA: f64 = 13.7;

/// Photospheric temperatures don't drop below this value [K].
pub const DEFAULT_TEMPERATURE_FLOOR: f64 = 4000.0;

/// The number of mass shells used to model kilonova ejecta.
pub const NUM_EJECTA_SHELLS: usize = 100;
