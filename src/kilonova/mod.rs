// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parameterised kilonova lightcurves. The ejecta are either given directly
//! (mass and velocity) or derived from the binary's component masses and the
//! neutron-star equation of state.

pub mod ejecta;
mod metzger;

pub use metzger::Me2017;

use std::collections::BTreeMap;

use itertools::Itertools;
use log::debug;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::{
    constants::DEFAULT_TEMPERATURE_FLOOR, conversions::Eos, filters::FilterSet,
    lightcurve::Lightcurve,
};

lazy_static::lazy_static! {
    pub static ref KILONOVA_MODELS_COMMA_SEPARATED: String = KilonovaModel::iter().join(", ");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
pub enum KilonovaModel {
    /// Kawaguchi et al. (2016); black hole-neutron star mergers.
    KaKy2016,

    /// Dietrich and Ujevic (2017)
    DiUj2017,

    /// Metzger (2017)
    Me2017,

    /// Smartt et al. (2017)
    SmCh2017,

    /// Wollaeger et al. (2017)
    WoKo2017,

    /// SALT2 supernova lightcurves.
    #[strum(serialize = "SN")]
    Sn,

    /// BOXFit gamma-ray burst afterglows.
    Afterglow,
}

impl KilonovaModel {
    /// Can this model be evaluated without an external simulation code?
    pub fn is_builtin(self) -> bool {
        matches!(self, KilonovaModel::Me2017)
    }
}

/// How the ejecta of a kilonova are specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EjectaSource {
    /// The ejecta mass and velocity are given directly.
    Ejecta,

    /// The ejecta are derived from the component masses.
    Masses,
}

/// Every input of a parameterised kilonova run. Units are solar masses,
/// fractions of c, days, and CGS otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct KilonovaParams {
    pub eos: Eos,
    pub q: f64,
    pub chi_eff: f64,
    pub mej: f64,
    pub vej: f64,
    pub m1: f64,
    pub m2: f64,
    pub theta_0: f64,
    pub e: f64,
    pub n: f64,
    pub theta_obs: f64,
    pub beta: f64,
    pub kappa_r: f64,
    pub slope_r: f64,
    pub tini: f64,
    pub tmax: f64,
    pub dt: f64,
    pub vmin: f64,
    pub th: f64,
    pub ph: f64,
    pub kappa: f64,
    pub eps: f64,
    pub alp: f64,
    pub eth: f64,
    pub flgbct: f64,
    pub temperature_floor: f64,
}

impl Default for KilonovaParams {
    #[allow(clippy::approx_constant)]
    fn default() -> Self {
        KilonovaParams {
            eos: Eos::H4,
            q: 3.0,
            chi_eff: 0.1,
            mej: 0.005,
            vej: 0.2,
            m1: 1.35,
            m2: 1.35,
            theta_0: 0.1,
            e: 1e53,
            n: 1.0,
            theta_obs: 0.0,
            beta: 3.0,
            kappa_r: 0.1,
            slope_r: -1.2,
            tini: 0.1,
            tmax: 14.0,
            dt: 0.1,
            vmin: 0.02,
            th: 0.2,
            ph: 3.14,
            kappa: 10.0,
            eps: 1.58e10,
            alp: 1.2,
            eth: 0.5,
            flgbct: 1.0,
            temperature_floor: DEFAULT_TEMPERATURE_FLOOR,
        }
    }
}

impl KilonovaParams {
    /// All parameters by name, as a model sample. Both components share the
    /// compactness and baryonic mass of the equation of state.
    pub fn sample_table(&self) -> BTreeMap<&'static str, f64> {
        let c = self.eos.compactness();
        let mb = self.eos.baryonic_mass();
        BTreeMap::from([
            ("tini", self.tini),
            ("tmax", self.tmax),
            ("dt", self.dt),
            ("vmin", self.vmin),
            ("th", self.th),
            ("ph", self.ph),
            ("kappa", self.kappa),
            ("eps", self.eps),
            ("alp", self.alp),
            ("eth", self.eth),
            ("flgbct", self.flgbct),
            ("beta", self.beta),
            ("kappa_r", self.kappa_r),
            ("slope_r", self.slope_r),
            ("m1", self.m1),
            ("m2", self.m2),
            ("q", self.q),
            ("chi_eff", self.chi_eff),
            ("mej", self.mej),
            ("vej", self.vej),
            ("theta_0", self.theta_0),
            ("E", self.e),
            ("n", self.n),
            ("theta_obs", self.theta_obs),
            ("c1", c),
            ("c2", c),
            ("mb1", mb),
            ("mb2", mb),
        ])
    }

    /// The ejecta mass [solar masses] and velocity [c].
    pub fn ejecta(&self, source: EjectaSource) -> (f64, f64) {
        match source {
            EjectaSource::Ejecta => (self.mej, self.vej),
            EjectaSource::Masses => {
                let c = self.eos.compactness();
                let mb = self.eos.baryonic_mass();
                let mej = ejecta::ejecta_mass(self.m1, mb, c, self.m2, mb, c);
                let vej = ejecta::ejecta_velocity(self.m1, c, self.m2, c);
                (mej, vej)
            }
        }
    }

    /// The times that the lightcurve is evaluated at [days].
    pub fn times(&self) -> Result<Vec<f64>, KilonovaError> {
        time_grid(self.tini, self.tmax, self.dt)
    }
}

/// The most epochs a kilonova lightcurve may have.
pub const MAX_EPOCHS: usize = 1_000_000;

/// `tini`, `tini + dt`, ... up to (and including, within rounding) `tmax`.
pub fn time_grid(tini: f64, tmax: f64, dt: f64) -> Result<Vec<f64>, KilonovaError> {
    if !(tini > 0.0) {
        return Err(KilonovaError::NonPositive {
            name: "tini",
            value: tini,
        });
    }
    if !(dt > 0.0) {
        return Err(KilonovaError::NonPositive {
            name: "dt",
            value: dt,
        });
    }
    if !tmax.is_finite() || !(tmax >= tini) {
        return Err(KilonovaError::TimeRange { tini, tmax });
    }

    let steps = ((tmax - tini) / dt).round();
    if !(steps < MAX_EPOCHS as f64) {
        return Err(KilonovaError::TooManyEpochs {
            tini,
            tmax,
            dt,
            max: MAX_EPOCHS,
        });
    }
    let n = steps as usize + 1;
    Ok((0..n).map(|i| tini + i as f64 * dt).collect())
}

/// The name of a run's output files.
pub fn output_name(
    model: KilonovaModel,
    source: EjectaSource,
    params: &KilonovaParams,
) -> String {
    match source {
        EjectaSource::Ejecta => format!(
            "{model}_{}M{:03}V{:02}",
            params.eos,
            (params.mej * 1000.0).trunc() as i64,
            (params.vej * 100.0).trunc() as i64
        ),
        EjectaSource::Masses => format!(
            "{}M{:.0}m{:.0}",
            params.eos,
            params.m1 * 100.0,
            params.m2 * 100.0
        ),
    }
}

/// Generate the lightcurve of a parameterised kilonova.
pub fn lightcurve(
    model: KilonovaModel,
    source: EjectaSource,
    params: &KilonovaParams,
    filters: &FilterSet,
) -> Result<Lightcurve, KilonovaError> {
    if !model.is_builtin() {
        return Err(KilonovaError::RequiresExternal(model));
    }

    let (mej, vej) = params.ejecta(source);
    debug!("Ejecta: mass {mej:.5} Msun, velocity {vej:.4} c");
    if mej == 0.0 {
        // The ejecta fits can predict that nothing is ejected.
        return Err(KilonovaError::NoLuminosity);
    }
    let me2017 = Me2017 {
        mej,
        vej,
        vmin: params.vmin,
        beta: params.beta,
        kappa_r: params.kappa_r,
        eps: params.eps,
        alp: params.alp,
        eth: params.eth,
        temperature_floor: params.temperature_floor,
    };
    let lc = me2017.lightcurve(&params.times()?, filters)?;

    if lc.total_lbol() == 0.0 {
        return Err(KilonovaError::NoLuminosity);
    }
    Ok(lc)
}

#[derive(Error, Debug)]
pub enum KilonovaError {
    #[error("Model '{0}' requires an external model code, which isn't available; only Me2017 lightcurves can be generated")]
    RequiresExternal(KilonovaModel),

    #[error("No luminosity...")]
    NoLuminosity,

    #[error("'{name}' must be positive, but is {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("The maximum time ({tmax} days) must be finite and not before the initial time ({tini} days)")]
    TimeRange { tini: f64, tmax: f64 },

    #[error("{tini} to {tmax} days in steps of {dt} days needs more than {max} epochs")]
    TooManyEpochs {
        tini: f64,
        tmax: f64,
        dt: f64,
        max: usize,
    },

    #[error("The ejecta velocity ({vej} c) must be larger than the minimum velocity ({vmin} c)")]
    VelocityRange { vmin: f64, vej: f64 },
}
