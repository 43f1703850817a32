// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A radioactively-heated, multi-shell kilonova model, after Metzger (2017).
//!
//! The ejecta are split into shells of increasing velocity with a power-law
//! mass distribution. Each shell is heated by r-process decay, cools
//! adiabatically and radiates on its diffusion (or light-crossing) time. The
//! emission is treated as a blackbody from the shell where the ejecta become
//! optically thick.

use log::trace;
use ndarray::prelude::*;

use super::KilonovaError;
use crate::{
    constants::{
        ANGSTROM_CM, BOLTZMANN, DAY_S, DIFFUSION_BETA, NUM_EJECTA_SHELLS, PI, PLANCK,
        SOLAR_MASS_G, SPEED_OF_LIGHT_CGS, STEFAN_BOLTZMANN, TEN_PC_CM,
    },
    filters::FilterSet,
    lightcurve::Lightcurve,
    math::linspace,
};

/// The time that the shells start with no thermal energy [days].
const START_TIME_DAYS: f64 = 1e-3;

/// The largest ratio between consecutive integration times.
const MAX_STEP_RATIO: f64 = 1.01;

/// Physical parameters of the ejecta.
#[derive(Debug, Clone, PartialEq)]
pub struct Me2017 {
    /// Total ejecta mass [solar masses].
    pub mej: f64,

    /// Velocity of the fastest ejecta [c].
    pub vej: f64,

    /// Velocity of the slowest ejecta [c].
    pub vmin: f64,

    /// Power-law index of the mass above a velocity, `M(>v) ~ v^-beta`.
    pub beta: f64,

    /// Grey opacity [cm^2/g].
    pub kappa_r: f64,

    /// Radioactive heating rate at 1 day [erg/g/s].
    pub eps: f64,

    /// Power-law index of the heating rate in time.
    pub alp: f64,

    /// Thermalisation efficiency.
    pub eth: f64,

    /// Photospheric temperature floor [K].
    pub temperature_floor: f64,
}

/// The ejecta, discretised into shells.
struct Shells {
    /// [cm/s]
    velocity: Vec<f64>,

    /// [g]
    mass: Vec<f64>,

    /// The mass at and above each shell [g].
    mass_above: Vec<f64>,
}

impl Me2017 {
    fn validate(&self) -> Result<(), KilonovaError> {
        if !(self.mej > 0.0) {
            return Err(KilonovaError::NonPositive {
                name: "mej",
                value: self.mej,
            });
        }
        if !(self.vmin > 0.0) {
            return Err(KilonovaError::NonPositive {
                name: "vmin",
                value: self.vmin,
            });
        }
        if !(self.kappa_r > 0.0) {
            return Err(KilonovaError::NonPositive {
                name: "kappa_r",
                value: self.kappa_r,
            });
        }
        if !(self.vej > self.vmin) {
            return Err(KilonovaError::VelocityRange {
                vmin: self.vmin,
                vej: self.vej,
            });
        }
        Ok(())
    }

    fn shells(&self) -> Shells {
        let edges = linspace(self.vmin, self.vej, NUM_EJECTA_SHELLS + 1);
        let total = self.mej * SOLAR_MASS_G;
        let outer = (self.vej / self.vmin).powf(-self.beta);
        // M(>v), normalised so that M(>vmin) is the total mass and M(>vej) is
        // zero.
        let above = |v: f64| total * ((v / self.vmin).powf(-self.beta) - outer) / (1.0 - outer);

        let mut velocity = Vec::with_capacity(NUM_EJECTA_SHELLS);
        let mut mass = Vec::with_capacity(NUM_EJECTA_SHELLS);
        let mut mass_above = Vec::with_capacity(NUM_EJECTA_SHELLS);
        for e in edges.windows(2) {
            velocity.push(e[0] * SPEED_OF_LIGHT_CGS);
            mass.push(above(e[0]) - above(e[1]));
            mass_above.push(above(e[0]));
        }
        Shells {
            velocity,
            mass,
            mass_above,
        }
    }

    /// Heating rate per gram at time `t` [s].
    fn heating(&self, t: f64) -> f64 {
        self.eth * self.eps * (t / DAY_S).powf(-self.alp)
    }

    /// The time it takes for the energy of a shell to leave it, at time `t`
    /// [s]: the diffusion time plus the light-crossing time.
    fn escape_time(&self, v: f64, mass_above: f64, t: f64) -> f64 {
        let diffusion = 3.0 * self.kappa_r * mass_above
            / (4.0 * PI * DIFFUSION_BETA * SPEED_OF_LIGHT_CGS * v * t);
        let light_crossing = v * t / SPEED_OF_LIGHT_CGS;
        diffusion + light_crossing
    }

    /// Evaluate the bolometric luminosity and the magnitudes in each band at
    /// each of `times` [days], which must be positive and ascending.
    pub fn lightcurve(
        &self,
        times: &[f64],
        filters: &FilterSet,
    ) -> Result<Lightcurve, KilonovaError> {
        self.validate()?;
        let shells = self.shells();
        let num_bands = filters.iter().count();

        let mut energy = vec![0.0; NUM_EJECTA_SHELLS];
        let mut t_now = START_TIME_DAYS * DAY_S;
        let mut lbol = Vec::with_capacity(times.len());
        let mut mags = Array2::from_elem((times.len(), num_bands), f64::NAN);

        for (i_time, &t_days) in times.iter().enumerate() {
            let t_target = t_days * DAY_S;
            if !(t_target > 0.0) {
                return Err(KilonovaError::NonPositive {
                    name: "time",
                    value: t_days,
                });
            }

            // Implicit Euler steps, logarithmically spaced, up to the target.
            while t_now < t_target {
                let t_next = (t_now * MAX_STEP_RATIO).min(t_target);
                let dt = t_next - t_now;
                let q = self.heating(t_next);
                for (((e, &v), &m), &m_above) in energy
                    .iter_mut()
                    .zip(shells.velocity.iter())
                    .zip(shells.mass.iter())
                    .zip(shells.mass_above.iter())
                {
                    let t_esc = self.escape_time(v, m_above, t_next);
                    *e = (*e + dt * m * q) / (1.0 + dt / t_next + dt / t_esc);
                }
                t_now = t_next;
            }

            let l: f64 = energy
                .iter()
                .zip(shells.velocity.iter())
                .zip(shells.mass_above.iter())
                .map(|((e, &v), &m_above)| e / self.escape_time(v, m_above, t_now))
                .sum();
            lbol.push(l);

            let (temperature, radius) = self.photosphere(&shells, l, t_now);
            trace!("t = {t_days:.3} d: L = {l:.3e} erg/s, T = {temperature:.0} K, R = {radius:.3e} cm");
            for (band, mag) in filters.iter().zip(mags.row_mut(i_time).iter_mut()) {
                let flux: Vec<f64> = band
                    .wavelength
                    .iter()
                    .map(|&w| blackbody_flux_at_10pc(w, temperature, radius))
                    .collect();
                *mag = band.mag_from_sampled_flux(&flux);
            }
        }

        Ok(Lightcurve {
            t: times.to_vec(),
            mags,
            lbol,
        })
    }

    /// The effective temperature [K] and radius [cm] of the photosphere.
    fn photosphere(&self, shells: &Shells, l: f64, t: f64) -> (f64, f64) {
        // The outermost shell that is optically thick. If none are, the
        // innermost shell is used.
        let v_ph = shells
            .velocity
            .iter()
            .zip(shells.mass_above.iter())
            .rev()
            .find(|&(&v, &m_above)| {
                let r = v * t;
                self.kappa_r * m_above / (4.0 * PI * r * r) >= 1.0
            })
            .map(|(&v, _)| v)
            .unwrap_or(shells.velocity[0]);

        let mut radius = v_ph * t;
        let mut temperature = (l / (4.0 * PI * STEFAN_BOLTZMANN * radius * radius)).powf(0.25);
        if temperature < self.temperature_floor {
            temperature = self.temperature_floor;
            radius = (l / (4.0 * PI * STEFAN_BOLTZMANN * temperature.powi(4))).sqrt();
        }
        (temperature, radius)
    }
}

/// The flux density [erg/s/cm^2/A] at 10 pc of a spherical blackbody with
/// temperature `temperature` [K] and radius `radius` [cm], at wavelength
/// `wavelength` [A].
pub(super) fn blackbody_flux_at_10pc(wavelength: f64, temperature: f64, radius: f64) -> f64 {
    let lambda = wavelength * ANGSTROM_CM;
    let x = PLANCK * SPEED_OF_LIGHT_CGS / (lambda * BOLTZMANN * temperature);
    // Spectral radiance per cm.
    let b = 2.0 * PLANCK * SPEED_OF_LIGHT_CGS * SPEED_OF_LIGHT_CGS / lambda.powi(5) / x.exp_m1();
    let dilution = (radius / TEN_PC_CM).powi(2);
    PI * b * dilution * ANGSTROM_CM
}
