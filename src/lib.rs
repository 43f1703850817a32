// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Lightcurves of the electromagnetic counterparts of gravitational-wave
//! events. Tabulated kilonova models are integrated through passbands, and
//! parameterised kilonovae are generated from their ejecta. Posteriors of
//! parameter-estimation runs can be histogrammed too.

mod cli;
pub mod constants;
pub mod conversions;
pub mod filters;
pub mod io;
pub mod kilonova;
pub mod lightcurve;
pub mod math;
pub mod models;
mod params;
pub mod plotting;
pub mod posterior;

use crossbeam_utils::atomic::AtomicCell;

/// Should progress bars be drawn?
pub(crate) static PROGRESS_BARS: AtomicCell<bool> = AtomicCell::new(false);

// Re-exports.
pub use cli::{Gwem, GwemError};
