//! Sensor subsystem — acquisition drivers and the sampling policy.
//!
//! The [`SensorSampler`] is the domain-side policy: it gates acquisition
//! to the sensor cadence, enforces last-known-good retention, and keeps
//! the climate pair atomic (both fields update or neither does). The
//! `climate` and `range` submodules are the hardware drivers behind the
//! [`SensorPort`] boundary.

pub mod climate;
pub mod range;

use crate::app::ports::SensorPort;
use crate::error::SensorError;
use crate::fsm::context::SensorReadings;
use crate::timing::Cadence;
use log::warn;

/// Cadence-gated sampling with last-known-good retention.
pub struct SensorSampler {
    cadence: Cadence,
    /// Distance readings beyond this are discarded as noise (cm).
    max_distance_cm: f32,
}

impl SensorSampler {
    pub fn new(poll_interval_ms: u32, max_distance_cm: f32) -> Self {
        Self {
            cadence: Cadence::new(poll_interval_ms),
            max_distance_cm,
        }
    }

    /// Run one sampling pass if the cadence is due.
    ///
    /// Returns `true` when a pass ran (fresh values may be in `readings`),
    /// `false` when the cadence was not yet eligible. A failed acquisition
    /// never overwrites a previously valid field.
    pub fn tick(
        &mut self,
        now_ms: u32,
        port: &mut impl SensorPort,
        readings: &mut SensorReadings,
    ) -> bool {
        if !self.cadence.ready(now_ms) {
            return false;
        }

        // Climate pair: both-or-none, so temperature and humidity always
        // come from the same acquisition.
        match port.read_climate() {
            Some((temperature_c, humidity_pct)) => {
                readings.temperature_c = temperature_c;
                readings.humidity_pct = humidity_pct;
            }
            None => warn!("{}, keeping last values", SensorError::ClimateReadFailed),
        }

        // Distance: bounded-timeout echo, range-checked.
        match port.measure_distance_cm() {
            Some(d) if d > 0.0 && d <= self.max_distance_cm => {
                readings.distance_cm = d;
            }
            Some(d) => warn!("{}: {:.0} cm discarded", SensorError::OutOfRange, d),
            None => warn!("{}, keeping last value", SensorError::EchoTimeout),
        }

        true
    }
}
