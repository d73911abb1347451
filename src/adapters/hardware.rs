//! Real-hardware adapter: the driver stack behind the port traits.
//!
//! [`GateHardware`] owns every physical driver and implements
//! [`SensorPort`] + [`ActuatorPort`] over them. This is the only place
//! where the domain's port vocabulary meets actual peripherals; the
//! service itself never sees a GPIO number.
//!
//! On the host the same struct runs against the drivers' simulation
//! statics, so integration-style tests can exercise the full stack.

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::config::GateConfig;
use crate::drivers::outputs::OutputBank;
use crate::drivers::servo::ServoDriver;
use crate::pins;
use crate::sensors::climate::ClimateSensor;
use crate::sensors::range::RangeSensor;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, Ordering};

/// Simulated button line level (true = HIGH = released).
#[cfg(not(target_os = "espidf"))]
static SIM_BUTTON_LEVEL: AtomicBool = AtomicBool::new(true);

/// Drive the simulated button line (host/test builds only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_button_level(high: bool) {
    SIM_BUTTON_LEVEL.store(high, Ordering::Relaxed);
}

pub struct GateHardware {
    climate: ClimateSensor,
    range: RangeSensor,
    servo: ServoDriver,
    outputs: OutputBank,
}

impl GateHardware {
    pub fn new(config: &GateConfig) -> Self {
        Self {
            climate: ClimateSensor::new(pins::DHT_GPIO),
            range: RangeSensor::new(pins::TRIG_GPIO, pins::ECHO_GPIO, config.echo_timeout_ms),
            servo: ServoDriver::new(),
            outputs: OutputBank::new(),
        }
    }

    pub fn servo(&self) -> &ServoDriver {
        &self.servo
    }

    pub fn outputs(&self) -> &OutputBank {
        &self.outputs
    }
}

impl SensorPort for GateHardware {
    fn read_climate(&mut self) -> Option<(f32, f32)> {
        self.climate
            .read()
            .map(|r| (r.temperature_c, r.humidity_pct))
    }

    fn measure_distance_cm(&mut self) -> Option<f32> {
        self.range.measure_cm()
    }

    #[cfg(target_os = "espidf")]
    fn read_button_raw(&mut self) -> bool {
        hw_init::gpio_read(pins::BUTTON_GPIO)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_button_raw(&mut self) -> bool {
        SIM_BUTTON_LEVEL.load(Ordering::Relaxed)
    }
}

impl ActuatorPort for GateHardware {
    fn set_servo_angle(&mut self, degrees: u8) {
        self.servo.set_angle(degrees);
    }

    fn set_indicator(&mut self, on: bool) {
        self.outputs.set_indicator(on);
    }

    fn set_guard(&mut self, on: bool) {
        self.outputs.set_guard(on);
    }

    fn set_alarm_line(&mut self, on: bool) {
        self.outputs.set_alarm_line(on);
    }

    fn start_tone(&mut self, freq_hz: u16) {
        self.outputs.start_tone(freq_hz);
    }

    fn stop_tone(&mut self) {
        self.outputs.stop_tone();
    }

    fn all_off(&mut self) {
        self.outputs.all_off();
    }
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;

    #[test]
    fn actuator_calls_reach_the_drivers() {
        let mut hw = GateHardware::new(&GateConfig::default());
        hw.set_servo_angle(90);
        hw.set_guard(true);
        hw.start_tone(2000);
        assert_eq!(hw.servo().current_angle(), 90);
        assert!(hw.outputs().guard_on());
        assert_eq!(hw.outputs().tone_hz(), Some(2000));

        hw.all_off();
        assert!(!hw.outputs().guard_on());
        assert_eq!(hw.outputs().tone_hz(), None);
    }
}
