//! Gate servo on an LEDC PWM channel.
//!
//! Standard hobby-servo signalling: a 50 Hz frame whose high pulse maps
//! 500 µs → 0° and 2500 µs → 180°. The angle-to-duty conversion happens
//! here; motion pacing (one degree per step interval) is the phase
//! handlers' job, this driver just goes where it is told.

use crate::pins;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

/// Map an angle to the LEDC duty count for the configured frame.
///
/// duty = pulse_us / frame_us * 2^resolution, with the pulse linearly
/// interpolated between the min and max pulse widths.
pub fn angle_to_duty(degrees: u8) -> u32 {
    let degrees = degrees.min(180) as u32;
    let span_us = pins::SERVO_MAX_PULSE_US - pins::SERVO_MIN_PULSE_US;
    let pulse_us = pins::SERVO_MIN_PULSE_US + span_us * degrees / 180;
    let frame_us = 1_000_000 / pins::SERVO_PWM_FREQ_HZ;
    let counts = 1u32 << pins::SERVO_PWM_RESOLUTION_BITS;
    // Round to the nearest count.
    (pulse_us * counts + frame_us / 2) / frame_us
}

pub struct ServoDriver {
    current_angle: u8,
}

impl ServoDriver {
    /// The driver does not move the horn on construction — the first
    /// `set_angle` call does, once the service knows the start bound.
    pub fn new() -> Self {
        Self { current_angle: 0 }
    }

    /// Command an absolute angle. Clamped to 180. Idempotent: writing the
    /// same angle re-asserts the same duty, which the hardware ignores.
    pub fn set_angle(&mut self, degrees: u8) {
        let degrees = degrees.min(180);
        self.current_angle = degrees;
        #[cfg(target_os = "espidf")]
        hw_init::ledc_set_duty(hw_init::LEDC_CH_SERVO, angle_to_duty(degrees));
    }

    pub fn current_angle(&self) -> u8 {
        self.current_angle
    }
}

impl Default for ServoDriver {
    fn default() -> Self {
        Self::new()
    }
}
