//! System configuration parameters
//!
//! All tunable parameters for the Gatewarden controller. Fixed at build
//! time — the gate has no persistence layer, so there is nothing to
//! reload at runtime. The serde derives exist for the serial diagnostics
//! dump and for test snapshots.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    // --- Button ---
    /// Raw input must hold steady this long before the stable level commits (ms)
    pub debounce_window_ms: u32,

    // --- Servo travel ---
    /// Minimum interval between servo angle steps (ms)
    pub servo_step_interval_ms: u32,
    /// Degrees moved per eligible motion tick
    pub servo_step_degrees: u8,
    /// Angle at the fully-open bound (degrees)
    pub angle_open_deg: u8,
    /// Angle at the fully-closed bound (degrees)
    pub angle_closed_deg: u8,
    /// Whether the gate boots at the closed bound
    pub start_closed: bool,

    // --- Sensing ---
    /// Climate + distance poll interval (ms)
    pub sensor_poll_interval_ms: u32,
    /// Echo wait budget for one ultrasonic measurement (ms)
    pub echo_timeout_ms: u32,
    /// Distance readings beyond this are discarded as noise (cm)
    pub max_distance_cm: f32,

    // --- Intrusion alarm ---
    /// Distance below which the perimeter is considered breached (cm)
    pub alarm_distance_cm: f32,
    /// Minimum time the alarm stays armed once triggered (ms)
    pub alarm_hold_ms: u32,
    /// Buzzer frequency while the alarm is asserted (Hz)
    pub alarm_tone_hz: u16,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            // Button
            debounce_window_ms: 50,

            // Servo travel: 1 degree per 20 ms, 0..=180 sweep
            servo_step_interval_ms: 20,
            servo_step_degrees: 1,
            angle_open_deg: 0,
            angle_closed_deg: 180,
            start_closed: true,

            // Sensing
            sensor_poll_interval_ms: 2000,
            echo_timeout_ms: 25,
            max_distance_cm: 400.0,

            // Intrusion alarm
            alarm_distance_cm: 50.0,
            alarm_hold_ms: 3000,
            alarm_tone_hz: 2000,
        }
    }
}
