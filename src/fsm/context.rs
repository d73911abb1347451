//! Shared mutable context threaded through every phase handler.
//!
//! `GateContext` is the single struct that phase handlers read from and
//! write to: the servo angle, the operator's intent, the debounced edge
//! for this iteration, the last-known-good sensor readings, and the
//! actuator command levels the main loop applies after each tick. Think
//! of it as the "blackboard" in a blackboard architecture — there is no
//! message passing because everything runs on one thread.

use crate::config::GateConfig;
use crate::drivers::button::EdgeEvent;
use crate::timing::Cadence;

// ---------------------------------------------------------------------------
// Sensor readings (written by the sampler; read-only to phase handlers)
// ---------------------------------------------------------------------------

/// Last-known-good sensor values.
///
/// A failed acquisition never overwrites a field — the sampler retains the
/// previous value, so these may be stale during a sustained sensor fault
/// but are never invalid.
#[derive(Debug, Clone, Copy, Default)]
pub struct SensorReadings {
    /// Ambient temperature (°C).
    pub temperature_c: f32,
    /// Relative humidity (%).
    pub humidity_pct: f32,
    /// Perimeter distance (cm). 0.0 until the first valid echo.
    pub distance_cm: f32,
}

// ---------------------------------------------------------------------------
// Actuator commands (written by phase handlers; applied by the main loop)
// ---------------------------------------------------------------------------

/// Command levels the control loop applies to the actuators each tick.
/// All levels are idempotent — re-applying an unchanged value is safe.
#[derive(Debug, Clone, Copy)]
pub struct ActuatorCommands {
    /// Servo angle command (degrees, 0 = open bound, 180 = closed bound).
    pub servo_angle: u8,
    /// Indicator lamp — on while the gate is open or in motion.
    pub indicator_on: bool,
    /// Guard/lock relay — asserted only at the fully-closed bound.
    pub guard_on: bool,
    /// Alarm lamp + buzzer — asserted while the intrusion alarm is armed.
    pub alarm_on: bool,
}

impl ActuatorCommands {
    /// Rest commands for a gate sitting at `angle` with everything quiet.
    pub fn at_rest(angle: u8) -> Self {
        Self {
            servo_angle: angle,
            indicator_on: false,
            guard_on: false,
            alarm_on: false,
        }
    }
}

// ---------------------------------------------------------------------------
// GateContext
// ---------------------------------------------------------------------------

/// The shared context passed to every phase handler function.
pub struct GateContext {
    // -- Timing --
    /// Clock reading for the current loop iteration (ms, monotonic).
    /// Set once by the service before the FSM tick; every handler and
    /// cadence compares against this same value.
    pub now_ms: u32,
    /// Ticks elapsed since the current phase was entered.
    pub ticks_in_phase: u64,
    /// Monotonic total tick count.
    pub total_ticks: u64,
    /// Motion cadence — gates servo stepping to one step per interval.
    pub motion: Cadence,

    // -- Gate state --
    /// Current servo angle in degrees. Always within
    /// `[angle_open_deg, angle_closed_deg]` by construction.
    pub angle: u8,
    /// The operator's last requested end-state: `true` = gate open.
    /// Toggled only on a confirmed press edge while `ready_for_button`.
    pub open_intent: bool,
    /// True only while the gate rests at a bound; blocks intent
    /// re-toggling mid-travel.
    pub ready_for_button: bool,

    // -- Per-iteration input --
    /// Debounced press edge for this iteration, if any. Consumed by the
    /// current phase's handler; cleared by the service after the tick.
    pub edge: Option<EdgeEvent>,
    /// Set by a handler when a press arrived in a phase that cannot act
    /// on it at all (already waiting to reverse). The service turns this
    /// into a `ButtonIgnored` event.
    pub ignored_press: bool,

    // -- Sensor data --
    /// Last-known-good readings. Updated on the sensor cadence.
    pub readings: SensorReadings,

    // -- Actuator outputs --
    pub commands: ActuatorCommands,

    // -- Configuration --
    pub config: GateConfig,
}

impl GateContext {
    /// Create a new context with the given configuration. The gate starts
    /// at the bound selected by `config.start_closed`.
    pub fn new(config: GateConfig) -> Self {
        let angle = if config.start_closed {
            config.angle_closed_deg
        } else {
            config.angle_open_deg
        };
        Self {
            now_ms: 0,
            ticks_in_phase: 0,
            total_ticks: 0,
            motion: Cadence::new(config.servo_step_interval_ms),
            angle,
            open_intent: !config.start_closed,
            ready_for_button: true,
            edge: None,
            ignored_press: false,
            readings: SensorReadings::default(),
            commands: ActuatorCommands::at_rest(angle),
            config,
        }
    }

    /// One motion step toward the closed bound. Returns `true` on arrival.
    /// Never overshoots: the increment is clamped at the bound.
    pub fn step_closed(&mut self) -> bool {
        let bound = self.config.angle_closed_deg;
        self.angle = self
            .angle
            .saturating_add(self.config.servo_step_degrees)
            .min(bound);
        self.commands.servo_angle = self.angle;
        self.angle == bound
    }

    /// One motion step toward the open bound. Returns `true` on arrival.
    pub fn step_open(&mut self) -> bool {
        let bound = self.config.angle_open_deg;
        self.angle = self
            .angle
            .saturating_sub(self.config.servo_step_degrees)
            .max(bound);
        self.commands.servo_angle = self.angle;
        self.angle == bound
    }

    /// Take this iteration's press edge, if any (one-shot).
    pub fn take_edge(&mut self) -> Option<EdgeEvent> {
        self.edge.take()
    }
}
