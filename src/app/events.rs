//! Outbound application events.
//!
//! The [`GateService`](super::service::GateService) emits these through
//! the [`EventSink`](super::ports::EventSink) port. Adapters on the other
//! side decide what to do with them — today that is the serial console.

use crate::fsm::GatePhase;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The service has started (carries the initial phase).
    Started(GatePhase),

    /// The gate moved between phases.
    PhaseChanged { from: GatePhase, to: GatePhase },

    /// A confirmed press flipped the operator's intent.
    IntentChanged { open: bool },

    /// A press arrived outside an actionable window and was ignored.
    ButtonIgnored,

    /// The intrusion alarm armed (carries the triggering distance).
    AlarmArmed { distance_cm: f32 },

    /// The intrusion alarm disarmed (hold expired, phase change, or
    /// operator override).
    AlarmDisarmed,

    /// Periodic status line, once per sensor cadence.
    StatusReport(StatusReport),
}

/// A point-in-time snapshot suitable for the diagnostic console line.
#[derive(Debug, Clone, Copy)]
pub struct StatusReport {
    pub phase: GatePhase,
    pub angle_deg: u8,
    pub temperature_c: f32,
    pub humidity_pct: f32,
    pub distance_cm: f32,
    pub alarm_armed: bool,
}
