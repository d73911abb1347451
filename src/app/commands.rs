//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (serial console,
//! a future remote link) that the [`GateService`](super::service::GateService)
//! interprets and acts upon. The physical button does not come through
//! here — it is sampled directly inside the tick.

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Behave exactly like a confirmed button press: toggle the gate if
    /// it is at rest, otherwise record the mid-travel wish.
    ToggleGate,

    /// Drop the alarm immediately. It re-arms on the next sensor cadence
    /// if the breach persists.
    SilenceAlarm,
}
