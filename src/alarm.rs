//! Intrusion monitor.
//!
//! Watches the perimeter distance while the gate is fully secured and
//! drives the alarm outputs. The monitor runs on the sensor cadence
//! (a decision is meaningless without a fresh distance reading), with one
//! exception: leaving `IdleClosed` disarms immediately, in the same loop
//! iteration as the phase change — the service calls [`enforce_phase`]
//! every tick for exactly that.
//!
//! ## Arming lifecycle
//!
//! 1. Gate fully closed, object closer than the threshold → arm, record
//!    the arming timestamp, assert lamp + buzzer.
//! 2. While the breach persists the outputs stay asserted; the hold timer
//!    is **not** reset and does **not** disarm — the breach branch takes
//!    precedence over expiry.
//! 3. Once the breach clears, the alarm keeps holding until the minimum
//!    hold window has elapsed since arming, then disarms.
//! 4. Any phase change away from `IdleClosed` disarms unconditionally.
//!
//! [`enforce_phase`]: IntrusionMonitor::enforce_phase

use crate::config::GateConfig;
use crate::fsm::GatePhase;
use log::{error, info};

/// Armed/disarmed policy for the perimeter alarm.
pub struct IntrusionMonitor {
    threshold_cm: f32,
    hold_ms: u32,
    armed: bool,
    /// Timestamp of the arming edge; meaningless while disarmed.
    armed_since_ms: u32,
}

impl IntrusionMonitor {
    pub fn new(config: &GateConfig) -> Self {
        Self {
            threshold_cm: config.alarm_distance_cm,
            hold_ms: config.alarm_hold_ms,
            armed: false,
            armed_since_ms: 0,
        }
    }

    /// Immediate disarm when the gate leaves its secured rest phase.
    /// Called every loop iteration; cheap no-op in the common case.
    pub fn enforce_phase(&mut self, phase: GatePhase) {
        if self.armed && phase != GatePhase::IdleClosed {
            self.armed = false;
            info!("alarm disarmed: gate no longer secured ({})", phase.label());
        }
    }

    /// Evaluate the policy against the latest distance reading.
    /// Runs on the sensor cadence. Returns the armed state.
    pub fn evaluate(&mut self, now_ms: u32, phase: GatePhase, distance_cm: f32) -> bool {
        if phase != GatePhase::IdleClosed {
            self.armed = false;
            return false;
        }

        if distance_cm > 0.0 && distance_cm < self.threshold_cm {
            if !self.armed {
                self.armed = true;
                self.armed_since_ms = now_ms;
                error!("INTRUSION: object at {:.0} cm, alarm armed", distance_cm);
            }
            // Breach persists: outputs stay asserted, hold timer untouched.
        } else if self.armed && now_ms.wrapping_sub(self.armed_since_ms) >= self.hold_ms {
            self.armed = false;
            info!("alarm hold expired, disarmed");
        }

        self.armed
    }

    /// Operator override — drop the alarm without waiting for the hold.
    /// Re-arms on the next cadence if the breach is still present.
    pub fn silence(&mut self) {
        if self.armed {
            self.armed = false;
            info!("alarm silenced by operator");
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}
