//! Cadence gating — the cooperative-loop replacement for `sleep`.
//!
//! Every periodic activity (servo stepping, sensor polling) owns a
//! [`Cadence`] and asks it once per loop iteration whether enough time has
//! passed since it last acted. The loop itself never blocks; it reads the
//! monotonic clock once per iteration and feeds the same `now_ms` to every
//! cadence.
//!
//! Interval arithmetic is wrapping-subtraction based, which stays correct
//! across a single `u32` millisecond-counter wraparound (~49.7 days).

/// A fixed minimum interval between successive activations of one activity.
#[derive(Debug, Clone, Copy)]
pub struct Cadence {
    interval_ms: u32,
    last_ms: u32,
}

impl Cadence {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last_ms: 0,
        }
    }

    /// Returns `true` (and records `now_ms` as the new reference point) if
    /// at least one full interval has elapsed since the last activation.
    pub fn ready(&mut self, now_ms: u32) -> bool {
        if now_ms.wrapping_sub(self.last_ms) >= self.interval_ms {
            self.last_ms = now_ms;
            true
        } else {
            false
        }
    }

    /// Re-anchor without acting, e.g. to delay the first activation.
    pub fn rearm(&mut self, now_ms: u32) {
        self.last_ms = now_ms;
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }
}
