//! Monotonic wall-clock adapter for the control loop.
//!
//! The whole domain runs on a `u32` millisecond clock compared with
//! `wrapping_sub`, so the truncation at ~49.7 days is harmless — every
//! consumer survives the wrap by construction.

use crate::drivers::hw_init;

/// Milliseconds since boot, truncated to u32.
pub fn uptime_ms() -> u32 {
    (hw_init::now_us() / 1_000) as u32
}
