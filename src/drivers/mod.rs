//! Hardware drivers for the Gatewarden main board.
//!
//! Everything here is target-gated: on ESP-IDF the drivers talk to the
//! real peripherals through the raw helpers in [`hw_init`]; on the host
//! they run against in-memory simulations so the full stack is testable.

pub mod button;
pub mod hw_init;
pub mod lcd;
pub mod outputs;
pub mod servo;
pub mod watchdog;
