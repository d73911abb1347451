//! Driving/driven adapters — the outer edge of the hexagon.
//!
//! Everything that connects the domain core to the physical world lives
//! here: the real driver stack behind the port traits, the serial event
//! sink, and the monotonic clock.

pub mod hardware;
pub mod log_sink;
pub mod time;
