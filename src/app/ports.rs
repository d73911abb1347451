//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ GateService (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, the LCD, event sinks) implement
//! these traits. The [`GateService`](super::service::GateService) consumes
//! them via generics, so the domain core never touches hardware directly
//! and the whole control loop runs under test with mocks.

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to acquire raw inputs.
///
/// `None` from the acquisition methods means "no reading this time"
/// (sensor fault, echo timeout) — never a fatal condition. The sampler
/// retains the last known good value.
pub trait SensorPort {
    /// One climate acquisition: `(temperature_c, humidity_pct)`.
    fn read_climate(&mut self) -> Option<(f32, f32)>;

    /// One ultrasonic ranging attempt, already converted to centimetres.
    /// Bounded internally — a missing echo returns `None` within the
    /// configured timeout, it never stalls the loop.
    fn measure_distance_cm(&mut self) -> Option<f32>;

    /// Raw button line level. `true` = HIGH (released; the switch is
    /// active-low behind a pull-up).
    fn read_button_raw(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command actuators.
/// Every call is idempotent — re-asserting an unchanged level is safe.
pub trait ActuatorPort {
    /// Command the gate servo to an absolute angle (degrees, 0–180).
    fn set_servo_angle(&mut self, degrees: u8);

    /// Indicator lamp (gate open / in motion).
    fn set_indicator(&mut self, on: bool);

    /// Guard/lock relay (asserted when fully closed).
    fn set_guard(&mut self, on: bool);

    /// Alarm lamp line.
    fn set_alarm_line(&mut self, on: bool);

    /// Start the alarm buzzer at the given frequency.
    fn start_tone(&mut self, freq_hz: u16);

    /// Stop the alarm buzzer.
    fn stop_tone(&mut self);

    /// Kill all outputs — safe shutdown.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → status surface)
// ───────────────────────────────────────────────────────────────

/// The character-display surface. Row/column addressing, one custom
/// degree glyph loaded once at startup (slot 1, referenced as `\x01`
/// inside rendered text).
pub trait DisplayPort {
    /// Write `text` starting at (row, col). Text past the row end may be
    /// truncated by the implementation.
    fn write(&mut self, row: u8, col: u8, text: &str);

    /// Clear the whole display.
    fn clear(&mut self);

    /// Load the custom degree glyph into CGRAM slot 1.
    fn load_degree_glyph(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (serial log today;
/// anything line-oriented tomorrow).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
