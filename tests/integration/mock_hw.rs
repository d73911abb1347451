//! Shared mock adapters for service-level tests.

use gatewarden::app::events::AppEvent;
use gatewarden::app::ports::{ActuatorPort, DisplayPort, EventSink, SensorPort};

// ── Actuator call recording ───────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    SetServo(u8),
    Indicator(bool),
    Guard(bool),
    AlarmLine(bool),
    StartTone(u16),
    StopTone,
    AllOff,
}

/// Mock hardware: settable inputs, recorded actuator calls.
pub struct MockHardware {
    /// Raw button line (true = HIGH = released).
    pub button_level: bool,
    pub climate: Option<(f32, f32)>,
    pub distance: Option<f32>,
    pub calls: Vec<ActuatorCall>,
}

impl MockHardware {
    pub fn new() -> Self {
        Self {
            button_level: true,
            climate: Some((21.5, 40.0)),
            distance: Some(150.0),
            calls: Vec::new(),
        }
    }

    /// Latest servo angle commanded, if any.
    pub fn last_servo_angle(&self) -> Option<u8> {
        self.calls.iter().rev().find_map(|c| match c {
            ActuatorCall::SetServo(a) => Some(*a),
            _ => None,
        })
    }

    /// Latest commanded level of a boolean line.
    pub fn last_level(&self, pick: fn(&ActuatorCall) -> Option<bool>) -> Option<bool> {
        self.calls.iter().rev().find_map(pick)
    }

    pub fn guard_level(&self) -> Option<bool> {
        self.last_level(|c| match c {
            ActuatorCall::Guard(on) => Some(*on),
            _ => None,
        })
    }

    pub fn indicator_level(&self) -> Option<bool> {
        self.last_level(|c| match c {
            ActuatorCall::Indicator(on) => Some(*on),
            _ => None,
        })
    }

    pub fn alarm_level(&self) -> Option<bool> {
        self.last_level(|c| match c {
            ActuatorCall::AlarmLine(on) => Some(*on),
            _ => None,
        })
    }
}

impl SensorPort for MockHardware {
    fn read_climate(&mut self) -> Option<(f32, f32)> {
        self.climate
    }
    fn measure_distance_cm(&mut self) -> Option<f32> {
        self.distance
    }
    fn read_button_raw(&mut self) -> bool {
        self.button_level
    }
}

impl ActuatorPort for MockHardware {
    fn set_servo_angle(&mut self, degrees: u8) {
        self.calls.push(ActuatorCall::SetServo(degrees));
    }
    fn set_indicator(&mut self, on: bool) {
        self.calls.push(ActuatorCall::Indicator(on));
    }
    fn set_guard(&mut self, on: bool) {
        self.calls.push(ActuatorCall::Guard(on));
    }
    fn set_alarm_line(&mut self, on: bool) {
        self.calls.push(ActuatorCall::AlarmLine(on));
    }
    fn start_tone(&mut self, freq_hz: u16) {
        self.calls.push(ActuatorCall::StartTone(freq_hz));
    }
    fn stop_tone(&mut self) {
        self.calls.push(ActuatorCall::StopTone);
    }
    fn all_off(&mut self) {
        self.calls.push(ActuatorCall::AllOff);
    }
}

// ── Display recording ─────────────────────────────────────────

#[derive(Default)]
pub struct MockDisplay {
    pub writes: Vec<(u8, u8, String)>,
    pub clears: u32,
    pub glyph_loads: u32,
}

impl DisplayPort for MockDisplay {
    fn write(&mut self, row: u8, col: u8, text: &str) {
        self.writes.push((row, col, text.to_owned()));
    }
    fn clear(&mut self) {
        self.clears += 1;
    }
    fn load_degree_glyph(&mut self) {
        self.glyph_loads += 1;
    }
}

// ── Event recording ───────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
