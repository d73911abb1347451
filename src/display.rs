//! LCD status rendering with change-only redraws.
//!
//! Row 0 carries the status text, row 1 the live readings. A full
//! clear-and-redraw happens only when the status text changes; while it
//! is stable, only the readings row is rewritten, and only when its
//! rendered text actually differs. The HD44780 is slow over I²C, so
//! suppressing redundant traffic keeps the control loop tight and the
//! display flicker-free.

use core::fmt::Write as _;

use heapless::String;
use log::warn;

use crate::app::ports::DisplayPort;
use crate::fsm::context::SensorReadings;
use crate::fsm::GatePhase;
use crate::pins;

/// Pick the row-0 status text. The alarm overrides everything — it can
/// only be armed while the gate is closed, and the operator needs to see
/// it over the idle text.
pub fn status_text(phase: GatePhase, alarm_armed: bool) -> &'static str {
    if alarm_armed {
        return "Intruder alert!";
    }
    match phase {
        GatePhase::IdleOpen => "Opened!",
        GatePhase::IdleClosed => "Closed!",
        GatePhase::Opening => "Opening...",
        GatePhase::Closing => "Closing...",
        GatePhase::WaitingToOpen | GatePhase::WaitingToClose => "Cooldown active...",
    }
}

type Row = String<{ pins::LCD_COLUMNS as usize }>;

pub struct DisplayCoordinator {
    last_status: Option<&'static str>,
    last_readings_row: Row,
}

impl DisplayCoordinator {
    pub fn new() -> Self {
        Self {
            last_status: None,
            last_readings_row: Row::new(),
        }
    }

    /// One render pass. Call every loop iteration; most calls touch
    /// nothing at all.
    pub fn render(
        &mut self,
        port: &mut impl DisplayPort,
        status: &'static str,
        readings: &SensorReadings,
    ) {
        let readings_row = Self::format_readings(readings);

        if self.last_status != Some(status) {
            port.clear();
            port.write(0, 0, status);
            port.write(1, 0, &readings_row);
            self.last_status = Some(status);
            self.last_readings_row = readings_row;
            return;
        }

        if readings_row != self.last_readings_row {
            port.write(1, 0, &readings_row);
            self.last_readings_row = readings_row;
        }
    }

    /// `"24\u{01}C 40% 120cm"` — `\x01` is the degree glyph in CGRAM
    /// slot 1. Truncation past 16 columns cannot happen for plausible
    /// readings; if a value is wild enough to overflow, the row is
    /// cut short rather than wrapped.
    fn format_readings(r: &SensorReadings) -> Row {
        let mut row = Row::new();
        if write!(
            row,
            "{:.0}\u{01}C {:.0}% {:.0}cm",
            r.temperature_c, r.humidity_pct, r.distance_cm
        )
        .is_err()
        {
            warn!("display: readings row truncated");
        }
        row
    }
}

impl Default for DisplayCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingDisplay {
        writes: Vec<(u8, u8, std::string::String)>,
        clears: u32,
    }

    impl DisplayPort for RecordingDisplay {
        fn write(&mut self, row: u8, col: u8, text: &str) {
            self.writes.push((row, col, text.to_owned()));
        }
        fn clear(&mut self) {
            self.clears += 1;
        }
        fn load_degree_glyph(&mut self) {}
    }

    fn readings(t: f32, h: f32, d: f32) -> SensorReadings {
        SensorReadings {
            temperature_c: t,
            humidity_pct: h,
            distance_cm: d,
        }
    }

    #[test]
    fn status_change_triggers_full_redraw() {
        let mut coord = DisplayCoordinator::new();
        let mut lcd = RecordingDisplay::default();
        let r = readings(21.0, 40.0, 120.0);

        coord.render(&mut lcd, "Closed!", &r);
        assert_eq!(lcd.clears, 1);
        assert_eq!(lcd.writes[0], (0, 0, "Closed!".to_owned()));
        assert_eq!(lcd.writes[1], (1, 0, "21\u{01}C 40% 120cm".to_owned()));

        coord.render(&mut lcd, "Opening...", &r);
        assert_eq!(lcd.clears, 2);
    }

    #[test]
    fn unchanged_frame_touches_nothing() {
        let mut coord = DisplayCoordinator::new();
        let mut lcd = RecordingDisplay::default();
        let r = readings(21.0, 40.0, 120.0);

        coord.render(&mut lcd, "Closed!", &r);
        let writes_after_first = lcd.writes.len();

        for _ in 0..100 {
            coord.render(&mut lcd, "Closed!", &r);
        }
        assert_eq!(lcd.clears, 1);
        assert_eq!(lcd.writes.len(), writes_after_first);
    }

    #[test]
    fn readings_change_updates_row_one_only() {
        let mut coord = DisplayCoordinator::new();
        let mut lcd = RecordingDisplay::default();

        coord.render(&mut lcd, "Closed!", &readings(21.0, 40.0, 120.0));
        coord.render(&mut lcd, "Closed!", &readings(22.0, 40.0, 120.0));

        assert_eq!(lcd.clears, 1);
        let last = lcd.writes.last().unwrap();
        assert_eq!(last.0, 1);
        assert!(last.2.starts_with("22\u{01}C"));
    }

    #[test]
    fn sub_degree_drift_is_invisible() {
        // Rounding to whole units means tiny drift renders identically
        // and must not produce traffic.
        let mut coord = DisplayCoordinator::new();
        let mut lcd = RecordingDisplay::default();

        coord.render(&mut lcd, "Closed!", &readings(21.2, 40.1, 120.3));
        let n = lcd.writes.len();
        coord.render(&mut lcd, "Closed!", &readings(21.3, 40.2, 120.4));
        assert_eq!(lcd.writes.len(), n);
    }

    #[test]
    fn alarm_overrides_phase_text() {
        assert_eq!(status_text(GatePhase::IdleClosed, true), "Intruder alert!");
        assert_eq!(status_text(GatePhase::IdleClosed, false), "Closed!");
        assert_eq!(
            status_text(GatePhase::WaitingToClose, false),
            "Cooldown active..."
        );
    }
}
