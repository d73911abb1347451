//! Service-level scenarios: GateService → FSM → actuators/display/events.

use gatewarden::app::commands::AppCommand;
use gatewarden::app::events::AppEvent;
use gatewarden::app::service::GateService;
use gatewarden::config::GateConfig;
use gatewarden::fsm::GatePhase;

use crate::mock_hw::{ActuatorCall, MockDisplay, MockHardware, RecordingSink};

/// Full sweep duration plus slack (180 steps at 20 ms).
const TRAVEL_MS: u32 = 180 * 20 + 100;

struct Rig {
    svc: GateService,
    hw: MockHardware,
    lcd: MockDisplay,
    sink: RecordingSink,
    now: u32,
}

impl Rig {
    fn new() -> Self {
        Self::with_config(GateConfig::default())
    }

    fn with_config(config: GateConfig) -> Self {
        let mut rig = Self {
            svc: GateService::new(config),
            hw: MockHardware::new(),
            lcd: MockDisplay::default(),
            sink: RecordingSink::default(),
            now: 0,
        };
        rig.svc
            .start(&mut rig.hw, &mut rig.lcd, &mut rig.sink);
        rig
    }

    /// Advance `ms` milliseconds, one tick per millisecond.
    fn run_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            self.now += 1;
            self.svc
                .tick(self.now, &mut self.hw, &mut self.lcd, &mut self.sink);
        }
    }

    /// A clean press-and-release, long enough to pass the 50 ms debounce.
    fn press(&mut self) {
        self.hw.button_level = false;
        self.run_ms(60);
        self.hw.button_level = true;
        self.run_ms(60);
    }

    fn has_event(&self, pred: impl Fn(&AppEvent) -> bool) -> bool {
        self.sink.events.iter().any(pred)
    }
}

// ── Scenario: confirmed press drives a full sweep ─────────────

#[test]
fn press_at_closed_bound_opens_fully() {
    let mut rig = Rig::new();
    assert_eq!(rig.svc.phase(), GatePhase::IdleClosed);
    assert_eq!(rig.hw.guard_level(), Some(true));

    rig.press();
    assert_eq!(rig.svc.phase(), GatePhase::Opening);
    assert_eq!(rig.hw.guard_level(), Some(false));
    assert_eq!(rig.hw.indicator_level(), Some(true));
    assert!(rig.has_event(|e| matches!(e, AppEvent::IntentChanged { open: true })));

    rig.run_ms(TRAVEL_MS);
    assert_eq!(rig.svc.phase(), GatePhase::IdleOpen);
    assert_eq!(rig.svc.angle(), 0);
    assert_eq!(rig.hw.last_servo_angle(), Some(0));
    assert_eq!(rig.hw.indicator_level(), Some(true));
    assert!(rig.has_event(|e| matches!(
        e,
        AppEvent::PhaseChanged {
            from: GatePhase::Opening,
            to: GatePhase::IdleOpen
        }
    )));
}

#[test]
fn servo_never_commanded_outside_bounds() {
    let mut rig = Rig::new();
    rig.press();
    rig.run_ms(TRAVEL_MS);
    rig.press();
    rig.run_ms(TRAVEL_MS);

    for call in &rig.hw.calls {
        if let ActuatorCall::SetServo(a) = call {
            assert!(*a <= 180, "servo commanded to {a}");
        }
    }
}

#[test]
fn sub_debounce_blip_does_nothing() {
    let mut rig = Rig::new();
    rig.hw.button_level = false;
    rig.run_ms(30); // shorter than the 50 ms window
    rig.hw.button_level = true;
    rig.run_ms(100);

    assert_eq!(rig.svc.phase(), GatePhase::IdleClosed);
    assert!(!rig.has_event(|e| matches!(e, AppEvent::IntentChanged { .. })));
}

#[test]
fn round_trip_restores_guard() {
    let mut rig = Rig::new();
    rig.press();
    rig.run_ms(TRAVEL_MS);
    assert_eq!(rig.hw.guard_level(), Some(false));

    rig.press();
    assert_eq!(rig.svc.phase(), GatePhase::Closing);
    rig.run_ms(TRAVEL_MS);
    assert_eq!(rig.svc.phase(), GatePhase::IdleClosed);
    assert_eq!(rig.svc.angle(), 180);
    assert_eq!(rig.hw.guard_level(), Some(true));
    assert_eq!(rig.hw.indicator_level(), Some(false));
}

// ── Scenario: mid-travel press (finish-then-reverse) ──────────

#[test]
fn mid_travel_press_waits_and_finishes_travel() {
    let mut rig = Rig::new();
    rig.press(); // → Opening
    rig.run_ms(500);
    assert_eq!(rig.svc.phase(), GatePhase::Opening);
    let angle_before = rig.svc.angle();

    rig.press(); // mid-travel → WaitingToOpen
    assert_eq!(rig.svc.phase(), GatePhase::WaitingToOpen);
    // Travel keeps going toward the open bound, intent untouched.
    assert!(rig.svc.angle() < angle_before);

    rig.run_ms(TRAVEL_MS);
    assert_eq!(rig.svc.phase(), GatePhase::IdleOpen);
    assert_eq!(rig.svc.angle(), 0);

    // The wish was display-only; a fresh press starts the reverse trip.
    rig.press();
    assert_eq!(rig.svc.phase(), GatePhase::Closing);
}

#[test]
fn press_while_waiting_emits_button_ignored() {
    let mut rig = Rig::new();
    rig.press(); // → Opening
    rig.run_ms(300);
    rig.press(); // → WaitingToOpen
    assert!(!rig.has_event(|e| matches!(e, AppEvent::ButtonIgnored)));

    rig.press(); // nothing left to record
    assert_eq!(rig.svc.phase(), GatePhase::WaitingToOpen);
    assert!(rig.has_event(|e| matches!(e, AppEvent::ButtonIgnored)));
}

// ── Scenario: intrusion alarm ─────────────────────────────────

#[test]
fn breach_while_closed_arms_and_holds() {
    let mut rig = Rig::new();
    rig.hw.distance = Some(30.0);
    rig.run_ms(2100); // past the first sensor cadence
    assert!(rig.svc.is_armed());
    assert_eq!(rig.hw.alarm_level(), Some(true));
    assert!(rig
        .hw
        .calls
        .iter()
        .any(|c| matches!(c, ActuatorCall::StartTone(_))));
    assert!(rig.has_event(|e| matches!(e, AppEvent::AlarmArmed { .. })));

    // Breach clears; hold window (3000 ms) not yet satisfied.
    rig.hw.distance = Some(120.0);
    rig.run_ms(2000);
    assert!(rig.svc.is_armed());

    // Next cadence lands past the hold: disarm.
    rig.run_ms(2000);
    assert!(!rig.svc.is_armed());
    assert_eq!(rig.hw.alarm_level(), Some(false));
    assert!(rig
        .hw
        .calls
        .iter()
        .any(|c| matches!(c, ActuatorCall::StopTone)));
    assert!(rig.has_event(|e| matches!(e, AppEvent::AlarmDisarmed)));
}

#[test]
fn persistent_breach_outlives_hold_window() {
    let mut rig = Rig::new();
    rig.hw.distance = Some(25.0);
    rig.run_ms(2100);
    assert!(rig.svc.is_armed());

    // Far beyond the 3000 ms hold — object still there, alarm still on.
    rig.run_ms(10_000);
    assert!(rig.svc.is_armed());
    assert_eq!(rig.hw.alarm_level(), Some(true));
}

#[test]
fn alarm_never_arms_away_from_closed_bound() {
    let mut rig = Rig::new();
    rig.press(); // → Opening
    rig.hw.distance = Some(10.0);
    rig.run_ms(TRAVEL_MS); // plenty of sensor cadences while open/moving
    assert!(!rig.svc.is_armed());
    rig.run_ms(5000); // resting open with a close object
    assert!(!rig.svc.is_armed());
}

#[test]
fn leaving_closed_bound_disarms_immediately() {
    let mut rig = Rig::new();
    rig.hw.distance = Some(30.0);
    rig.run_ms(2100);
    assert!(rig.svc.is_armed());

    // A confirmed press mid-hold: the phase change wins over the timer
    // in the same iteration.
    rig.hw.button_level = false;
    rig.run_ms(51);
    assert_eq!(rig.svc.phase(), GatePhase::Opening);
    assert!(!rig.svc.is_armed());
    assert_eq!(rig.hw.alarm_level(), Some(false));
    assert!(rig.has_event(|e| matches!(e, AppEvent::AlarmDisarmed)));
}

#[test]
fn silence_command_drops_alarm_until_next_cadence() {
    let mut rig = Rig::new();
    rig.hw.distance = Some(30.0);
    rig.run_ms(2100);
    assert!(rig.svc.is_armed());

    rig.svc.handle_command(AppCommand::SilenceAlarm);
    rig.run_ms(1);
    assert!(!rig.svc.is_armed());
    assert_eq!(rig.hw.alarm_level(), Some(false));

    // Breach persists: the next sensor cadence re-arms.
    rig.run_ms(2000);
    assert!(rig.svc.is_armed());
}

// ── Scenario: external toggle command ─────────────────────────

#[test]
fn toggle_command_acts_like_a_press() {
    let mut rig = Rig::new();
    rig.svc.handle_command(AppCommand::ToggleGate);
    rig.run_ms(1);
    assert_eq!(rig.svc.phase(), GatePhase::Opening);

    rig.run_ms(TRAVEL_MS);
    assert_eq!(rig.svc.phase(), GatePhase::IdleOpen);

    rig.svc.handle_command(AppCommand::ToggleGate);
    rig.run_ms(1);
    assert_eq!(rig.svc.phase(), GatePhase::Closing);
}

// ── Scenario: display traffic ─────────────────────────────────

#[test]
fn steady_state_produces_no_display_traffic() {
    let mut rig = Rig::new();
    rig.run_ms(2100); // settle past the boot banner and the first sample
    let clears = rig.lcd.clears;
    let writes = rig.lcd.writes.len();

    // Readings constant, phase constant: thousands of ticks, zero traffic.
    rig.run_ms(5000);
    assert_eq!(rig.lcd.clears, clears);
    assert_eq!(rig.lcd.writes.len(), writes);
}

#[test]
fn phase_change_redraws_status_row() {
    let mut rig = Rig::new();
    rig.run_ms(10);
    let clears = rig.lcd.clears;

    rig.press(); // → Opening
    assert!(rig.lcd.clears > clears);
    assert!(rig
        .lcd
        .writes
        .iter()
        .any(|(row, _, text)| *row == 0 && text == "Opening..."));
}

#[test]
fn status_reports_arrive_on_sensor_cadence() {
    let mut rig = Rig::new();
    rig.run_ms(6500); // three cadences at 2000 ms
    let reports = rig
        .sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::StatusReport(_)))
        .count();
    assert_eq!(reports, 3);
}

#[test]
fn sensor_fault_retains_displayed_values() {
    let mut rig = Rig::new();
    rig.run_ms(2100); // one good sample
    let good = *rig.svc.readings();

    rig.hw.climate = None;
    rig.hw.distance = None;
    rig.run_ms(4000); // two failed cadences
    let after = *rig.svc.readings();
    assert!((after.temperature_c - good.temperature_c).abs() < f32::EPSILON);
    assert!((after.humidity_pct - good.humidity_pct).abs() < f32::EPSILON);
    assert!((after.distance_cm - good.distance_cm).abs() < f32::EPSILON);
}
