//! Application service — the hexagonal core.
//!
//! [`GateService`] owns the FSM, the debouncer, the sensor sampler, the
//! intrusion monitor, and the display coordinator. It exposes a clean,
//! hardware-agnostic API. All I/O flows through port traits injected at
//! call sites, making the entire service testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────────┐ ──▶ EventSink
//!                 │        GateService          │
//! ActuatorPort ◀──│  FSM · Alarm · Sampler      │ ──▶ DisplayPort
//!                 └────────────────────────────┘
//! ```
//!
//! One [`tick`](GateService::tick) per loop iteration, fixed ordering:
//! button debounce → motion FSM → (on the sensor cadence) sampling +
//! intrusion policy + status report → display → actuator application.
//! Every stage compares against the same `now_ms` read.

use log::info;

use crate::alarm::IntrusionMonitor;
use crate::config::GateConfig;
use crate::display::{status_text, DisplayCoordinator};
use crate::drivers::button::DebouncedButton;
use crate::fsm::context::GateContext;
use crate::fsm::states::build_phase_table;
use crate::fsm::{Fsm, GatePhase};
use crate::sensors::SensorSampler;

use super::commands::AppCommand;
use super::events::{AppEvent, StatusReport};
use super::ports::{ActuatorPort, DisplayPort, EventSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// GateService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct GateService {
    fsm: Fsm,
    ctx: GateContext,
    button: DebouncedButton,
    sampler: SensorSampler,
    monitor: IntrusionMonitor,
    display: DisplayCoordinator,
    alarm_tone_hz: u16,
    /// Whether the buzzer is currently sounding — tone start/stop fires
    /// only on edges so the timer is not retuned every iteration.
    tone_active: bool,
    /// An external `ToggleGate` waiting to be injected as a press edge
    /// on the next tick.
    pending_toggle: bool,
}

impl GateService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the FSM — call [`start`](Self::start) next.
    pub fn new(config: GateConfig) -> Self {
        let initial = if config.start_closed {
            GatePhase::IdleClosed
        } else {
            GatePhase::IdleOpen
        };
        let button = DebouncedButton::new(config.debounce_window_ms);
        let sampler = SensorSampler::new(config.sensor_poll_interval_ms, config.max_distance_cm);
        let monitor = IntrusionMonitor::new(&config);
        let alarm_tone_hz = config.alarm_tone_hz;
        let ctx = GateContext::new(config);
        let fsm = Fsm::new(build_phase_table(), initial);

        Self {
            fsm,
            ctx,
            button,
            sampler,
            monitor,
            display: DisplayCoordinator::new(),
            alarm_tone_hz,
            tone_active: false,
            pending_toggle: false,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the FSM, assert the rest-state outputs, and show the boot
    /// banner. The first `tick` replaces the banner with the live status.
    pub fn start(
        &mut self,
        hw: &mut impl ActuatorPort,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) {
        display.load_degree_glyph();
        self.fsm.start(&mut self.ctx);
        self.apply_actuators(hw);
        self.display
            .render(display, "System ready!", &self.ctx.readings);
        sink.emit(&AppEvent::Started(self.fsm.current_phase()));
        info!(
            "GateService started: {} at {}°",
            self.fsm.current_phase().label(),
            self.ctx.angle
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`] — this avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        now_ms: u32,
        hw: &mut (impl SensorPort + ActuatorPort),
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) {
        self.ctx.now_ms = now_ms;
        let prev_phase = self.fsm.current_phase();
        let prev_intent = self.ctx.open_intent;
        let prev_armed = self.monitor.is_armed();

        // 1. Button debounce (plus any queued external toggle).
        let mut edge = self.button.poll(hw.read_button_raw(), now_ms);
        if self.pending_toggle {
            self.pending_toggle = false;
            edge = edge.or(Some(crate::drivers::button::EdgeEvent::Pressed));
        }
        self.ctx.edge = edge;

        // 2. Motion FSM.
        self.fsm.tick(&mut self.ctx);
        self.ctx.edge = None;
        let phase = self.fsm.current_phase();

        // 3. Intrusion policy. Leaving the secured bound disarms in this
        //    same iteration; the full evaluation waits for fresh data.
        self.monitor.enforce_phase(phase);

        if self.sampler.tick(now_ms, hw, &mut self.ctx.readings) {
            let was_armed = self.monitor.is_armed();
            let armed = self
                .monitor
                .evaluate(now_ms, phase, self.ctx.readings.distance_cm);
            if armed && !was_armed {
                sink.emit(&AppEvent::AlarmArmed {
                    distance_cm: self.ctx.readings.distance_cm,
                });
            }
            sink.emit(&AppEvent::StatusReport(self.status_report()));
        }
        self.ctx.commands.alarm_on = self.monitor.is_armed();

        // 4. Display.
        let status = status_text(phase, self.monitor.is_armed());
        self.display.render(display, status, &self.ctx.readings);

        // 5. Actuators.
        self.apply_actuators(hw);

        // 6. Events for whatever moved this iteration.
        if phase != prev_phase {
            sink.emit(&AppEvent::PhaseChanged {
                from: prev_phase,
                to: phase,
            });
        }
        if self.ctx.open_intent != prev_intent {
            sink.emit(&AppEvent::IntentChanged {
                open: self.ctx.open_intent,
            });
        }
        if self.ctx.ignored_press {
            self.ctx.ignored_press = false;
            sink.emit(&AppEvent::ButtonIgnored);
        }
        if prev_armed && !self.monitor.is_armed() {
            sink.emit(&AppEvent::AlarmDisarmed);
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command (serial console, a future remote link).
    pub fn handle_command(&mut self, cmd: AppCommand) {
        match cmd {
            AppCommand::ToggleGate => {
                // Injected as a press edge on the next tick so it flows
                // through exactly the same phase logic as the button.
                self.pending_toggle = true;
                info!("external toggle queued");
            }
            AppCommand::SilenceAlarm => {
                self.monitor.silence();
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn phase(&self) -> GatePhase {
        self.fsm.current_phase()
    }

    pub fn angle(&self) -> u8 {
        self.ctx.angle
    }

    pub fn is_armed(&self) -> bool {
        self.monitor.is_armed()
    }

    pub fn readings(&self) -> &crate::fsm::context::SensorReadings {
        &self.ctx.readings
    }

    fn status_report(&self) -> StatusReport {
        StatusReport {
            phase: self.fsm.current_phase(),
            angle_deg: self.ctx.angle,
            temperature_c: self.ctx.readings.temperature_c,
            humidity_pct: self.ctx.readings.humidity_pct,
            distance_cm: self.ctx.readings.distance_cm,
            alarm_armed: self.monitor.is_armed(),
        }
    }

    // ── Internal ──────────────────────────────────────────────

    /// Translate context command levels into port calls. Level setters
    /// are idempotent; the buzzer tone fires on edges only.
    fn apply_actuators(&mut self, hw: &mut impl ActuatorPort) {
        let cmds = &self.ctx.commands;

        hw.set_servo_angle(cmds.servo_angle);
        hw.set_indicator(cmds.indicator_on);
        hw.set_guard(cmds.guard_on);
        hw.set_alarm_line(cmds.alarm_on);

        if cmds.alarm_on != self.tone_active {
            self.tone_active = cmds.alarm_on;
            if self.tone_active {
                hw.start_tone(self.alarm_tone_hz);
            } else {
                hw.stop_tone();
            }
        }
    }
}
