//! Event sink adapter that renders [`AppEvent`]s to the serial console.
//!
//! One line per event through the `log` facade. The periodic status
//! report is the firmware's only steady-state output, formatted so it
//! stays grep-able from a captured serial log.

use log::{error, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(phase) => {
                info!("EVENT started phase={}", phase.label());
            }
            AppEvent::PhaseChanged { from, to } => {
                info!("EVENT phase {} -> {}", from.label(), to.label());
            }
            AppEvent::IntentChanged { open } => {
                info!(
                    "EVENT intent={}",
                    if *open { "open" } else { "closed" }
                );
            }
            AppEvent::ButtonIgnored => {
                warn!("EVENT press ignored (reversal already queued)");
            }
            AppEvent::AlarmArmed { distance_cm } => {
                error!("EVENT alarm armed, object at {distance_cm:.0} cm");
            }
            AppEvent::AlarmDisarmed => {
                info!("EVENT alarm disarmed");
            }
            AppEvent::StatusReport(s) => {
                info!(
                    "STATUS phase={} angle={} temp={:.1}C hum={:.1}% dist={:.0}cm alarm={}",
                    s.phase.label(),
                    s.angle_deg,
                    s.temperature_c,
                    s.humidity_pct,
                    s.distance_cm,
                    if s.alarm_armed { "on" } else { "off" },
                );
            }
        }
    }
}
