//! Gatewarden Firmware — Main Entry Point
//!
//! Hexagonal architecture around a single cooperative control loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  GateHardware       LcdDriver        LogEventSink        │
//! │  (Sensor+Actuator)  (DisplayPort)    (EventSink)         │
//! │                                                          │
//! │  ────────────── Port Trait Boundary ──────────────       │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │           GateService (pure logic)             │      │
//! │  │  FSM · Debounce · Sampler · Intrusion · LCD    │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! No threads, no async, no heap in the control path: one loop iteration
//! reads the clock once, runs `GateService::tick`, feeds the watchdog,
//! and yields for a millisecond.
#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
pub mod config;
mod alarm;
mod display;
mod error;
mod pins;
mod timing;

pub mod app;
mod adapters;
mod drivers;
pub mod fsm;
mod sensors;

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use log::info;

use adapters::hardware::GateHardware;
use adapters::log_sink::LogEventSink;
use app::service::GateService;
use config::GateConfig;
use drivers::lcd::LcdDriver;
use drivers::watchdog::Watchdog;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Gatewarden v{}                     ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Initialise hardware peripherals ────────────────────
    if let Err(e) = drivers::hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    let watchdog = Watchdog::new();

    // ── 3. Build the adapter stack and the service ────────────
    let config = GateConfig::default();
    let mut hw = GateHardware::new(&config);
    let mut lcd = LcdDriver::new(pins::LCD_I2C_ADDR);
    lcd.init();
    let mut sink = LogEventSink;

    let mut service = GateService::new(config);
    service.start(&mut hw, &mut lcd, &mut sink);

    // ── 4. Control loop ───────────────────────────────────────
    loop {
        let now_ms = adapters::time::uptime_ms();
        service.tick(now_ms, &mut hw, &mut lcd, &mut sink);
        watchdog.feed();

        // Yield one tick so the idle task can run; all gate timing is
        // cadence-gated against now_ms, not against this delay.
        esp_idf_svc::hal::delay::FreeRtos::delay_ms(1);
    }
}
