//! Concrete phase handler functions and table builder.
//!
//! Each phase is defined by plain `fn` pointers — no closures, no dynamic
//! dispatch, no heap. This is the classic embedded C FSM pattern expressed
//! in safe Rust.
//!
//! ```text
//!  IDLE-OPEN ──[press]──▶ CLOSING ──[angle=180]──▶ IDLE-CLOSED
//!      ▲                     │                          │
//!      │                  [press]                    [press]
//!      │                     ▼                          ▼
//!      │             WAITING-TO-CLOSE              OPENING ──[press]──▶ WAITING-TO-OPEN
//!      │                     │                          │                      │
//!      │                [angle=180]                 [angle=0]              [angle=0]
//!      │                     ▼                          │                      │
//!      └────────────── IDLE-CLOSED ◀───┘               └──────▶ IDLE-OPEN ◀──┘
//! ```
//!
//! A press mid-travel only records the operator's wish on the display —
//! travel always finishes to the current bound first (finish-then-reverse).
//! Intent can only be re-toggled at a bound, which is what actually starts
//! the reverse trip.

use super::context::GateContext;
use super::{GatePhase, PhaseDescriptor};
use log::info;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static phase table. Called once at startup.
pub fn build_phase_table() -> [PhaseDescriptor; GatePhase::COUNT] {
    [
        // Index 0 — IdleOpen
        PhaseDescriptor {
            id: GatePhase::IdleOpen,
            name: "IdleOpen",
            on_enter: Some(idle_open_enter),
            on_exit: None,
            on_update: idle_open_update,
        },
        // Index 1 — IdleClosed
        PhaseDescriptor {
            id: GatePhase::IdleClosed,
            name: "IdleClosed",
            on_enter: Some(idle_closed_enter),
            on_exit: None,
            on_update: idle_closed_update,
        },
        // Index 2 — Opening
        PhaseDescriptor {
            id: GatePhase::Opening,
            name: "Opening",
            on_enter: Some(moving_enter),
            on_exit: None,
            on_update: opening_update,
        },
        // Index 3 — Closing
        PhaseDescriptor {
            id: GatePhase::Closing,
            name: "Closing",
            on_enter: Some(moving_enter),
            on_exit: None,
            on_update: closing_update,
        },
        // Index 4 — WaitingToOpen
        PhaseDescriptor {
            id: GatePhase::WaitingToOpen,
            name: "WaitingToOpen",
            on_enter: None,
            on_exit: None,
            on_update: waiting_to_open_update,
        },
        // Index 5 — WaitingToClose
        PhaseDescriptor {
            id: GatePhase::WaitingToClose,
            name: "WaitingToClose",
            on_enter: None,
            on_exit: None,
            on_update: waiting_to_close_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  Rest phases
// ═══════════════════════════════════════════════════════════════════════════

fn idle_open_enter(ctx: &mut GateContext) {
    // At the open bound: indicator stays lit, lock released, button live.
    ctx.ready_for_button = true;
    ctx.commands.servo_angle = ctx.angle;
    ctx.commands.indicator_on = true;
    ctx.commands.guard_on = false;
    info!("gate open at {} deg", ctx.angle);
}

fn idle_open_update(ctx: &mut GateContext) -> Option<GatePhase> {
    if ctx.take_edge().is_some() {
        // Confirmed press at rest: flip intent, leave the bound.
        ctx.open_intent = false;
        ctx.ready_for_button = false;
        return Some(GatePhase::Closing);
    }
    None
}

fn idle_closed_enter(ctx: &mut GateContext) {
    // At the closed bound: lock relay asserted, indicator dark, button live.
    // The intrusion monitor only arms in this phase.
    ctx.ready_for_button = true;
    ctx.commands.servo_angle = ctx.angle;
    ctx.commands.indicator_on = false;
    ctx.commands.guard_on = true;
    info!("gate closed at {} deg, guard asserted", ctx.angle);
}

fn idle_closed_update(ctx: &mut GateContext) -> Option<GatePhase> {
    if ctx.take_edge().is_some() {
        ctx.open_intent = true;
        ctx.ready_for_button = false;
        return Some(GatePhase::Opening);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  Travel phases
// ═══════════════════════════════════════════════════════════════════════════

fn moving_enter(ctx: &mut GateContext) {
    // Indicator lit for the whole trip; lock released while anything moves.
    ctx.commands.indicator_on = true;
    ctx.commands.guard_on = false;
}

fn opening_update(ctx: &mut GateContext) -> Option<GatePhase> {
    if ctx.take_edge().is_some() {
        // Mid-travel press: record the wish, keep travelling. Only the
        // displayed phase changes — see waiting_to_open_update.
        return Some(GatePhase::WaitingToOpen);
    }
    if ctx.motion.ready(ctx.now_ms) && ctx.step_open() {
        return Some(GatePhase::IdleOpen);
    }
    None
}

fn closing_update(ctx: &mut GateContext) -> Option<GatePhase> {
    if ctx.take_edge().is_some() {
        return Some(GatePhase::WaitingToClose);
    }
    if ctx.motion.ready(ctx.now_ms) && ctx.step_closed() {
        return Some(GatePhase::IdleClosed);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  Waiting phases — travel continues unabated, further presses ignored
// ═══════════════════════════════════════════════════════════════════════════

fn waiting_to_open_update(ctx: &mut GateContext) -> Option<GatePhase> {
    if ctx.take_edge().is_some() {
        ctx.ignored_press = true;
    }
    if ctx.motion.ready(ctx.now_ms) && ctx.step_open() {
        return Some(GatePhase::IdleOpen);
    }
    None
}

fn waiting_to_close_update(ctx: &mut GateContext) -> Option<GatePhase> {
    if ctx.take_edge().is_some() {
        ctx.ignored_press = true;
    }
    if ctx.motion.ready(ctx.now_ms) && ctx.step_closed() {
        return Some(GatePhase::IdleClosed);
    }
    None
}
