//! Function-pointer finite state machine for the gate's motion cycle.
//!
//! Classic embedded FSM pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  PhaseTable                                                 │
//! │  ┌────────────────┬───────────┬───────────────────┐         │
//! │  │ GatePhase      │ on_enter  │ on_update         │         │
//! │  ├────────────────┼───────────┼───────────────────┤         │
//! │  │ IdleOpen       │ fn(ctx)   │ fn(ctx)->Option<> │         │
//! │  │ IdleClosed     │ fn(ctx)   │ fn(ctx)->Option<> │         │
//! │  │ Opening        │ fn(ctx)   │ fn(ctx)->Option<> │         │
//! │  │ Closing        │ fn(ctx)   │ fn(ctx)->Option<> │         │
//! │  │ WaitingToOpen  │ fn(ctx)   │ fn(ctx)->Option<> │         │
//! │  │ WaitingToClose │ fn(ctx)   │ fn(ctx)->Option<> │         │
//! │  └────────────────┴───────────┴───────────────────┘         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine calls `on_update` for the **current** phase. If it
//! returns `Some(next)`, the engine validates the move against the
//! allowed-transition table, runs `on_exit`/`on_enter`, and updates the
//! current pointer. A transition outside the table is a logic bug: it is
//! rejected at runtime and trips a debug assertion.

pub mod context;
pub mod states;

use context::GateContext;
use log::{info, warn};

// ---------------------------------------------------------------------------
// Phase identity
// ---------------------------------------------------------------------------

/// Discrete state of the gate's motion/rest cycle.
/// Must stay in sync with the table built in [`states::build_phase_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GatePhase {
    IdleOpen = 0,
    IdleClosed = 1,
    Opening = 2,
    Closing = 3,
    WaitingToOpen = 4,
    WaitingToClose = 5,
}

impl GatePhase {
    /// Total number of phases — used to size the table array.
    pub const COUNT: usize = 6;

    /// Convert a table index back to `GatePhase`. Panics on out-of-range
    /// in debug builds; returns the closed rest phase in release (the
    /// gate's safe attitude).
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::IdleOpen,
            1 => Self::IdleClosed,
            2 => Self::Opening,
            3 => Self::Closing,
            4 => Self::WaitingToOpen,
            5 => Self::WaitingToClose,
            _ => {
                debug_assert!(false, "invalid phase index: {idx}");
                Self::IdleClosed
            }
        }
    }

    /// True at either rest bound — exactly the phases where a button
    /// press may toggle the operator's intent.
    pub fn is_idle(self) -> bool {
        matches!(self, Self::IdleOpen | Self::IdleClosed)
    }

    /// Short label for console status lines.
    pub fn label(self) -> &'static str {
        match self {
            Self::IdleOpen => "idle-open",
            Self::IdleClosed => "idle-closed",
            Self::Opening => "opening",
            Self::Closing => "closing",
            Self::WaitingToOpen => "waiting-to-open",
            Self::WaitingToClose => "waiting-to-close",
        }
    }
}

/// The allowed-transition table. Every legal phase change in the system
/// is one of these eight edges; anything else is rejected by the engine.
pub fn transition_allowed(from: GatePhase, to: GatePhase) -> bool {
    use GatePhase::*;
    matches!(
        (from, to),
        (IdleOpen, Closing)
            | (IdleClosed, Opening)
            | (Opening, WaitingToOpen)
            | (Opening, IdleOpen)
            | (Closing, WaitingToClose)
            | (Closing, IdleClosed)
            | (WaitingToOpen, IdleOpen)
            | (WaitingToClose, IdleClosed)
    )
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
/// These run exactly once on each phase transition.
pub type PhaseActionFn = fn(&mut GateContext);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to request a transition, or `None` to stay.
pub type PhaseUpdateFn = fn(&mut GateContext) -> Option<GatePhase>;

// ---------------------------------------------------------------------------
// Phase descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single phase.
/// Stored in a fixed-size array — no heap, no `dyn`.
pub struct PhaseDescriptor {
    pub id: GatePhase,
    pub name: &'static str,
    pub on_enter: Option<PhaseActionFn>,
    pub on_exit: Option<PhaseActionFn>,
    pub on_update: PhaseUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The gate phase machine.
///
/// Owns the phase table (array of [`PhaseDescriptor`]) and advances a
/// mutable [`GateContext`] that is threaded through every handler call.
pub struct Fsm {
    /// Fixed-size table indexed by `GatePhase as usize`.
    table: [PhaseDescriptor; GatePhase::COUNT],
    /// Index of the currently active phase.
    current: usize,
    /// Monotonically increasing tick counter.
    tick_count: u64,
    /// Tick at which the current phase was entered.
    phase_entry_tick: u64,
}

impl Fsm {
    /// Construct a new FSM with the given phase table, starting in `initial`.
    pub fn new(table: [PhaseDescriptor; GatePhase::COUNT], initial: GatePhase) -> Self {
        Self {
            table,
            current: initial as usize,
            tick_count: 0,
            phase_entry_tick: 0,
        }
    }

    /// Run the initial `on_enter` for the starting phase.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut GateContext) {
        info!("FSM starting in phase: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance the FSM by one tick.
    ///
    /// 1. Call `on_update` for the current phase.
    /// 2. If it returns `Some(next)`, validate against the transition
    ///    table and execute: `on_exit(current)` → pointer → `on_enter(next)`.
    pub fn tick(&mut self, ctx: &mut GateContext) {
        self.tick_count += 1;
        ctx.ticks_in_phase = self.tick_count - self.phase_entry_tick;
        ctx.total_ticks = self.tick_count;

        let next = (self.table[self.current].on_update)(ctx);

        if let Some(next_id) = next {
            self.transition(next_id, ctx);
        }
    }

    /// The current phase's identity.
    pub fn current_phase(&self) -> GatePhase {
        GatePhase::from_index(self.current)
    }

    /// How many ticks the FSM has spent in the current phase.
    pub fn ticks_in_current_phase(&self) -> u64 {
        self.tick_count - self.phase_entry_tick
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: GatePhase, ctx: &mut GateContext) {
        let from = self.current_phase();
        if !transition_allowed(from, next_id) {
            debug_assert!(false, "illegal transition {from:?} -> {next_id:?}");
            warn!("FSM: rejected illegal transition {from:?} -> {next_id:?}");
            return;
        }

        let next_idx = next_id as usize;
        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;
        self.phase_entry_tick = self.tick_count;
        ctx.ticks_in_phase = 0;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
