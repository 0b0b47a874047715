//! Function-pointer finite state machine engine.
//!
//! Classic embedded FSM pattern expressed with plain `fn` pointers:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  StateTable                                                  │
//! │  ┌─────────────┬──────────┬─────────┬──────────┬──────────┐  │
//! │  │ StateId     │ on_enter │ on_exit │ on_update│ render   │  │
//! │  ├─────────────┼──────────┼─────────┼──────────┼──────────┤  │
//! │  │ Idle        │ fn(ctx)  │ fn(ctx) │ guard    │ fn(ctx)  │  │
//! │  │ Change      │ fn(ctx)  │ fn(ctx) │ guard    │ fn(ctx)  │  │
//! │  │ Walk        │ fn(ctx)  │ fn(ctx) │ guard    │ fn(ctx)  │  │
//! │  │ WalkWarning │ fn(ctx)  │ fn(ctx) │ guard    │ fn(ctx)  │  │
//! │  │ Error       │ fn(ctx)  │ fn(ctx) │ guard    │ fn(ctx)  │  │
//! │  └─────────────┴──────────┴─────────┴──────────┴──────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine evaluates `on_update` (the transition guard) for
//! the **current** state.  If it returns `Some(next_id)`, the engine runs
//! `on_exit` for the current state, records the entry time, then runs
//! `on_enter` for the next.  Finally it calls `render` for whatever state
//! it is leaving the tick in, so the signal commands in the context never
//! describe a stale or intermediate configuration.

pub mod context;
pub mod states;

use context::FsmContext;
use log::{error, info, warn};

use crate::config::Millis;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Enumeration of all crossing states.
/// Must stay in sync with the state table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    Idle = 0,
    Change = 1,
    Walk = 2,
    WalkWarning = 3,
    Error = 4,
}

impl StateId {
    /// Total number of states, used to size the table array.
    pub const COUNT: usize = 5;

    pub fn name(self) -> &'static str {
        match self {
            StateId::Idle => "IDLE",
            StateId::Change => "CHANGE",
            StateId::Walk => "WALK",
            StateId::WalkWarning => "WALK_WARNING",
            StateId::Error => "ERROR",
        }
    }
}

impl TryFrom<u8> for StateId {
    type Error = crate::error::Error;

    fn try_from(raw: u8) -> Result<Self, crate::error::Error> {
        match raw {
            0 => Ok(StateId::Idle),
            1 => Ok(StateId::Change),
            2 => Ok(StateId::Walk),
            3 => Ok(StateId::WalkWarning),
            4 => Ok(StateId::Error),
            _ => Err(crate::error::Error::InvalidState(raw)),
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter`, `on_exit` and `render`.
pub type StateActionFn = fn(&mut FsmContext);

/// Signature for the per-tick transition guard.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&mut FsmContext) -> Option<StateId>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single FSM state.
/// Stored in a fixed-size array: no heap, no `dyn`.
pub struct StateDescriptor {
    pub id: StateId,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
    /// Writes the signal commands for this state.  Runs every tick.
    pub render: StateActionFn,
}

/// A completed state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: StateId,
    pub to: StateId,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
///
/// Owns the state table and the timing of the current state.  The
/// mutable [`FsmContext`] is threaded through every handler call.
pub struct Fsm {
    /// Fixed-size table indexed by `StateId as usize`.
    table: [StateDescriptor; StateId::COUNT],
    /// Index of the currently active state.
    current: usize,
    /// Timestamp at which the current state was entered.
    entered_at_ms: Millis,
}

impl Fsm {
    /// Construct a new FSM with the given state table, starting in `initial`
    /// as of `now_ms`.
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId, now_ms: Millis) -> Self {
        debug_assert!(
            table.iter().enumerate().all(|(i, d)| d.id as usize == i),
            "state table out of order"
        );
        Self {
            table,
            current: initial as usize,
            entered_at_ms: now_ms,
        }
    }

    /// Run the initial `on_enter` and `render` for the starting state.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut FsmContext) {
        info!("FSM starting in state: {}", self.current_state().name());
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
        self.render(ctx);
    }

    /// Advance the FSM by one poll.
    ///
    /// 1. Refresh `ctx.elapsed_ms` from `ctx.now_ms`.
    /// 2. Call `on_update` for the current state.
    /// 3. If it returns `Some(next)`, execute the transition.
    /// 4. Render the (possibly new) current state.
    pub fn tick(&mut self, ctx: &mut FsmContext) -> Option<Transition> {
        ctx.commands.acknowledge_request = false;
        ctx.elapsed_ms = ctx.now_ms.saturating_sub(self.entered_at_ms);

        let transition = (self.table[self.current].on_update)(ctx)
            .map(|next_id| self.transition(next_id, ctx));

        self.render(ctx);
        transition
    }

    /// Force an immediate transition (manual reset, maintenance).
    /// Returns `None` if already in `next`.
    pub fn force_transition(&mut self, next: StateId, ctx: &mut FsmContext) -> Option<Transition> {
        if next as usize == self.current {
            return None;
        }
        let transition = self.transition(next, ctx);
        self.render(ctx);
        Some(transition)
    }

    /// Load a raw state value (maintenance path).
    ///
    /// Only the fault-reachable states may be loaded: ERROR from anywhere,
    /// IDLE only out of ERROR.  CHANGE, WALK and WALK_WARNING are entered
    /// through the nominal sequence alone and are refused with
    /// [`Error::StateRefused`](crate::error::Error::StateRefused), leaving
    /// the current state untouched.  Unknown values force ERROR and are
    /// reported as [`Error::InvalidState`](crate::error::Error::InvalidState).
    pub fn load_raw(
        &mut self,
        raw: u8,
        ctx: &mut FsmContext,
    ) -> crate::error::Result<Option<Transition>> {
        let current = self.current_state();
        match StateId::try_from(raw) {
            Ok(StateId::Error) => Ok(self.force_transition(StateId::Error, ctx)),
            Ok(StateId::Idle) if matches!(current, StateId::Idle | StateId::Error) => {
                Ok(self.force_transition(StateId::Idle, ctx))
            }
            Ok(state) => {
                warn!(
                    "FSM: refusing direct load of {} from {}",
                    state.name(),
                    current.name()
                );
                Err(crate::error::Error::StateRefused(raw))
            }
            Err(e) => {
                error!("FSM: {}, forcing ERROR", e);
                self.force_transition(StateId::Error, ctx);
                Err(e)
            }
        }
    }

    /// Re-run `render` for the current state.
    pub fn render(&self, ctx: &mut FsmContext) {
        (self.table[self.current].render)(ctx);
    }

    /// The current state's identity.
    pub fn current_state(&self) -> StateId {
        self.table[self.current].id
    }

    /// When the current state was entered.
    pub fn entered_at_ms(&self) -> Millis {
        self.entered_at_ms
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: StateId, ctx: &mut FsmContext) -> Transition {
        let from = self.current_state();
        info!("FSM transition: {} -> {}", from.name(), next_id.name());

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_id as usize;
        self.entered_at_ms = ctx.now_ms;
        ctx.elapsed_ms = 0;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }

        Transition { from, to: next_id }
    }
}
