//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers.  Guards only decide
//! *when* to leave; `render` decides *what* the signal heads show, and is
//! the only place signal commands are written.
//!
//! ```text
//!  IDLE ──[request && dwell]──▶ CHANGE ──[dwell]──▶ WALK
//!    ▲                                                │
//!    │                                             [dwell]
//!    │                                                ▼
//!    └──────────[dwell / acknowledge]───────── WALK_WARNING
//!
//!  ERROR ──[operator reset]──▶ IDLE
//! ```

use super::context::FsmContext;
use super::{StateDescriptor, StateId};
use crate::drivers::pedestrian::PedestrianMode;
use crate::drivers::traffic::TrafficAspect;
use log::{info, warn};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0: Idle
        StateDescriptor {
            id: StateId::Idle,
            on_enter: Some(idle_enter),
            on_exit: None,
            on_update: idle_update,
            render: idle_render,
        },
        // Index 1: Change
        StateDescriptor {
            id: StateId::Change,
            on_enter: Some(change_enter),
            on_exit: None,
            on_update: change_update,
            render: change_render,
        },
        // Index 2: Walk
        StateDescriptor {
            id: StateId::Walk,
            on_enter: Some(walk_enter),
            on_exit: None,
            on_update: walk_update,
            render: walk_render,
        },
        // Index 3: WalkWarning
        StateDescriptor {
            id: StateId::WalkWarning,
            on_enter: Some(walk_warning_enter),
            on_exit: None,
            on_update: walk_warning_update,
            render: walk_warning_render,
        },
        // Index 4: Error
        StateDescriptor {
            id: StateId::Error,
            on_enter: Some(error_enter),
            on_exit: Some(error_exit),
            on_update: error_update,
            render: error_render,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE: vehicles green, waiting for a pedestrian
// ═══════════════════════════════════════════════════════════════════════════

fn idle_enter(ctx: &mut FsmContext) {
    info!(
        "IDLE: traffic green (request {})",
        if ctx.request_pending { "pending" } else { "clear" }
    );
}

fn idle_update(ctx: &mut FsmContext) -> Option<StateId> {
    // A request arriving early is held until the green phase has been served.
    if ctx.request_pending && ctx.dwell_served() {
        info!("IDLE: serving pedestrian request after {}ms", ctx.elapsed_ms);
        return Some(StateId::Change);
    }
    None
}

fn idle_render(ctx: &mut FsmContext) {
    ctx.commands.traffic = TrafficAspect::Green;
    ctx.commands.pedestrian = PedestrianMode::Stop;
}

// ═══════════════════════════════════════════════════════════════════════════
//  CHANGE: amber, vehicles clearing
// ═══════════════════════════════════════════════════════════════════════════

fn change_enter(_ctx: &mut FsmContext) {
    info!("CHANGE: traffic amber");
}

fn change_update(ctx: &mut FsmContext) -> Option<StateId> {
    ctx.dwell_served().then_some(StateId::Walk)
}

fn change_render(ctx: &mut FsmContext) {
    ctx.commands.traffic = TrafficAspect::Amber;
    ctx.commands.pedestrian = PedestrianMode::Stop;
}

// ═══════════════════════════════════════════════════════════════════════════
//  WALK: traffic red, pedestrians green, buzzer on
// ═══════════════════════════════════════════════════════════════════════════

fn walk_enter(_ctx: &mut FsmContext) {
    info!("WALK: traffic red, pedestrians may cross");
}

fn walk_update(ctx: &mut FsmContext) -> Option<StateId> {
    ctx.dwell_served().then_some(StateId::WalkWarning)
}

fn walk_render(ctx: &mut FsmContext) {
    ctx.commands.traffic = TrafficAspect::Red;
    ctx.commands.pedestrian = PedestrianMode::Walk;
}

// ═══════════════════════════════════════════════════════════════════════════
//  WALK_WARNING: traffic red, pedestrian red flashing
// ═══════════════════════════════════════════════════════════════════════════

fn walk_warning_enter(_ctx: &mut FsmContext) {
    info!("WALK_WARNING: pedestrian red flashing");
}

fn walk_warning_update(ctx: &mut FsmContext) -> Option<StateId> {
    if ctx.dwell_served() {
        // Crossing served; presses made during it are covered.
        ctx.commands.acknowledge_request = true;
        return Some(StateId::Idle);
    }
    None
}

fn walk_warning_render(ctx: &mut FsmContext) {
    ctx.commands.traffic = TrafficAspect::Red;
    ctx.commands.pedestrian = PedestrianMode::Warning;
}

// ═══════════════════════════════════════════════════════════════════════════
//  ERROR: amber fault flash, pedestrians held
// ═══════════════════════════════════════════════════════════════════════════

fn error_enter(_ctx: &mut FsmContext) {
    warn!("ERROR: fault flash active, awaiting operator reset");
}

fn error_exit(_ctx: &mut FsmContext) {
    info!("ERROR: cleared by operator");
}

fn error_update(_ctx: &mut FsmContext) -> Option<StateId> {
    // No timed or button-driven exit.
    None
}

fn error_render(ctx: &mut FsmContext) {
    ctx.commands.traffic = TrafficAspect::FaultFlash;
    ctx.commands.pedestrian = PedestrianMode::Stop;
}
