//! Crossing controller: the hexagonal core.
//!
//! [`Controller`] owns the FSM, its context and both signal heads.  The
//! main loop calls [`Controller::update`] once per poll with a fresh
//! timestamp; everything else (button sampling, timing, lamp output)
//! happens inside that call.
//!
//! ```text
//!  DigitalInput ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                   │        Controller         │
//! DigitalOutput ◀── │  FSM · Traffic · Ped/Buzz │
//!                   └──────────────────────────┘
//! ```

use log::{debug, info, warn};

use crate::config::Millis;
use crate::drivers::pedestrian::{PedestrianMode, PedestrianSignals};
use crate::drivers::traffic::{TrafficAspect, TrafficLights};
use crate::error::Error;
use crate::fsm::context::FsmContext;
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId, Transition};

use super::commands::AppCommand;
use super::events::{AppEvent, Status};
use super::ports::{BuzzerOutput, DigitalInput, DigitalOutput, EventSink};

// ───────────────────────────────────────────────────────────────
// Controller
// ───────────────────────────────────────────────────────────────

pub struct Controller<O, I, Z> {
    fsm: Fsm,
    ctx: FsmContext,
    traffic: TrafficLights<O>,
    pedestrian: PedestrianSignals<O, I, Z>,
    cycles_completed: u64,
}

impl<O, I, Z> Controller<O, I, Z>
where
    O: DigitalOutput,
    I: DigitalInput,
    Z: BuzzerOutput,
{
    /// Wire the controller to its signal heads.  Starts in IDLE as of `now_ms`.
    ///
    /// Does **not** drive the heads to the IDLE configuration; call
    /// [`start`](Self::start) next.
    pub fn new(
        traffic: TrafficLights<O>,
        pedestrian: PedestrianSignals<O, I, Z>,
        now_ms: Millis,
    ) -> Self {
        Self {
            fsm: Fsm::new(build_state_table(), StateId::Idle, now_ms),
            ctx: FsmContext::new(now_ms),
            traffic,
            pedestrian,
            cycles_completed: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        self.apply_outputs();
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!("Controller started in {}", self.fsm.current_state().name());
    }

    // ── Per-poll orchestration ────────────────────────────────

    /// Run one poll: sample button → FSM → signal heads.
    pub fn update(&mut self, now_ms: Millis, sink: &mut impl EventSink) {
        self.ctx.now_ms = now_ms;

        // 1. Button
        if self.pedestrian.sample_button(now_ms) {
            sink.emit(&AppEvent::RequestAccepted { at_ms: now_ms });
        }
        self.ctx.request_pending = self.pedestrian.request_pending();

        // 2. FSM tick (pure state logic)
        let transition = self.fsm.tick(&mut self.ctx);

        // 3. Outputs
        self.apply_outputs();

        // 4. Events
        if let Some(t) = transition {
            self.emit_transition(t, sink);
        }
        self.settle_acknowledge(sink);
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command.
    pub fn handle_command(&mut self, cmd: AppCommand, now_ms: Millis, sink: &mut impl EventSink) {
        self.ctx.now_ms = now_ms;

        match cmd {
            AppCommand::RequestCrossing => {
                if self.pedestrian.request_crossing(now_ms) {
                    sink.emit(&AppEvent::RequestAccepted { at_ms: now_ms });
                } else {
                    debug!("Command: crossing request inside debounce window, ignored");
                }
            }
            AppCommand::Reset => {
                if self.fsm.current_state() != StateId::Error {
                    warn!(
                        "Command: reset ignored in {}",
                        self.fsm.current_state().name()
                    );
                } else if let Some(t) = self.fsm.force_transition(StateId::Idle, &mut self.ctx) {
                    self.apply_outputs();
                    self.emit_transition(t, sink);
                    sink.emit(&AppEvent::ResetFromFault);
                }
            }
            AppCommand::ForceState(raw) => {
                let from = self.fsm.current_state();
                match self.fsm.load_raw(raw, &mut self.ctx) {
                    Ok(Some(t)) => {
                        self.apply_outputs();
                        self.emit_transition(t, sink);
                    }
                    Ok(None) => {}
                    Err(Error::StateRefused(raw)) => {
                        warn!("Command: force state {} refused in {}", raw, from.name());
                    }
                    Err(e) => {
                        self.apply_outputs();
                        if from != StateId::Error {
                            self.emit_transition(
                                Transition {
                                    from,
                                    to: StateId::Error,
                                },
                                sink,
                            );
                        }
                        sink.emit(&AppEvent::FaultEntered(e));
                    }
                }
            }
        }

        self.ctx.request_pending = self.pedestrian.request_pending();
        self.settle_acknowledge(sink);
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// Time spent in the current state as of `now_ms`.
    pub fn elapsed_in_state(&self, now_ms: Millis) -> Millis {
        now_ms.saturating_sub(self.fsm.entered_at_ms())
    }

    pub fn request_pending(&self) -> bool {
        self.pedestrian.request_pending()
    }

    /// Crossings served since start.
    pub fn cycles_completed(&self) -> u64 {
        self.cycles_completed
    }

    pub fn status(&self, now_ms: Millis) -> Status {
        Status {
            state: self.state(),
            elapsed_ms: self.elapsed_in_state(now_ms),
            request_pending: self.request_pending(),
            traffic: self.traffic.aspect(),
            pedestrian: self.pedestrian.mode(),
            buzzer_active: self.pedestrian.buzzer_active(),
            cycles_completed: self.cycles_completed,
        }
    }

    /// Emit a [`AppEvent::Telemetry`] snapshot.
    pub fn emit_telemetry(&self, now_ms: Millis, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Telemetry(self.status(now_ms)));
    }

    pub fn traffic(&self) -> &TrafficLights<O> {
        &self.traffic
    }

    pub fn pedestrian(&self) -> &PedestrianSignals<O, I, Z> {
        &self.pedestrian
    }

    // ── Internal ──────────────────────────────────────────────

    /// Drive both heads to the FSM's commands.  When pedestrians are being
    /// stopped the pedestrian head goes first; otherwise traffic goes first,
    /// so a walk aspect is only ever shown behind a red vehicle head.
    fn apply_outputs(&mut self) {
        let now = self.ctx.now_ms;
        let commands = self.ctx.commands;

        if commands.pedestrian == PedestrianMode::Stop {
            self.pedestrian.show_stop();
            self.apply_traffic(commands.traffic, now);
        } else {
            self.apply_traffic(commands.traffic, now);
            match commands.pedestrian {
                PedestrianMode::Walk => self.pedestrian.show_walk(now),
                PedestrianMode::Warning => self.pedestrian.show_warning(now),
                PedestrianMode::Stop => self.pedestrian.show_stop(),
            }
        }
    }

    fn apply_traffic(&mut self, aspect: TrafficAspect, now_ms: Millis) {
        match aspect {
            TrafficAspect::Red => self.traffic.show_red(),
            TrafficAspect::Amber => self.traffic.show_amber(),
            TrafficAspect::Green => self.traffic.show_green(),
            TrafficAspect::FaultFlash => self.traffic.show_fault(now_ms),
        }
    }

    fn settle_acknowledge(&mut self, sink: &mut impl EventSink) {
        if !self.ctx.commands.acknowledge_request {
            return;
        }
        self.ctx.commands.acknowledge_request = false;
        self.pedestrian.acknowledge_request();
        self.ctx.request_pending = false;
        self.cycles_completed += 1;
        sink.emit(&AppEvent::RequestAcknowledged);
        debug!("Crossing cycle {} complete", self.cycles_completed);
    }

    fn emit_transition(&self, t: Transition, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::StateChanged {
            from: t.from,
            to: t.to,
            at_ms: self.ctx.now_ms,
        });
    }
}
