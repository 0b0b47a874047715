//! Integration tests for maintenance commands: reset, raw state loads
//! and software crossing requests.

use pedcross::app::commands::AppCommand;
use pedcross::app::events::AppEvent;
use pedcross::error::Error;
use pedcross::fsm::StateId;

use crate::mock_hw::Rig;

fn command(rig: &mut Rig, cmd: AppCommand, at: u64) {
    rig.now = at;
    rig.controller.handle_command(cmd, at, &mut rig.sink);
}

// ── ERROR entry and exit ─────────────────────────────────────

#[test]
fn unknown_raw_state_enters_error() {
    let mut rig = Rig::new();
    command(&mut rig, AppCommand::ForceState(200), 1000);

    assert_eq!(rig.controller.state(), StateId::Error);
    assert_eq!(rig.traffic_lit(), [false, true, false], "fault flash starts lit");
    assert_eq!(rig.pedestrian_lit(), [true, false]);
    assert!(
        rig.sink
            .events
            .contains(&AppEvent::FaultEntered(Error::InvalidState(200)))
    );
    assert_eq!(rig.sink.transitions(), vec![(1000, "ERROR")]);
}

#[test]
fn error_flashes_amber_and_ignores_button() {
    let mut rig = Rig::new();
    rig.run_until(1000);
    command(&mut rig, AppCommand::ForceState(StateId::Error as u8), 1000);

    rig.run_until(1400);
    assert_eq!(rig.traffic_lit(), [false, true, false]);
    rig.run_until(1500);
    assert_eq!(rig.traffic_lit(), [false, false, false]);
    rig.run_until(2000);
    assert_eq!(rig.traffic_lit(), [false, true, false]);

    rig.press_at(3000);
    rig.run_until(60_000);
    assert_eq!(rig.controller.state(), StateId::Error);
    assert!(!rig.pedestrian_lit()[1]);
}

#[test]
fn reset_returns_to_idle_with_fresh_dwell() {
    let mut rig = Rig::new();
    command(&mut rig, AppCommand::ForceState(99), 500);
    rig.run_until(10_000);

    command(&mut rig, AppCommand::Reset, 10_000);
    assert_eq!(rig.controller.state(), StateId::Idle);
    assert_eq!(rig.traffic_lit(), [false, false, true]);
    assert_eq!(rig.sink.events.last(), Some(&AppEvent::ResetFromFault));

    rig.press_at(10_500);
    rig.run_until(14_900);
    assert_eq!(rig.controller.state(), StateId::Idle);
    rig.run_until(15_000);
    assert_eq!(rig.controller.state(), StateId::Change);
}

#[test]
fn reset_outside_error_does_nothing() {
    let mut rig = Rig::new();
    rig.press_at(1000);
    rig.run_until(6000);
    assert_eq!(rig.controller.state(), StateId::Change);

    let before = rig.sink.events.len();
    command(&mut rig, AppCommand::Reset, 6000);
    assert_eq!(rig.controller.state(), StateId::Change);
    assert_eq!(rig.sink.events.len(), before);
}

// ── Raw state loads ──────────────────────────────────────────

#[test]
fn force_state_cannot_skip_the_sequence() {
    let mut rig = Rig::new();
    rig.run_until(2000);
    for state in [StateId::Change, StateId::Walk, StateId::WalkWarning] {
        command(&mut rig, AppCommand::ForceState(state as u8), 2000);
        assert_eq!(rig.controller.state(), StateId::Idle);
        assert_eq!(rig.traffic_lit(), [false, false, true]);
        assert_eq!(rig.pedestrian_lit(), [true, false]);
        assert!(!rig.buzzer.is_sounding());
    }
    assert!(rig.sink.transitions().is_empty());

    command(&mut rig, AppCommand::ForceState(StateId::Error as u8), 3000);
    for state in [StateId::Change, StateId::Walk, StateId::WalkWarning] {
        command(&mut rig, AppCommand::ForceState(state as u8), 3100);
        assert_eq!(rig.controller.state(), StateId::Error);
        assert_eq!(rig.pedestrian_lit(), [true, false]);
    }
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::FaultEntered(_))), 0);

    command(&mut rig, AppCommand::ForceState(StateId::Idle as u8), 3200);
    assert_eq!(rig.controller.state(), StateId::Idle);
    assert_eq!(rig.sink.transitions(), vec![(3000, "ERROR"), (3200, "IDLE")]);
}

#[test]
fn force_idle_is_refused_mid_crossing() {
    let mut rig = Rig::new();
    rig.press_at(1000);
    rig.run_until(11_000);
    assert_eq!(rig.controller.state(), StateId::Walk);

    command(&mut rig, AppCommand::ForceState(StateId::Idle as u8), 11_000);
    assert_eq!(rig.controller.state(), StateId::Walk);
    assert_eq!(rig.traffic_lit(), [true, false, false]);
    assert!(rig.controller.request_pending());
    assert!(!rig.sink.events.contains(&AppEvent::RequestAcknowledged));
}

#[test]
fn fault_during_warning_keeps_request() {
    let mut rig = Rig::new();
    rig.press_at(1000);
    rig.run_until(16_000);
    assert_eq!(rig.controller.state(), StateId::WalkWarning);

    command(&mut rig, AppCommand::ForceState(StateId::Error as u8), 16_000);
    assert_eq!(rig.controller.state(), StateId::Error);
    assert!(rig.controller.request_pending());
    assert_eq!(rig.controller.cycles_completed(), 0);
    assert!(!rig.sink.events.contains(&AppEvent::RequestAcknowledged));

    rig.run_until(30_000);
    assert!(rig.controller.request_pending());

    // The interrupted crossing is served after the reset.
    command(&mut rig, AppCommand::Reset, 30_000);
    rig.run_until(34_900);
    assert_eq!(rig.controller.state(), StateId::Idle);
    rig.run_until(35_000);
    assert_eq!(rig.controller.state(), StateId::Change);
}

// ── Software crossing requests ───────────────────────────────

#[test]
fn software_request_starts_a_crossing() {
    let mut rig = Rig::new();
    command(&mut rig, AppCommand::RequestCrossing, 6000);
    assert!(rig.controller.request_pending());
    rig.poll_at(6100);
    assert_eq!(rig.controller.state(), StateId::Change);
}

#[test]
fn software_request_shares_button_debounce() {
    let mut rig = Rig::new();
    rig.press_at(1000);
    command(&mut rig, AppCommand::RequestCrossing, 1150);
    command(&mut rig, AppCommand::RequestCrossing, 1200);

    let accepted: Vec<_> = rig
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::RequestAccepted { at_ms } => Some(*at_ms),
            _ => None,
        })
        .collect();
    assert_eq!(accepted, vec![1000, 1200]);
}
