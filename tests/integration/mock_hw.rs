//! Mock hardware for integration tests.
//!
//! Every mock is a cheap handle onto shared state, so a test can hand one
//! clone to the controller and keep another to observe (or drive) the
//! same pin.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pedcross::app::controller::Controller;
use pedcross::app::events::AppEvent;
use pedcross::app::ports::{BuzzerOutput, DigitalInput, DigitalOutput, EventSink};
use pedcross::config::Millis;
use pedcross::drivers::pedestrian::{PedestrianMode, PedestrianSignals};
use pedcross::drivers::traffic::TrafficLights;
use pedcross::fsm::StateId;

// ── Pins ──────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockPin(Rc<Cell<bool>>);

#[allow(dead_code)]
impl MockPin {
    pub fn is_lit(&self) -> bool {
        self.0.get()
    }
}

impl DigitalOutput for MockPin {
    fn set(&mut self, on: bool) {
        self.0.set(on);
    }

    fn read(&self) -> bool {
        self.0.get()
    }
}

#[derive(Clone, Default)]
pub struct MockButton(Rc<Cell<bool>>);

impl MockButton {
    pub fn hold(&self, pressed: bool) {
        self.0.set(pressed);
    }
}

impl DigitalInput for MockButton {
    fn read(&mut self) -> bool {
        self.0.get()
    }
}

#[derive(Clone, Default)]
pub struct MockBuzzer {
    on: Rc<Cell<bool>>,
    writes: Rc<RefCell<Vec<bool>>>,
}

#[allow(dead_code)]
impl MockBuzzer {
    pub fn is_sounding(&self) -> bool {
        self.on.get()
    }

    pub fn writes(&self) -> Vec<bool> {
        self.writes.borrow().clone()
    }
}

impl BuzzerOutput for MockBuzzer {
    fn set(&mut self, on: bool) {
        self.on.set(on);
        self.writes.borrow_mut().push(on);
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn transitions(&self) -> Vec<(Millis, &'static str)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::StateChanged { to, at_ms, .. } => Some((*at_ms, to.name())),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Test rig ──────────────────────────────────────────────────

pub type MockController = Controller<MockPin, MockButton, MockBuzzer>;

/// A started controller plus observation handles for every pin.
pub struct Rig {
    pub controller: MockController,
    pub sink: RecordingSink,
    /// `[red, amber, green]`
    pub traffic: [MockPin; 3],
    /// `[red, green]`
    pub pedestrian: [MockPin; 2],
    pub button: MockButton,
    pub buzzer: MockBuzzer,
    pub now: Millis,
}

/// Poll cadence used by the rig.
pub const STEP_MS: Millis = 100;

#[allow(dead_code)]
impl Rig {
    /// Controller started at t = 0.
    pub fn new() -> Self {
        let traffic: [MockPin; 3] = Default::default();
        let pedestrian: [MockPin; 2] = Default::default();
        let button = MockButton::default();
        let buzzer = MockBuzzer::default();

        let lights = TrafficLights::new(
            traffic[0].clone(),
            traffic[1].clone(),
            traffic[2].clone(),
        );
        let signals = PedestrianSignals::new(
            pedestrian[0].clone(),
            pedestrian[1].clone(),
            button.clone(),
            buzzer.clone(),
        );

        let mut controller = Controller::new(lights, signals, 0);
        let mut sink = RecordingSink::default();
        controller.start(&mut sink);

        Self {
            controller,
            sink,
            traffic,
            pedestrian,
            button,
            buzzer,
            now: 0,
        }
    }

    /// One poll at `now`.  Checks the safety invariants afterwards.
    pub fn poll_at(&mut self, now: Millis) {
        self.now = now;
        self.controller.update(now, &mut self.sink);
        self.assert_safe();
    }

    /// Poll every [`STEP_MS`] up to and including `until`.
    pub fn run_until(&mut self, until: Millis) {
        while self.now + STEP_MS <= until {
            let next = self.now + STEP_MS;
            self.poll_at(next);
        }
    }

    /// Press for one poll at `at`, release on the next.
    pub fn press_at(&mut self, at: Millis) {
        self.run_until(at - STEP_MS);
        self.button.hold(true);
        self.poll_at(at);
        self.button.hold(false);
        self.poll_at(at + STEP_MS);
    }

    pub fn traffic_lit(&self) -> [bool; 3] {
        [
            self.traffic[0].is_lit(),
            self.traffic[1].is_lit(),
            self.traffic[2].is_lit(),
        ]
    }

    pub fn pedestrian_lit(&self) -> [bool; 2] {
        [self.pedestrian[0].is_lit(), self.pedestrian[1].is_lit()]
    }

    fn assert_safe(&self) {
        let [t_red, t_amber, t_green] = self.traffic_lit();
        let [p_red, p_green] = self.pedestrian_lit();
        assert!(
            !(t_green && p_green),
            "traffic green and walk both lit at {}ms",
            self.now
        );
        assert!(
            !(p_red && p_green),
            "pedestrian red and green both lit at {}ms",
            self.now
        );
        match self.controller.pedestrian().mode() {
            PedestrianMode::Stop => assert!(p_red, "stop shown dark at {}ms", self.now),
            PedestrianMode::Walk => assert!(p_green, "walk shown dark at {}ms", self.now),
            PedestrianMode::Warning => assert!(!p_green, "walk lit in warning at {}ms", self.now),
        }
        let lit = u8::from(t_red) + u8::from(t_amber) + u8::from(t_green);
        if self.controller.state() == StateId::Error {
            assert!(lit <= 1, "fault flash lit {} lamps at {}ms", lit, self.now);
        } else {
            assert_eq!(lit, 1, "vehicle head lit {} lamps at {}ms", lit, self.now);
        }
        if self.controller.pedestrian().buzzer_active() {
            assert!(p_green, "buzzer active without walk at {}ms", self.now);
        }
    }
}
