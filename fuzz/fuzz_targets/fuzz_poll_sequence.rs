//! Fuzz target: `Controller::update` / `handle_command` sequences
//!
//! Each input byte is one step: the low 7 bits advance the clock, the top
//! bit is the raw button level.  Every 64th byte is instead fed to
//! `AppCommand::ForceState` so raw state loads (valid or not) are mixed in.
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - Vehicle green and pedestrian walk are never lit together
//! - The vehicle head never lights more than one lamp
//! - Pedestrian red and green are never lit together
//!
//! cargo fuzz run fuzz_poll_sequence

#![no_main]

use std::cell::Cell;
use std::rc::Rc;

use libfuzzer_sys::fuzz_target;
use pedcross::app::commands::AppCommand;
use pedcross::app::controller::Controller;
use pedcross::app::ports::{BuzzerOutput, DigitalInput, DigitalOutput, NullSink};
use pedcross::drivers::pedestrian::PedestrianSignals;
use pedcross::drivers::traffic::TrafficLights;

#[derive(Clone, Default)]
struct Pin(Rc<Cell<bool>>);

impl DigitalOutput for Pin {
    fn set(&mut self, on: bool) {
        self.0.set(on);
    }
    fn read(&self) -> bool {
        self.0.get()
    }
}

impl DigitalInput for Pin {
    fn read(&mut self) -> bool {
        self.0.get()
    }
}

impl BuzzerOutput for Pin {
    fn set(&mut self, on: bool) {
        self.0.set(on);
    }
}

fuzz_target!(|data: &[u8]| {
    let lamps: [Pin; 5] = Default::default();
    let button = Pin::default();
    let traffic = TrafficLights::new(lamps[0].clone(), lamps[1].clone(), lamps[2].clone());
    let pedestrian =
        PedestrianSignals::new(lamps[3].clone(), lamps[4].clone(), button.clone(), Pin::default());
    let mut controller = Controller::new(traffic, pedestrian, 0);
    let mut sink = NullSink;
    controller.start(&mut sink);

    let mut now = 0u64;
    for (i, byte) in data.iter().enumerate() {
        if i % 64 == 63 {
            controller.handle_command(AppCommand::ForceState(*byte % 8), now, &mut sink);
        } else {
            button.0.set(byte & 0x80 != 0);
            now += u64::from(byte & 0x7f) * 10;
            controller.update(now, &mut sink);
        }

        let lit: Vec<bool> = lamps.iter().map(|p| p.0.get()).collect();
        assert!(!(lit[2] && lit[4]), "green + walk at {now}ms");
        assert!(lit[..3].iter().filter(|l| **l).count() <= 1);
        assert!(!(lit[3] && lit[4]), "pedestrian red + green at {now}ms");
    }
});
