//! Panel loop flow: queued console input → service → adapters.
//!
//! Mirrors what the binary does, minus stdin: events are pushed (or read
//! from an in-memory console) and the loop is stepped with a synthetic
//! monotonic time.

use std::io::Cursor;

use swampcooler::app::commands::PanelCommand;
use swampcooler::app::events::AppEvent;
use swampcooler::config::CoolerConfig;
use swampcooler::cooler::{MotorSpeed, PumpState};
use swampcooler::events::{Event, spawn_console_reader};
use swampcooler::panel::{PanelIo, PanelLoop};

use crate::mock_hw::{ManualClock, MemStateStore, MockHardware, RecordingSink, RecordingUi};

fn fast_config() -> CoolerConfig {
    CoolerConfig {
        poll_interval_ms: 1,
        tick_interval_ms: 1_000,
        ..CoolerConfig::default()
    }
}

#[test]
fn console_session_runs_until_exit_key() {
    let clock = ManualClock::at(8, 0);
    let mut hw = MockHardware::new();
    let mut ui = RecordingUi::default();
    let mut sink = RecordingSink::default();
    let store = MemStateStore::default();
    let mut io = PanelIo {
        hw: &mut hw,
        clock: &clock,
        ui: &mut ui,
        sink: &mut sink,
        store: &store,
    };

    let mut panel = PanelLoop::new(&fast_config(), &clock, true);
    panel.start(0, &mut io);
    spawn_console_reader(Cursor::new("m\nm\np\n+\nx\nm\n"), panel.queue().sender())
        .join()
        .unwrap();

    let mut steps = 0;
    while panel.step(steps, &mut io).is_continue() {
        steps += 1;
        assert!(steps < 100, "exit key never reached the loop");
    }

    // m, m, p and + each take one step; x breaks on the fifth.
    assert_eq!(steps, 4);
    assert_eq!(hw.motor(), MotorSpeed::Off);
    assert_eq!(hw.pump(), PumpState::Off);
    assert!(sink.events.contains(&AppEvent::MotorChanged(MotorSpeed::High)));
    assert_eq!(sink.events.last(), Some(&AppEvent::SystemOff));

    let saved = store.saved.borrow().clone().unwrap();
    assert_eq!((saved.motor, saved.pump), (0, 0));
}

#[test]
fn hold_expires_through_the_loop() {
    let clock = ManualClock::at(8, 0);
    let mut hw = MockHardware::new();
    let mut ui = RecordingUi::default();
    let mut sink = RecordingSink::default();
    let store = MemStateStore::default();
    let mut io = PanelIo {
        hw: &mut hw,
        clock: &clock,
        ui: &mut ui,
        sink: &mut sink,
        store: &store,
    };

    let mut panel = PanelLoop::new(&fast_config(), &clock, true);
    panel.start(0, &mut io);
    for cmd in [
        PanelCommand::SetPump(PumpState::On),
        PanelCommand::AddStep,
    ] {
        panel.queue().push(Event::Command(cmd));
    }
    let _ = panel.step(1, &mut io);
    let _ = panel.step(2, &mut io);
    assert!(panel.service().hold().is_active());

    clock.advance_minutes(30);
    let _ = panel.step(1_000, &mut io);

    assert!(!panel.service().hold().is_active());
    assert_eq!(hw.pump(), PumpState::Off);
    assert_eq!(sink.count(&AppEvent::HoldExpired), 1);
    assert_eq!(store.saved.borrow().as_ref().map(|s| s.pump), Some(0));
}

#[test]
fn levels_are_saved_only_when_changed() {
    let clock = ManualClock::at(8, 0);
    let mut hw = MockHardware::new();
    let mut ui = RecordingUi::default();
    let mut sink = RecordingSink::default();
    let store = MemStateStore::default();
    let mut io = PanelIo {
        hw: &mut hw,
        clock: &clock,
        ui: &mut ui,
        sink: &mut sink,
        store: &store,
    };

    let mut panel = PanelLoop::new(&fast_config(), &clock, true);
    panel.start(0, &mut io);
    for now in 1..5 {
        let _ = panel.step(now, &mut io);
    }
    assert_eq!(store.saves.get(), 1);

    panel
        .queue()
        .push(Event::Command(PanelCommand::CycleMotor));
    let _ = panel.step(6, &mut io);
    let _ = panel.step(7, &mut io);
    assert_eq!(store.saves.get(), 2);
}
