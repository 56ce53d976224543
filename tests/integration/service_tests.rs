//! Integration tests for the CoolerService → HoldTimer → actuators pipeline.
//!
//! Every panel action goes through `handle_command`, the periodic check
//! through `tick`, and the assertions look only at what reached the mock
//! adapters.

use chrono::TimeDelta;

use swampcooler::app::commands::PanelCommand;
use swampcooler::app::events::AppEvent;
use swampcooler::app::ports::{Clock, ControlId};
use swampcooler::app::service::CoolerService;
use swampcooler::config::CoolerConfig;
use swampcooler::cooler::{MotorSpeed, PumpState};
use swampcooler::hold_timer::{HoldState, HoldTick};

use crate::mock_hw::{ManualClock, MockHardware, RecordingSink, RecordingUi};

struct Rig {
    svc: CoolerService,
    hw: MockHardware,
    clock: ManualClock,
    ui: RecordingUi,
    sink: RecordingSink,
}

impl Rig {
    fn with_config(config: CoolerConfig) -> Self {
        let clock = ManualClock::at(12, 0);
        let mut rig = Self {
            svc: CoolerService::new(&config, &clock),
            hw: MockHardware::new(),
            clock,
            ui: RecordingUi::default(),
            sink: RecordingSink::default(),
        };
        rig.svc
            .start(&mut rig.hw, &rig.clock, &mut rig.ui, &mut rig.sink);
        rig
    }

    fn new() -> Self {
        Self::with_config(CoolerConfig::default())
    }

    fn step_minutes(minutes: u32) -> Self {
        Self::with_config(CoolerConfig {
            hold_step_minutes: minutes,
            ..CoolerConfig::default()
        })
    }

    fn press(&mut self, cmd: PanelCommand) -> bool {
        self.svc
            .handle_command(cmd, &mut self.hw, &self.clock, &mut self.ui, &mut self.sink)
            .is_continue()
    }

    fn tick(&mut self) -> HoldTick {
        self.svc
            .tick(&mut self.hw, &self.clock, &mut self.ui, &mut self.sink)
    }
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_switches_everything_off_and_paints_idle_panel() {
    let rig = Rig::new();

    assert_eq!(rig.hw.motor(), MotorSpeed::Off);
    assert_eq!(rig.hw.pump(), PumpState::Off);
    assert_eq!(rig.ui.last_label(), Some(("Current time: 12:00", false)));
    assert_eq!(rig.ui.control(ControlId::CancelHold), Some(false));
    assert_eq!(rig.ui.control(ControlId::SubtractStep), Some(false));
    assert_eq!(rig.ui.control(ControlId::AddStep), Some(true));
    assert_eq!(rig.sink.events, [AppEvent::Started]);
}

// ── Hold scenarios ────────────────────────────────────────────

#[test]
fn fifteen_minute_step_add_subtract_then_expire() {
    let mut rig = Rig::step_minutes(15);

    assert!(rig.press(PanelCommand::AddStep));
    assert_eq!(rig.svc.hold().state(), HoldState::Held);
    assert_eq!(rig.ui.last_label(), Some(("Hold until: 12:15", true)));
    assert_eq!(rig.ui.control(ControlId::CancelHold), Some(true));
    assert_eq!(rig.ui.control(ControlId::SubtractStep), Some(true));

    assert!(rig.press(PanelCommand::SubtractStep));
    assert_eq!(rig.svc.hold().state(), HoldState::Held);
    assert_eq!(rig.svc.hold().deadline(), Some(rig.clock.now()));
    assert_eq!(rig.ui.control(ControlId::SubtractStep), Some(false));

    assert_eq!(rig.tick(), HoldTick::Expired);
    assert_eq!(rig.svc.hold().state(), HoldState::Idle);
    assert_eq!(rig.ui.last_label(), Some(("Current time: 12:00", false)));
    assert_eq!(rig.ui.control(ControlId::CancelHold), Some(false));
    assert_eq!(rig.sink.count(&AppEvent::HoldExpired), 1);
}

#[test]
fn remaining_time_counts_down_with_the_hold() {
    let mut rig = Rig::new();
    assert_eq!(rig.ui.last_remaining(), Some("--:--"));

    rig.press(PanelCommand::AddStep);
    rig.press(PanelCommand::AddStep);
    assert_eq!(rig.ui.last_remaining(), Some("01:00"));

    rig.clock.advance_minutes(45);
    rig.tick();
    assert_eq!(rig.ui.last_remaining(), Some("00:15"));

    rig.clock.advance_minutes(15);
    assert_eq!(rig.tick(), HoldTick::Expired);
    assert_eq!(rig.ui.last_remaining(), Some("--:--"));
}

#[test]
fn expiry_turns_running_outputs_off_exactly_once() {
    let mut rig = Rig::new();
    rig.press(PanelCommand::SetMotor(MotorSpeed::High));
    rig.press(PanelCommand::SetPump(PumpState::On));
    rig.press(PanelCommand::AddStep);

    rig.clock.advance_minutes(29);
    assert!(matches!(rig.tick(), HoldTick::Running { .. }));
    assert_eq!(rig.hw.motor(), MotorSpeed::High);

    rig.clock.advance_minutes(1);
    assert_eq!(rig.tick(), HoldTick::Expired);
    assert_eq!(rig.hw.motor(), MotorSpeed::Off);
    assert_eq!(rig.hw.pump(), PumpState::Off);
    assert_eq!(rig.svc.outputs().motor(), MotorSpeed::Off);

    rig.clock.advance_minutes(5);
    assert_eq!(rig.tick(), HoldTick::Inactive);
    assert_eq!(rig.sink.count(&AppEvent::HoldExpired), 1);
    assert_eq!(rig.sink.count(&AppEvent::SystemOff), 1);
}

#[test]
fn idle_tick_touches_nothing() {
    let mut rig = Rig::new();
    rig.press(PanelCommand::SetPump(PumpState::On));
    let calls = rig.hw.calls.len();

    rig.clock.advance_minutes(90);
    assert_eq!(rig.tick(), HoldTick::Inactive);
    assert_eq!(rig.hw.calls.len(), calls);
    assert_eq!(rig.svc.tick_count(), 1);
}

#[test]
fn add_then_cancel_is_idle_and_keeps_outputs() {
    let mut rig = Rig::new();
    rig.press(PanelCommand::SetMotor(MotorSpeed::Low));
    rig.press(PanelCommand::AddStep);
    rig.press(PanelCommand::CancelHold);

    assert_eq!(rig.svc.hold().state(), HoldState::Idle);
    assert_eq!(rig.hw.motor(), MotorSpeed::Low);
    assert_eq!(rig.ui.control(ControlId::CancelHold), Some(false));
    assert_eq!(rig.ui.control(ControlId::SubtractStep), Some(false));
    assert_eq!(rig.sink.count(&AppEvent::HoldCancelled), 1);
}

#[test]
fn subtract_disables_as_soon_as_less_than_a_step_remains() {
    let mut rig = Rig::new();
    rig.press(PanelCommand::AddStep);
    assert_eq!(rig.ui.control(ControlId::SubtractStep), Some(true));

    rig.clock.advance(TimeDelta::seconds(1));
    rig.tick();
    assert_eq!(rig.ui.control(ControlId::SubtractStep), Some(false));

    // A refused subtract leaves the deadline alone.
    let before = rig.svc.hold().deadline();
    rig.press(PanelCommand::SubtractStep);
    assert_eq!(rig.svc.hold().deadline(), before);
}

#[test]
fn add_is_capped_at_max_hold() {
    let mut rig = Rig::with_config(CoolerConfig {
        hold_step_minutes: 30,
        max_hold_minutes: 60,
        ..CoolerConfig::default()
    });
    rig.press(PanelCommand::AddStep);
    rig.press(PanelCommand::AddStep);
    assert_eq!(rig.ui.control(ControlId::AddStep), Some(false));

    let before = rig.svc.hold().deadline();
    rig.press(PanelCommand::AddStep);
    assert_eq!(rig.svc.hold().deadline(), before);
    assert_eq!(rig.ui.last_label(), Some(("Hold until: 13:00", true)));

    // Time passing frees room for another step.
    rig.clock.advance_minutes(30);
    rig.tick();
    assert_eq!(rig.ui.control(ControlId::AddStep), Some(true));
}

// ── Outputs ───────────────────────────────────────────────────

#[test]
fn motor_button_cycles_off_low_high_off() {
    let mut rig = Rig::new();
    let mut seen = Vec::new();
    for _ in 0..3 {
        rig.press(PanelCommand::CycleMotor);
        seen.push(rig.hw.motor());
    }
    assert_eq!(seen, [MotorSpeed::Low, MotorSpeed::High, MotorSpeed::Off]);
}

#[test]
fn pump_button_toggles() {
    let mut rig = Rig::new();
    rig.press(PanelCommand::CyclePump);
    assert_eq!(rig.hw.pump(), PumpState::On);
    rig.press(PanelCommand::CyclePump);
    assert_eq!(rig.hw.pump(), PumpState::Off);
    assert_eq!(rig.sink.count(&AppEvent::PumpChanged(PumpState::On)), 1);
}

#[test]
fn exit_switches_off_and_breaks() {
    let mut rig = Rig::new();
    rig.press(PanelCommand::SetMotor(MotorSpeed::High));
    rig.press(PanelCommand::AddStep);

    assert!(!rig.press(PanelCommand::Exit));
    assert_eq!(rig.hw.motor(), MotorSpeed::Off);
    assert_eq!(rig.hw.pump(), PumpState::Off);
    assert!(!rig.svc.hold().is_active());
    assert_eq!(rig.sink.events.last(), Some(&AppEvent::SystemOff));
}
