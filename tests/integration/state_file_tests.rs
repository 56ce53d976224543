//! Config tool against a real state file and a dry-run relay board.

use std::fs;

use swampcooler::adapters::hardware;
use swampcooler::adapters::state_file::JsonStateFile;
use swampcooler::app::commands::PanelCommand;
use swampcooler::app::ports::{ConfigError, StatePort};
use swampcooler::app::service::CoolerService;
use swampcooler::config::CoolerConfig;
use swampcooler::cooler::{MotorSpeed, PumpState};
use swampcooler::error::Error;
use swampcooler::settings::{STATE_FILE_NAME, SettingsRequest, run_config_tool};

use crate::mock_hw::{ManualClock, MockHardware, RecordingSink, RecordingUi};

fn quick_config() -> CoolerConfig {
    CoolerConfig {
        motor_dead_time_ms: 0,
        ..CoolerConfig::default()
    }
}

#[test]
fn first_run_creates_file_then_later_runs_update_it() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStateFile::new(dir.path().join(STATE_FILE_NAME));
    let mut board = hardware::open(&quick_config(), true).unwrap();

    let req = SettingsRequest::parse(Some("2"), None, None).unwrap();
    let mut out = Vec::new();
    run_config_tool(&store, &req, &mut board.relays, false, &mut out).unwrap();
    let first = String::from_utf8(out).unwrap();
    assert!(first.starts_with("Creating default configuration file\n"));
    assert!(first.contains("New motor speed: 2\n"));
    assert_eq!(board.relays.motor_speed(), MotorSpeed::High);

    // A second invocation keeps the motor level it did not touch.
    let mut board = hardware::open(&quick_config(), true).unwrap();
    let req = SettingsRequest::parse(None, Some("1"), Some("false")).unwrap();
    let mut out = Vec::new();
    let state = run_config_tool(&store, &req, &mut board.relays, false, &mut out).unwrap();
    let second = String::from_utf8(out).unwrap();
    assert!(!second.contains("Creating default"));
    assert!(second.ends_with("Saved configuration file\n"));
    assert_eq!(board.relays.motor_speed(), MotorSpeed::High);
    assert_eq!(board.relays.pump_state(), PumpState::On);

    let on_disk = store.load().unwrap();
    assert_eq!(on_disk, state);
    assert_eq!((on_disk.motor, on_disk.pump, on_disk.time_hold), (2, 1, false));
}

#[test]
fn corrupted_file_is_replaced_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(STATE_FILE_NAME);
    fs::write(&path, "motor=2").unwrap();
    let store = JsonStateFile::new(&path);
    let mut board = hardware::open(&quick_config(), true).unwrap();

    let mut out = Vec::new();
    let state = run_config_tool(
        &store,
        &SettingsRequest::default(),
        &mut board.relays,
        false,
        &mut out,
    )
    .unwrap();

    assert_eq!((state.motor, state.pump), (0, 0));
    assert!(String::from_utf8(out).unwrap().contains("Creating default"));
    assert!(store.load().is_ok());
}

#[test]
fn bad_value_is_rejected_before_any_file_access() {
    let err = SettingsRequest::parse(Some("7"), None, None).unwrap_err();
    assert_eq!(Error::from(err).to_string(), "setting: wrong motor speed 7");
}

#[test]
fn config_file_overrides_subset_of_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cooler.json");
    fs::write(&path, r#"{ "hold_step_minutes": 15, "relays_active_low": false }"#).unwrap();

    let config = CoolerConfig::load(&path).unwrap();
    assert_eq!(config.hold_step_minutes, 15);
    assert!(!config.relays_active_low);
    assert_eq!(config.pump_pin, CoolerConfig::default().pump_pin);
}

#[test]
fn panel_leaves_an_unreadable_state_file_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(STATE_FILE_NAME);
    let original = r#"{"motor":1,"pump":1,"time_hold":true,"hold_until_time":"oops"}"#;
    fs::write(&path, original).unwrap();
    let store = JsonStateFile::new(&path);

    let clock = ManualClock::at(9, 0);
    let mut hw = MockHardware::new();
    let mut ui = RecordingUi::default();
    let mut sink = RecordingSink::default();
    let mut svc = CoolerService::new(&CoolerConfig::default(), &clock);
    svc.start(&mut hw, &clock, &mut ui, &mut sink);
    assert!(!svc.save_if_dirty(&store));

    let _ = svc.handle_command(PanelCommand::CyclePump, &mut hw, &clock, &mut ui, &mut sink);
    assert!(!svc.save_if_dirty(&store));
    assert!(!svc.is_outputs_dirty());

    assert_eq!(fs::read_to_string(&path).unwrap(), original);
    assert!(matches!(store.load(), Err(ConfigError::Corrupted(_))));
}

#[test]
fn panel_creates_a_missing_state_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStateFile::new(dir.path().join(STATE_FILE_NAME));

    let clock = ManualClock::at(9, 0);
    let mut hw = MockHardware::new();
    let mut ui = RecordingUi::default();
    let mut sink = RecordingSink::default();
    let mut svc = CoolerService::new(&CoolerConfig::default(), &clock);
    svc.start(&mut hw, &clock, &mut ui, &mut sink);
    let _ = svc.handle_command(PanelCommand::CycleMotor, &mut hw, &clock, &mut ui, &mut sink);

    assert!(svc.save_if_dirty(&store));
    let state = store.load().unwrap();
    assert_eq!((state.motor, state.pump, state.time_hold), (1, 0, false));
}
