//! Controller service — the hexagonal core.
//!
//! [`CoolerService`] owns the hold timer and the commanded outputs.  It
//! exposes a hardware-agnostic API; all I/O flows through port traits
//! injected at call sites, making the entire service testable with mock
//! adapters.
//!
//! ```text
//!         Clock ──▶ ┌─────────────────────────┐ ──▶ PresentationSink
//!                   │      CoolerService      │ ──▶ EventSink
//!  ActuatorPort ◀── │  HoldTimer · Outputs    │ ──▶ StatePort
//!                   └─────────────────────────┘
//! ```
//!
//! Every operation runs to completion on the caller's thread.  The panel
//! loop is the only caller, so no locking is involved.

use core::ops::ControlFlow;

use chrono::TimeDelta;
use log::{debug, info, warn};

use crate::config::CoolerConfig;
use crate::cooler::{CoolerOutputs, MotorSpeed, PumpState};
use crate::hold_timer::{HoldTick, HoldTimer};
use crate::settings::ControllerState;

use super::commands::PanelCommand;
use super::events::AppEvent;
use super::ports::{
    ActuatorPort, Clock, ConfigError, ControlId, EventSink, ExpiryDelegate, PresentationSink,
    StatePort,
};

// ───────────────────────────────────────────────────────────────
// Expiry → shutdown bridge
// ───────────────────────────────────────────────────────────────

/// Turns every output off when the hold runs out.
struct ExpiryShutdown<'a, A: ActuatorPort> {
    outputs: &'a mut CoolerOutputs,
    hw: &'a mut A,
}

impl<A: ActuatorPort> ExpiryDelegate for ExpiryShutdown<'_, A> {
    fn on_hold_expired(&mut self) {
        self.outputs.all_off(&mut *self.hw);
    }
}

// ───────────────────────────────────────────────────────────────
// Control enablement cache
// ───────────────────────────────────────────────────────────────

/// Last enablement pushed to the display, `None` until first pushed.
#[derive(Debug, Default)]
struct Controls {
    cancel: Option<bool>,
    subtract: Option<bool>,
    add: Option<bool>,
}

impl Controls {
    fn slot(&mut self, control: ControlId) -> &mut Option<bool> {
        match control {
            ControlId::CancelHold => &mut self.cancel,
            ControlId::SubtractStep => &mut self.subtract,
            ControlId::AddStep => &mut self.add,
        }
    }

    fn set(&mut self, control: ControlId, enabled: bool, ui: &mut impl PresentationSink) {
        let slot = self.slot(control);
        if *slot != Some(enabled) {
            *slot = Some(enabled);
            ui.set_control_enabled(control, enabled);
        }
    }
}

// ───────────────────────────────────────────────────────────────
// CoolerService
// ───────────────────────────────────────────────────────────────

/// The controller service orchestrates all panel logic.
pub struct CoolerService {
    hold: HoldTimer,
    outputs: CoolerOutputs,
    /// Ceiling for holds built with the "+" control.
    max_hold: TimeDelta,
    controls: Controls,
    tick_count: u64,
    outputs_dirty: bool,
}

impl CoolerService {
    /// Construct the service from configuration.
    ///
    /// Does **not** touch the outputs — call [`start`](Self::start) next.
    pub fn new(config: &CoolerConfig, clock: &dyn Clock) -> Self {
        Self {
            hold: HoldTimer::new(config.hold_step(), clock),
            outputs: CoolerOutputs::new(),
            max_hold: config.max_hold(),
            controls: Controls::default(),
            tick_count: 0,
            outputs_dirty: false,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Switch everything off and paint the initial panel.
    pub fn start(
        &mut self,
        hw: &mut impl ActuatorPort,
        clock: &dyn Clock,
        ui: &mut impl PresentationSink,
        sink: &mut impl EventSink,
    ) {
        self.outputs.all_off(hw);
        self.outputs_dirty = true;
        ui.show_motor(self.outputs.motor());
        ui.show_pump(self.outputs.pump());
        self.refresh_hold(clock, ui, None);
        sink.emit(&AppEvent::Started);
        info!(
            "CoolerService started (step {} min, max hold {} min)",
            self.hold.step().num_minutes(),
            self.max_hold.num_minutes()
        );
    }

    // ── Command handling ──────────────────────────────────────

    /// Process one panel command.  Returns `Break` once the panel should close.
    pub fn handle_command(
        &mut self,
        cmd: PanelCommand,
        hw: &mut impl ActuatorPort,
        clock: &dyn Clock,
        ui: &mut impl PresentationSink,
        sink: &mut impl EventSink,
    ) -> ControlFlow<()> {
        debug!("Command: {:?}", cmd);
        match cmd {
            PanelCommand::CycleMotor => {
                let next = self.outputs.motor().next();
                self.change_motor(next, hw, ui, sink);
            }
            PanelCommand::SetMotor(speed) => self.change_motor(speed, hw, ui, sink),
            PanelCommand::CyclePump => {
                let next = self.outputs.pump().next();
                self.change_pump(next, hw, ui, sink);
            }
            PanelCommand::SetPump(state) => self.change_pump(state, hw, ui, sink),
            PanelCommand::AddStep => {
                if self.add_allowed(clock) {
                    self.hold.adjust(self.hold.step(), clock);
                    self.hold_moved(sink);
                } else {
                    warn!(
                        "Hold already at the {} min maximum",
                        self.max_hold.num_minutes()
                    );
                }
                self.refresh_hold(clock, ui, None);
            }
            PanelCommand::SubtractStep => {
                if self.hold.subtract_allowed(clock) {
                    self.hold.adjust(-self.hold.step(), clock);
                    self.hold_moved(sink);
                } else {
                    debug!("Subtract ignored: less than one step remaining");
                }
                self.refresh_hold(clock, ui, None);
            }
            PanelCommand::CancelHold => {
                if self.hold.is_active() {
                    sink.emit(&AppEvent::HoldCancelled);
                }
                self.hold.adjust(TimeDelta::zero(), clock);
                self.refresh_hold(clock, ui, None);
            }
            PanelCommand::Exit => {
                self.hold.cancel();
                self.shutdown(hw, ui, sink);
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one periodic hold check and refresh the panel.
    pub fn tick<A: ActuatorPort>(
        &mut self,
        hw: &mut A,
        clock: &dyn Clock,
        ui: &mut impl PresentationSink,
        sink: &mut impl EventSink,
    ) -> HoldTick {
        self.tick_count += 1;

        let mut shutdown = ExpiryShutdown {
            outputs: &mut self.outputs,
            hw,
        };
        let result = self.hold.tick(clock, &mut shutdown);

        if result == HoldTick::Expired {
            self.outputs_dirty = true;
            ui.show_motor(self.outputs.motor());
            ui.show_pump(self.outputs.pump());
            sink.emit(&AppEvent::HoldExpired);
            sink.emit(&AppEvent::SystemOff);
        }

        let subtract = match result {
            HoldTick::Running {
                subtract_enabled, ..
            } => Some(subtract_enabled),
            HoldTick::Expired | HoldTick::Inactive => None,
        };
        self.refresh_hold(clock, ui, subtract);
        result
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn hold(&self) -> &HoldTimer {
        &self.hold
    }

    pub fn outputs(&self) -> CoolerOutputs {
        self.outputs
    }

    /// Total ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Whether a new step fits under the hold ceiling.
    pub fn add_allowed(&self, clock: &dyn Clock) -> bool {
        let step = self.hold.step();
        match self.hold.remaining(clock) {
            Some(remaining) => remaining + step <= self.max_hold,
            None => step <= self.max_hold,
        }
    }

    // ── Internal ──────────────────────────────────────────────

    fn change_motor(
        &mut self,
        speed: MotorSpeed,
        hw: &mut impl ActuatorPort,
        ui: &mut impl PresentationSink,
        sink: &mut impl EventSink,
    ) {
        self.outputs.set_motor(speed, hw);
        self.outputs_dirty = true;
        ui.show_motor(speed);
        sink.emit(&AppEvent::MotorChanged(speed));
    }

    fn change_pump(
        &mut self,
        state: PumpState,
        hw: &mut impl ActuatorPort,
        ui: &mut impl PresentationSink,
        sink: &mut impl EventSink,
    ) {
        self.outputs.set_pump(state, hw);
        self.outputs_dirty = true;
        ui.show_pump(state);
        sink.emit(&AppEvent::PumpChanged(state));
    }

    fn shutdown(
        &mut self,
        hw: &mut impl ActuatorPort,
        ui: &mut impl PresentationSink,
        sink: &mut impl EventSink,
    ) {
        self.outputs.all_off(hw);
        self.outputs_dirty = true;
        ui.show_motor(self.outputs.motor());
        ui.show_pump(self.outputs.pump());
        sink.emit(&AppEvent::SystemOff);
    }

    fn hold_moved(&self, sink: &mut impl EventSink) {
        if let Some(deadline) = self.hold.deadline() {
            sink.emit(&AppEvent::HoldChanged { deadline });
        }
    }

    /// Push the time label, the remaining time and the hold controls.  In
    /// IDLE both cancel and subtract are disabled.  `subtract` carries the
    /// verdict of a tick that just ran, so both agree on the same instant.
    fn refresh_hold(
        &mut self,
        clock: &dyn Clock,
        ui: &mut impl PresentationSink,
        subtract: Option<bool>,
    ) {
        let display = self.hold.refresh(clock);
        ui.show_time(&display.label, display.emphasized());
        ui.show_remaining(&self.hold.remaining_text(clock));

        let held = display.hold_controls_available();
        let subtract =
            held && subtract.unwrap_or_else(|| self.hold.subtract_allowed(clock));
        let add = self.add_allowed(clock);
        self.controls.set(ControlId::CancelHold, held, ui);
        self.controls.set(ControlId::SubtractStep, subtract, ui);
        self.controls.set(ControlId::AddStep, add, ui);
    }

    // ── Persisted levels ──────────────────────────────────────

    /// Whether the outputs changed since the last successful save.
    pub fn is_outputs_dirty(&self) -> bool {
        self.outputs_dirty
    }

    /// Persist the commanded levels if they changed.
    /// Returns `true` if the state was saved; save failures stay dirty and
    /// are retried on the next call.
    ///
    /// Only a missing file is replaced with defaults.  An unreadable file
    /// is left as it is and the change is not persisted.
    pub fn save_if_dirty(&mut self, store: &impl StatePort) -> bool {
        if !self.outputs_dirty {
            return false;
        }
        let mut state = match store.load() {
            Ok(state) => state,
            Err(ConfigError::NotFound) => {
                info!("No state file, creating one with defaults");
                ControllerState::default()
            }
            Err(e) => {
                warn!("State file left untouched, levels not saved: {}", e);
                self.outputs_dirty = false;
                return false;
            }
        };
        state.record(&self.outputs);
        match store.save(&state) {
            Ok(()) => {
                self.outputs_dirty = false;
                debug!("Levels saved");
                true
            }
            Err(e) => {
                warn!("Saving levels failed: {}", e);
                false
            }
        }
    }
}
