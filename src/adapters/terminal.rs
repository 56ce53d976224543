//! Console panel adapter.
//!
//! Renders the panel as plain lines on a writer (stdout in the binary)
//! and maps console keys to [`PanelCommand`]s.  The panel is refreshed on
//! every tick, so unchanged values are suppressed here to keep the
//! console readable.

use std::io::{self, Write};

use log::warn;

use crate::app::commands::PanelCommand;
use crate::app::ports::{ControlId, PresentationSink};
use crate::cooler::{MotorSpeed, PumpState};

pub const KEY_HELP: &str =
    "Keys: m = motor speed, p = pump, + = add hold, - = shorten hold, c = cancel hold, x = exit";

/// Map one line of console input to a command.  Case and surrounding
/// whitespace are ignored; unknown input yields `None`.
pub fn parse_key(line: &str) -> Option<PanelCommand> {
    match line.trim().to_ascii_lowercase().as_str() {
        "m" => Some(PanelCommand::CycleMotor),
        "p" => Some(PanelCommand::CyclePump),
        "+" => Some(PanelCommand::AddStep),
        "-" => Some(PanelCommand::SubtractStep),
        "c" => Some(PanelCommand::CancelHold),
        "x" | "q" => Some(PanelCommand::Exit),
        _ => None,
    }
}

pub struct TerminalPanel<W = io::Stdout> {
    out: W,
    time: Option<(String, bool)>,
    remaining: Option<String>,
    motor: Option<MotorSpeed>,
    pump: Option<PumpState>,
    controls: [Option<bool>; ControlId::ALL.len()],
}

impl TerminalPanel<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalPanel<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            time: None,
            remaining: None,
            motor: None,
            pump: None,
            controls: [None; ControlId::ALL.len()],
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}").and_then(|()| self.out.flush()) {
            warn!("Panel write failed: {}", e);
        }
    }
}

fn control_index(control: ControlId) -> usize {
    match control {
        ControlId::CancelHold => 0,
        ControlId::SubtractStep => 1,
        ControlId::AddStep => 2,
    }
}

impl<W: Write> PresentationSink for TerminalPanel<W> {
    fn show_time(&mut self, label: &str, emphasized: bool) {
        if self
            .time
            .as_ref()
            .is_some_and(|(l, e)| l == label && *e == emphasized)
        {
            return;
        }
        self.time = Some((label.to_owned(), emphasized));
        if emphasized {
            self.line(&format!("** {label} **"));
        } else {
            self.line(label);
        }
    }

    fn show_remaining(&mut self, text: &str) {
        if self.remaining.as_deref() == Some(text) {
            return;
        }
        self.remaining = Some(text.to_owned());
        self.line(&format!("Remaining: {text}"));
    }

    fn show_motor(&mut self, speed: MotorSpeed) {
        if self.motor.replace(speed) != Some(speed) {
            self.line(&format!("Motor: {}", speed.label()));
        }
    }

    fn show_pump(&mut self, state: PumpState) {
        if self.pump.replace(state) != Some(state) {
            self.line(&format!("Pump: {}", state.label()));
        }
    }

    fn set_control_enabled(&mut self, control: ControlId, enabled: bool) {
        let slot = &mut self.controls[control_index(control)];
        if slot.replace(enabled) != Some(enabled) {
            let state = if enabled { "enabled" } else { "disabled" };
            self.line(&format!("[{}] {}", control.label(), state));
        }
    }
}
