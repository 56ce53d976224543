//! Push-button gesture recognition.
//!
//! Buttons are active-low with pull-ups: pressed reads LOW.  The driver is
//! polled from the panel loop with a monotonic millisecond timestamp and
//! reports at most one gesture per poll:
//!
//! - **Click**: released after more than `CLICK_MIN_MS` and before
//!   `LONG_PRESS_MS`.  Shorter pulses are contact bounce.
//! - **LongPress**: reported once, as soon as the hold reaches
//!   `LONG_PRESS_MS`.  The release that follows produces nothing.

use embedded_hal::digital::InputPin;
use log::warn;

use crate::app::commands::PanelCommand;

pub const CLICK_MIN_MS: u64 = 25;
pub const LONG_PRESS_MS: u64 = 2_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    Click,
    LongPress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GestureState {
    Released,
    Pressed { since_ms: u64, long_reported: bool },
}

pub struct ButtonDriver<P> {
    name: &'static str,
    pin: P,
    state: GestureState,
}

impl<P: InputPin> ButtonDriver<P> {
    pub fn new(name: &'static str, pin: P) -> Self {
        Self {
            name,
            pin,
            state: GestureState::Released,
        }
    }

    pub fn poll(&mut self, now_ms: u64) -> Option<ButtonEvent> {
        let pressed = match self.pin.is_low() {
            Ok(level) => level,
            Err(e) => {
                warn!("Button {}: read failed: {:?}", self.name, e);
                return None;
            }
        };

        match (self.state, pressed) {
            (GestureState::Released, false) => None,
            (GestureState::Released, true) => {
                self.state = GestureState::Pressed {
                    since_ms: now_ms,
                    long_reported: false,
                };
                None
            }
            (
                GestureState::Pressed {
                    since_ms,
                    long_reported: false,
                },
                true,
            ) if now_ms.saturating_sub(since_ms) >= LONG_PRESS_MS => {
                self.state = GestureState::Pressed {
                    since_ms,
                    long_reported: true,
                };
                Some(ButtonEvent::LongPress)
            }
            (GestureState::Pressed { .. }, true) => None,
            (
                GestureState::Pressed {
                    since_ms,
                    long_reported,
                },
                false,
            ) => {
                self.state = GestureState::Released;
                let held = now_ms.saturating_sub(since_ms);
                (!long_reported && held > CLICK_MIN_MS && held < LONG_PRESS_MS)
                    .then_some(ButtonEvent::Click)
            }
        }
    }
}

/// The three front-panel buttons, translated to panel commands.
///
/// Motor and pump cycle on click.  The hold button adds a step on click
/// and cancels the hold on long press.
pub struct PanelButtons<P> {
    motor: ButtonDriver<P>,
    pump: ButtonDriver<P>,
    hold: ButtonDriver<P>,
}

impl<P: InputPin> PanelButtons<P> {
    pub fn new(motor: P, pump: P, hold: P) -> Self {
        Self {
            motor: ButtonDriver::new("motor", motor),
            pump: ButtonDriver::new("pump", pump),
            hold: ButtonDriver::new("hold", hold),
        }
    }

    pub fn poll(&mut self, now_ms: u64, mut emit: impl FnMut(PanelCommand)) {
        if let Some(ButtonEvent::Click) = self.motor.poll(now_ms) {
            emit(PanelCommand::CycleMotor);
        }
        if let Some(ButtonEvent::Click) = self.pump.poll(now_ms) {
            emit(PanelCommand::CyclePump);
        }
        match self.hold.poll(now_ms) {
            Some(ButtonEvent::Click) => emit(PanelCommand::AddStep),
            Some(ButtonEvent::LongPress) => emit(PanelCommand::CancelHold),
            None => {}
        }
    }
}
