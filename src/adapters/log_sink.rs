//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the process logger (stderr via `tracing-subscriber`).

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::hold_timer::LABEL_TIME_FORMAT;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => info!("START | all outputs off"),
            AppEvent::MotorChanged(speed) => info!("MOTOR | {}", speed.label()),
            AppEvent::PumpChanged(state) => info!("PUMP  | {}", state.label()),
            AppEvent::HoldChanged { deadline } => {
                info!("HOLD  | until {}", deadline.format(LABEL_TIME_FORMAT));
            }
            AppEvent::HoldCancelled => info!("HOLD  | cancelled"),
            AppEvent::HoldExpired => info!("HOLD  | expired"),
            AppEvent::SystemOff => info!("OFF   | motor and pump off"),
        }
    }
}
