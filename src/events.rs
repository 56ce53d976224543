//! Event queue feeding the panel loop.
//!
//! Events are produced by:
//! - the console reader thread (keys → commands, end of input)
//! - the loop itself (button gestures)
//!
//! Events are consumed by the panel loop, one at a time in FIFO order.
//! Only the loop touches the controller service, so every producer goes
//! through this queue.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Console     │────▶│              │     │              │
//! │ Buttons     │────▶│  Event Queue │────▶│  Panel Loop  │
//! │             │     │    (mpsc)    │     │  (consumer)  │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```

use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use log::{debug, warn};

use crate::adapters::terminal::parse_key;
use crate::app::commands::PanelCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A command from any input source.
    Command(PanelCommand),
    /// The console reached end of input.
    InputClosed,
}

pub struct EventQueue {
    tx: Sender<Event>,
    rx: Receiver<Event>,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    /// Producer handle for another thread.
    pub fn sender(&self) -> Sender<Event> {
        self.tx.clone()
    }

    /// Push from the consumer thread itself.
    pub fn push(&self, event: Event) {
        // The receiver lives in `self`, so the send cannot fail.
        let _ = self.tx.send(event);
    }

    /// Wait up to `timeout` for the next event.
    pub fn wait(&self, timeout: Duration) -> Option<Event> {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}

/// Read console lines on a background thread until end of input.
///
/// Unknown keys are reported on the log and skipped.  The thread ends on
/// EOF, on a read error, or once the queue is gone.
pub fn spawn_console_reader<R>(input: R, tx: Sender<Event>) -> thread::JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        for line in input.lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    warn!("Console read failed: {}", e);
                    break;
                }
            };
            match parse_key(&line) {
                Some(cmd) => {
                    if tx.send(Event::Command(cmd)).is_err() {
                        return;
                    }
                }
                None if line.trim().is_empty() => {}
                None => warn!("Unknown key {:?}", line.trim()),
            }
        }
        debug!("Console input closed");
        let _ = tx.send(Event::InputClosed);
    })
}
