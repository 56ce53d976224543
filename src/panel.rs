//! Interactive panel loop.
//!
//! Single consumer: every [`CoolerService`] call happens here.  One
//! [`step`](PanelLoop::step) waits up to the poll interval for an event,
//! handles it, runs the hold tick when due and saves changed levels.
//!
//! Time for tick scheduling is a monotonic millisecond count supplied by
//! the caller; the wall clock only feeds the hold timer.

use core::ops::ControlFlow;
use std::time::Duration;

use log::{debug, info};

use crate::app::commands::PanelCommand;
use crate::app::ports::{ActuatorPort, Clock, EventSink, PresentationSink, StatePort};
use crate::app::service::CoolerService;
use crate::config::CoolerConfig;
use crate::events::{Event, EventQueue};

/// Borrowed adapters for one loop step.
pub struct PanelIo<'a, A, U, E, S> {
    pub hw: &'a mut A,
    pub clock: &'a dyn Clock,
    pub ui: &'a mut U,
    pub sink: &'a mut E,
    pub store: &'a S,
}

pub struct PanelLoop {
    service: CoolerService,
    queue: EventQueue,
    poll: Duration,
    tick_interval_ms: u64,
    next_tick_ms: u64,
    /// With no physical buttons, closing the console leaves nothing to
    /// control the cooler with.
    exit_on_input_closed: bool,
}

impl PanelLoop {
    pub fn new(config: &CoolerConfig, clock: &dyn Clock, exit_on_input_closed: bool) -> Self {
        Self {
            service: CoolerService::new(config, clock),
            queue: EventQueue::new(),
            poll: Duration::from_millis(u64::from(config.poll_interval_ms)),
            tick_interval_ms: u64::from(config.tick_interval_ms),
            next_tick_ms: 0,
            exit_on_input_closed,
        }
    }

    pub fn service(&self) -> &CoolerService {
        &self.service
    }

    pub fn queue(&self) -> &EventQueue {
        &self.queue
    }

    pub fn start<A, U, E, S>(&mut self, now_ms: u64, io: &mut PanelIo<'_, A, U, E, S>)
    where
        A: ActuatorPort,
        U: PresentationSink,
        E: EventSink,
        S: StatePort,
    {
        self.service
            .start(&mut *io.hw, io.clock, &mut *io.ui, &mut *io.sink);
        self.next_tick_ms = now_ms + self.tick_interval_ms;
    }

    pub fn step<A, U, E, S>(&mut self, now_ms: u64, io: &mut PanelIo<'_, A, U, E, S>) -> ControlFlow<()>
    where
        A: ActuatorPort,
        U: PresentationSink,
        E: EventSink,
        S: StatePort,
    {
        if let Some(cmd) = self.queue.wait(self.poll).and_then(|e| self.command_for(e)) {
            let flow = self
                .service
                .handle_command(cmd, &mut *io.hw, io.clock, &mut *io.ui, &mut *io.sink);
            if flow.is_break() {
                self.service.save_if_dirty(io.store);
                return flow;
            }
        }

        if now_ms >= self.next_tick_ms {
            self.service
                .tick(&mut *io.hw, io.clock, &mut *io.ui, &mut *io.sink);
            self.next_tick_ms = now_ms + self.tick_interval_ms;
        }

        self.service.save_if_dirty(io.store);
        ControlFlow::Continue(())
    }

    fn command_for(&self, event: Event) -> Option<PanelCommand> {
        match event {
            Event::Command(cmd) => Some(cmd),
            Event::InputClosed if self.exit_on_input_closed => {
                info!("Console closed, shutting down");
                Some(PanelCommand::Exit)
            }
            Event::InputClosed => {
                debug!("Console closed, buttons stay active");
                None
            }
        }
    }
}
