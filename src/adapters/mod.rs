//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter      | Implements        | Connects to                 |
//! |--------------|-------------------|-----------------------------|
//! | `clock`      | Clock             | System wall clock           |
//! | `hardware`   | ActuatorPort      | Relay board (rppal / dry)   |
//! | `log_sink`   | EventSink         | Process log                 |
//! | `state_file` | StatePort         | `airConf.json`              |
//! | `terminal`   | PresentationSink  | stdout + console keys       |

pub mod clock;
pub mod hardware;
pub mod log_sink;
pub mod state_file;
pub mod terminal;
