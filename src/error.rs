//! Unified error types for the SwampCooler controller.
//!
//! A single `Error` enum that every subsystem can convert into, keeping
//! the binary's error handling uniform.  The hold timer itself is
//! infallible; everything here comes from user input, configuration
//! files, or GPIO bring-up.

use core::fmt;

use crate::app::ports::ConfigError;
use crate::settings::SettingError;

// ---------------------------------------------------------------------------
// Top-level controller error
// ---------------------------------------------------------------------------

/// Every fallible operation in the library funnels into this type.
#[derive(Debug)]
pub enum Error {
    /// A command-line value was out of range or malformed.
    Setting(SettingError),
    /// Runtime configuration or the state file could not be used.
    Config(ConfigError),
    /// Peripheral initialisation failed.
    Init(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Setting(e) => write!(f, "setting: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Setting(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Init(_) => None,
        }
    }
}

impl From<SettingError> for Error {
    fn from(e: SettingError) -> Self {
        Self::Setting(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
