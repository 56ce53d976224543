//! JSON state file adapter.
//!
//! Implements [`StatePort`] on a pretty-printed JSON document (four-space
//! indent) so the file stays hand-editable.
//!
//! - Missing file: [`ConfigError::NotFound`], callers fall back to defaults.
//! - Unparseable file: [`ConfigError::Corrupted`] with the parser message.
//! - Out-of-range levels are rejected on save and on load.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::app::ports::{ConfigError, StatePort};
use crate::cooler::{MOTOR_SPEED_MAX, PUMP_STATE_MAX};
use crate::settings::{ControllerState, STATE_FILE_NAME};

const INDENT: &[u8] = b"    ";

pub struct JsonStateFile {
    path: PathBuf,
}

impl Default for JsonStateFile {
    fn default() -> Self {
        Self::new(STATE_FILE_NAME)
    }
}

impl JsonStateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn validate_state(state: &ControllerState) -> Result<(), ConfigError> {
    if state.motor > MOTOR_SPEED_MAX {
        return Err(ConfigError::ValidationFailed("motor must be 0–2"));
    }
    if state.pump > PUMP_STATE_MAX {
        return Err(ConfigError::ValidationFailed("pump must be 0–1"));
    }
    Ok(())
}

fn to_pretty_json(state: &ControllerState) -> Result<Vec<u8>, ConfigError> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    state
        .serialize(&mut ser)
        .map_err(|e| ConfigError::Corrupted(e.to_string()))?;
    Ok(buf)
}

impl StatePort for JsonStateFile {
    fn load(&self) -> Result<ControllerState, ConfigError> {
        let text = fs::read_to_string(&self.path)?;
        let state: ControllerState =
            serde_json::from_str(&text).map_err(|e| ConfigError::Corrupted(e.to_string()))?;
        validate_state(&state)?;
        debug!("JsonStateFile: loaded {}", self.path.display());
        Ok(state)
    }

    fn save(&self, state: &ControllerState) -> Result<(), ConfigError> {
        validate_state(state)?;
        let bytes = to_pretty_json(state)?;
        fs::write(&self.path, bytes)?;
        info!("JsonStateFile: saved {}", self.path.display());
        Ok(())
    }
}
