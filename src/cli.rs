//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::settings::STATE_FILE_NAME;

#[derive(Debug, Parser)]
#[command(
    name = "swampcooler",
    about = "Evaporative air cooler controller: motor, pump and hold timer",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Print the resulting configuration and enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// State file holding the last-set levels
    #[arg(long, global = true, env = "SWAMPCOOLER_STATE", default_value = STATE_FILE_NAME)]
    pub state_file: PathBuf,

    /// Controller configuration (JSON); defaults apply when omitted
    #[arg(long, global = true, env = "SWAMPCOOLER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log relay writes instead of driving GPIO
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set motor, pump or hold and save them to the state file
    Set {
        /// Motor speed: 0 = off, 1 = low, 2 = high
        #[arg(short, long)]
        motor: Option<String>,

        /// Pump: 0 = off, 1 = on
        #[arg(short, long)]
        pump: Option<String>,

        /// Time hold: true or false
        #[arg(short = 'l', long)]
        hold: Option<String>,
    },

    /// Run the interactive control panel
    Panel {
        /// Minutes added or removed per hold step
        #[arg(long)]
        step_minutes: Option<u32>,
    },
}
