//! SwampCooler — main entry point
//!
//! Hexagonal architecture with a single-consumer panel loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  RelayBoard     TerminalPanel      LogEventSink  JsonStateFile │
//! │  (Actuator)     (Presentation)     (EventSink)   (StatePort)   │
//! │  SystemClock    console reader + buttons → EventQueue          │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │             CoolerService (pure logic)                 │    │
//! │  │  HoldTimer · CoolerOutputs · control enablement        │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{self, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use tracing_subscriber::EnvFilter;

use swampcooler::adapters::clock::SystemClock;
use swampcooler::adapters::hardware;
use swampcooler::adapters::log_sink::LogEventSink;
use swampcooler::adapters::state_file::JsonStateFile;
use swampcooler::adapters::terminal::{KEY_HELP, TerminalPanel};
use swampcooler::cli::{Cli, Command};
use swampcooler::config::CoolerConfig;
use swampcooler::events::{Event, spawn_console_reader};
use swampcooler::panel::{PanelIo, PanelLoop};
use swampcooler::settings::{SettingsRequest, run_config_tool};

const PROJECT_NAME: &str = "Evaporative Air controller";
const SEPARATOR: &str =
    "###############################################################################";

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    println!("{SEPARATOR}");
    println!("{PROJECT_NAME} v{}", env!("CARGO_PKG_VERSION"));

    let result = run(cli);

    println!("{SEPARATOR}");
    match &result {
        Ok(()) => println!("{PROJECT_NAME} Done!"),
        Err(_) => println!("{PROJECT_NAME} Failed!"),
    }
    result
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        verbose,
        state_file,
        config: config_path,
        dry_run,
        command,
    } = cli;

    let mut config = match config_path.as_deref() {
        Some(path) => CoolerConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CoolerConfig::default(),
    };
    debug!("{:?}", config);

    match command {
        Command::Set { motor, pump, hold } => {
            let request =
                SettingsRequest::parse(motor.as_deref(), pump.as_deref(), hold.as_deref())?;
            run_set(&config, &state_file, dry_run, verbose, &request)
        }
        Command::Panel { step_minutes } => {
            if let Some(minutes) = step_minutes {
                config.hold_step_minutes = minutes;
                config.validate().context("--step-minutes")?;
            }
            run_panel(&config, &state_file, dry_run)
        }
    }
}

// ── Config tool ───────────────────────────────────────────────

fn run_set(
    config: &CoolerConfig,
    state_file: &Path,
    dry_run: bool,
    verbose: bool,
    request: &SettingsRequest,
) -> Result<()> {
    if verbose {
        println!("Using state file {}", state_file.display());
    }
    let store = JsonStateFile::new(state_file);
    let mut board = hardware::open(config, dry_run).context("relay board")?;
    run_config_tool(&store, request, &mut board.relays, verbose, &mut io::stdout().lock())?;
    Ok(())
}

// ── Panel ─────────────────────────────────────────────────────

fn run_panel(config: &CoolerConfig, state_file: &Path, dry_run: bool) -> Result<()> {
    let mut board = hardware::open(config, dry_run).context("relay board")?;
    let store = JsonStateFile::new(state_file);
    let clock = SystemClock::new();
    let mut ui = TerminalPanel::stdout();
    let mut sink = LogEventSink::new();

    let mut panel = PanelLoop::new(config, &clock, board.buttons.is_none());
    // Detached: blocks on stdin until EOF or process exit.
    let _console = spawn_console_reader(BufReader::new(io::stdin()), panel.queue().sender());
    println!("{KEY_HELP}");

    let mut ports = PanelIo {
        hw: &mut board.relays,
        clock: &clock,
        ui: &mut ui,
        sink: &mut sink,
        store: &store,
    };
    panel.start(clock.uptime_ms(), &mut ports);
    info!("System ready. Entering panel loop.");

    loop {
        if let Some(buttons) = board.buttons.as_mut() {
            buttons.poll(clock.uptime_ms(), |cmd| panel.queue().push(Event::Command(cmd)));
        }
        if panel.step(clock.uptime_ms(), &mut ports).is_break() {
            break;
        }
    }

    println!("Goodbye!");
    Ok(())
}
