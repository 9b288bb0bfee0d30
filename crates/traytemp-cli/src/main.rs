//! traytemp: hardware temperatures as a status glyph.
//!
//! Samples every hwmon device once per refresh interval and keeps
//! `traytemp.png` (the glyph) and `traytemp.txt` (the tooltip) up to date in
//! the output directory. Commands are read from stdin, one per line:
//!
//! ```text
//! celsius | fahrenheit | unit       display unit
//! refresh <secs>                    1, 2, 5, 10, 15, 30 or 60
//! reset                             clear rolling statistics
//! history <n>                       samples kept per channel
//! log | log start | log stop        CSV session logging
//! exit                              quit
//! ```
//!
//! Run: `traytemp --out-dir /run/user/1000/traytemp`

#![cfg_attr(test, allow(clippy::unwrap_used))]

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{ArgAction, Parser, ValueEnum};
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use traytemp::glyph::GlyphLayout;
use traytemp::monitor::sensors::HWMON_ROOT;
use traytemp::monitor::{
    Command, Config, HwmonProvider, MonitorState, Outcome, SamplingCycle, TempUnit,
};
use traytemp::output::{PngIndicator, StatusIndicator};

/// traytemp: hardware temperatures as a status glyph
#[derive(Parser, Debug)]
#[command(name = "traytemp")]
#[command(version)]
#[command(about = "Hardware temperature monitor with tiered status glyph and CSV logging", long_about = None)]
struct Cli {
    /// Config file path (defaults to <config dir>/traytemp/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Refresh interval in seconds (1, 2, 5, 10, 15, 30 or 60)
    #[arg(short, long)]
    refresh: Option<u64>,

    /// Display unit
    #[arg(short, long, value_enum)]
    unit: Option<UnitArg>,

    /// Directory receiving traytemp.png and traytemp.txt
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Directory for row logs and summaries (overrides the config file)
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// hwmon class directory to read sensors from
    #[arg(long, default_value = HWMON_ROOT)]
    hwmon_root: PathBuf,

    /// Stop after this many ticks
    #[arg(long)]
    ticks: Option<u64>,

    /// Do not write unit, refresh and history changes back to the config file
    #[arg(long)]
    no_save: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum UnitArg {
    Celsius,
    Fahrenheit,
}

impl From<UnitArg> for TempUnit {
    fn from(unit: UnitArg) -> Self {
        match unit {
            UnitArg::Celsius => Self::Celsius,
            UnitArg::Fahrenheit => Self::Fahrenheit,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.clone().or_else(Config::default_path);
    let file_config = match &config_path {
        Some(path) if path.exists() => Config::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        _ => Config::default(),
    };
    let config = effective_config(&file_config, &cli)?;

    let mut state = MonitorState::from_config(&config)?;
    let mut provider = HwmonProvider::with_root(&cli.hwmon_root);
    if !provider.is_available() {
        log::warn!("no hwmon devices found under {}", cli.hwmon_root.display());
    }
    let out_dir = cli.out_dir.clone().unwrap_or_else(|| std::env::temp_dir().join("traytemp"));
    let mut indicator = PngIndicator::new(&out_dir);
    let mut cycle = SamplingCycle::new(GlyphLayout::default())?;

    log::info!("writing glyph and tooltip to {}", out_dir.display());
    log::info!(
        "commands: celsius, fahrenheit, unit, refresh <secs>, reset, history <n>, log, log start, log stop, exit"
    );

    let startup = runtime_settings(&state);
    let mut commands = Some(spawn_command_reader());
    let result = run(&cli, &mut cycle, &mut state, &mut provider, &mut indicator, &mut commands);

    if let Err(e) = cycle.shutdown(&mut state) {
        log::warn!("{e}");
    }

    if !cli.no_save && runtime_settings(&state) != startup {
        if let Some(path) = &config_path {
            let mut updated = file_config;
            updated.remember(&state);
            match updated.save(path) {
                Ok(()) => log::info!("settings saved to {}", path.display()),
                Err(e) => log::warn!("failed to save settings to {}: {e}", path.display()),
            }
        }
    }

    result
}

/// Settings the user can change with commands while running.
fn runtime_settings(state: &MonitorState) -> (TempUnit, Duration, usize) {
    (state.tiers().unit(), state.tiers().refresh(), state.history_length())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

/// Config file values with command-line overrides applied.
fn effective_config(file_config: &Config, cli: &Cli) -> Result<Config> {
    let mut config = file_config.clone();
    if let Some(secs) = cli.refresh {
        config.refresh_secs = secs;
    }
    if let Some(unit) = cli.unit {
        config.unit = unit.into();
    }
    if let Some(dir) = &cli.log_dir {
        config.log_dir.clone_from(dir);
    }
    config.validate().context("invalid settings")?;
    Ok(config)
}

fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Parses stdin lines into commands on a background thread.
fn spawn_command_reader() -> Receiver<Command> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Command>() {
                Ok(command) => {
                    if tx.send(command).is_err() {
                        break;
                    }
                }
                Err(e) => log::warn!("{e}"),
            }
        }
    });
    rx
}

/// Waits up to `timeout` for a command. A closed channel is dropped and the
/// remaining time is slept out.
fn next_command(commands: &mut Option<Receiver<Command>>, timeout: Duration) -> Option<Command> {
    let Some(rx) = commands else {
        thread::sleep(timeout);
        return None;
    };
    match rx.recv_timeout(timeout) {
        Ok(command) => Some(command),
        Err(RecvTimeoutError::Timeout) => None,
        Err(RecvTimeoutError::Disconnected) => {
            log::debug!("stdin closed, no more commands");
            *commands = None;
            thread::sleep(timeout);
            None
        }
    }
}

fn run(
    cli: &Cli,
    cycle: &mut SamplingCycle,
    state: &mut MonitorState,
    provider: &mut HwmonProvider,
    indicator: &mut dyn StatusIndicator,
    commands: &mut Option<Receiver<Command>>,
) -> Result<()> {
    let mut ticks = 0u64;

    loop {
        let started = Instant::now();
        let output = cycle.tick(state, provider, now());
        if let Err(e) = cycle.emit(&output, indicator) {
            log::error!("failed to update indicator: {e}");
        }
        ticks += 1;
        if cli.ticks.is_some_and(|max| ticks >= max) {
            return Ok(());
        }

        // A command ends the wait early so its effect shows immediately.
        let deadline = started + state.tiers().refresh();
        let timeout = deadline.saturating_duration_since(Instant::now());
        if let Some(command) = next_command(commands, timeout) {
            match state.apply(command, now()) {
                Ok(Outcome::Applied) => {}
                Ok(Outcome::LogSaved(path)) => log::info!("summary saved to {}", path.display()),
                Ok(Outcome::Exit) => return Ok(()),
                Err(e) => log::warn!("{e}"),
            }
        }
    }
}
