//! User commands applied between ticks.
//!
//! The textual forms accepted by [`Command::from_str`]:
//!
//! | Text            | Command                         |
//! |-----------------|---------------------------------|
//! | `celsius`       | `SetUnit(Celsius)`              |
//! | `fahrenheit`    | `SetUnit(Fahrenheit)`           |
//! | `unit`          | `ToggleUnit`                    |
//! | `refresh <s>`   | `SetRefresh(s)`                 |
//! | `reset`         | `ResetStats`                    |
//! | `history <n>`   | `SetHistory(n)`                 |
//! | `log`           | `ToggleLog`                     |
//! | `log start`     | `StartLog`                      |
//! | `log stop`      | `StopLog`                       |
//! | `exit`, `quit`  | `Exit`                          |

use crate::error::{Error, Result};
use crate::monitor::config::refresh_interval;
use crate::monitor::state::MonitorState;
use crate::monitor::units::TempUnit;
use chrono::NaiveDateTime;
use std::path::PathBuf;
use std::str::FromStr;

/// A user request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Switch the display unit.
    SetUnit(TempUnit),
    /// Switch to the other display unit.
    ToggleUnit,
    /// Change the refresh interval, in seconds.
    SetRefresh(u64),
    /// Clear every rolling window.
    ResetStats,
    /// Keep this many samples per channel.
    SetHistory(usize),
    /// Start logging if idle, stop otherwise.
    ToggleLog,
    /// Start logging.
    StartLog,
    /// Stop logging and write the summary.
    StopLog,
    /// Leave the sampling loop.
    Exit,
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lowered: Vec<String> = s.split_whitespace().map(str::to_ascii_lowercase).collect();
        let words: Vec<&str> = lowered.iter().map(String::as_str).collect();

        match words.as_slice() {
            ["celsius" | "c"] => Ok(Self::SetUnit(TempUnit::Celsius)),
            ["fahrenheit" | "f"] => Ok(Self::SetUnit(TempUnit::Fahrenheit)),
            ["unit"] => Ok(Self::ToggleUnit),
            ["refresh", secs] => secs
                .parse()
                .map(Self::SetRefresh)
                .map_err(|_| Error::UnknownCommand(s.trim().to_string())),
            ["reset"] => Ok(Self::ResetStats),
            ["history", len] => len
                .parse()
                .map(Self::SetHistory)
                .map_err(|_| Error::UnknownCommand(s.trim().to_string())),
            ["log"] => Ok(Self::ToggleLog),
            ["log", "start"] => Ok(Self::StartLog),
            ["log", "stop"] => Ok(Self::StopLog),
            ["exit" | "quit" | "q"] => Ok(Self::Exit),
            _ => Err(Error::UnknownCommand(s.trim().to_string())),
        }
    }
}

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// State changed (or nothing to do); keep ticking.
    Applied,
    /// Logging stopped and the summary was written here.
    LogSaved(PathBuf),
    /// Leave the loop.
    Exit,
}

impl MonitorState {
    /// Applies a command.
    ///
    /// # Errors
    ///
    /// - [`Error::UnitLockedWhileRecording`] for a unit change while logging.
    /// - [`Error::InvalidRefresh`] for an interval outside the presets.
    /// - [`Error::InvalidCapacity`] for a history length of 0.
    /// - Logging session errors from start and stop.
    pub fn apply(&mut self, command: Command, now: NaiveDateTime) -> Result<Outcome> {
        match command {
            Command::SetUnit(unit) => self.change_unit(unit),
            Command::ToggleUnit => self.change_unit(self.tiers.unit().toggled()),
            Command::SetRefresh(secs) => {
                self.tiers.set_refresh(refresh_interval(secs)?);
                log::info!("refresh interval set to {secs}s");
                Ok(Outcome::Applied)
            }
            Command::ResetStats => {
                self.channels.clear_all();
                log::info!("statistics reset");
                Ok(Outcome::Applied)
            }
            Command::SetHistory(len) => {
                self.set_history_length(len)?;
                log::info!("history length set to {len} samples");
                Ok(Outcome::Applied)
            }
            Command::ToggleLog if self.session.is_recording() => self.stop_log(now),
            Command::ToggleLog | Command::StartLog => {
                self.session.start(&mut self.channels, now)?;
                Ok(Outcome::Applied)
            }
            Command::StopLog => self.stop_log(now),
            Command::Exit => Ok(Outcome::Exit),
        }
    }

    fn change_unit(&mut self, unit: TempUnit) -> Result<Outcome> {
        if unit == self.tiers.unit() {
            return Ok(Outcome::Applied);
        }
        if self.session.is_recording() {
            return Err(Error::UnitLockedWhileRecording);
        }
        self.tiers.set_unit(unit);
        log::info!("display unit set to {}", unit.suffix());
        Ok(Outcome::Applied)
    }

    fn stop_log(&mut self, now: NaiveDateTime) -> Result<Outcome> {
        self.session.stop(&self.channels, now).map(Outcome::LogSaved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::classify::TierConfig;
    use crate::monitor::sensors::Channel;
    use std::time::Duration;
    use tempfile::TempDir;

    fn now() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2024-05-01 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn state(dir: &std::path::Path) -> MonitorState {
        MonitorState::new(TierConfig::default(), 4, dir).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("celsius".parse::<Command>().unwrap(), Command::SetUnit(TempUnit::Celsius));
        assert_eq!("  Fahrenheit ".parse::<Command>().unwrap(), Command::SetUnit(TempUnit::Fahrenheit));
        assert_eq!("unit".parse::<Command>().unwrap(), Command::ToggleUnit);
        assert_eq!("refresh 30".parse::<Command>().unwrap(), Command::SetRefresh(30));
        assert_eq!("reset".parse::<Command>().unwrap(), Command::ResetStats);
        assert_eq!("history 10".parse::<Command>().unwrap(), Command::SetHistory(10));
        assert_eq!("log".parse::<Command>().unwrap(), Command::ToggleLog);
        assert_eq!("log start".parse::<Command>().unwrap(), Command::StartLog);
        assert_eq!("LOG  STOP".parse::<Command>().unwrap(), Command::StopLog);
        assert_eq!("exit".parse::<Command>().unwrap(), Command::Exit);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        for text in ["", "kelvin", "refresh", "refresh soon", "history -1", "log pause"] {
            assert!(
                matches!(text.parse::<Command>(), Err(Error::UnknownCommand(_))),
                "{text:?} should not parse"
            );
        }
    }

    #[test]
    fn test_unit_toggle() {
        let tmp = TempDir::new().unwrap();
        let mut state = state(tmp.path());

        state.apply(Command::ToggleUnit, now()).unwrap();
        assert_eq!(state.tiers().unit(), TempUnit::Fahrenheit);
        state.apply(Command::SetUnit(TempUnit::Celsius), now()).unwrap();
        assert_eq!(state.tiers().unit(), TempUnit::Celsius);
    }

    #[test]
    fn test_unit_locked_while_recording() {
        let tmp = TempDir::new().unwrap();
        let mut state = state(tmp.path());
        state.apply(Command::StartLog, now()).unwrap();

        let err = state.apply(Command::ToggleUnit, now()).unwrap_err();
        assert!(matches!(err, Error::UnitLockedWhileRecording));
        assert_eq!(state.tiers().unit(), TempUnit::Celsius);

        // Re-selecting the current unit is harmless.
        state.apply(Command::SetUnit(TempUnit::Celsius), now()).unwrap();
    }

    #[test]
    fn test_refresh_presets_only() {
        let tmp = TempDir::new().unwrap();
        let mut state = state(tmp.path());

        state.apply(Command::SetRefresh(15), now()).unwrap();
        assert_eq!(state.tiers().refresh(), Duration::from_secs(15));

        let err = state.apply(Command::SetRefresh(7), now()).unwrap_err();
        assert!(matches!(err, Error::InvalidRefresh(7)));
        assert_eq!(state.tiers().refresh(), Duration::from_secs(15));
    }

    #[test]
    fn test_reset_clears_windows() {
        let tmp = TempDir::new().unwrap();
        let mut state = state(tmp.path());
        let cpu = Channel::new("cpu", "CPU");
        state.channels.push(&cpu, 50.0);

        state.apply(Command::ResetStats, now()).unwrap();

        assert!(state.channels().get(&cpu.key).unwrap().window.is_empty());
    }

    #[test]
    fn test_history_length_shrinks_windows() {
        let tmp = TempDir::new().unwrap();
        let mut state = state(tmp.path());
        let cpu = Channel::new("cpu", "CPU");
        for v in [40.0, 50.0, 60.0] {
            state.channels.push(&cpu, v);
        }

        state.apply(Command::SetHistory(2), now()).unwrap();

        assert_eq!(state.history_length(), 2);
        let window = &state.channels().get(&cpu.key).unwrap().window;
        assert_eq!(window.iter().copied().collect::<Vec<_>>(), vec![50.0, 60.0]);
        assert!(matches!(state.apply(Command::SetHistory(0), now()), Err(Error::InvalidCapacity)));
        assert_eq!(state.history_length(), 2);
    }

    #[test]
    fn test_log_toggle_round_trip() {
        let tmp = TempDir::new().unwrap();
        let mut state = state(tmp.path());

        assert_eq!(state.apply(Command::ToggleLog, now()).unwrap(), Outcome::Applied);
        assert!(state.session().is_recording());

        match state.apply(Command::ToggleLog, now()).unwrap() {
            Outcome::LogSaved(path) => assert!(path.exists()),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(!state.session().is_recording());
    }

    #[test]
    fn test_log_misuse() {
        let tmp = TempDir::new().unwrap();
        let mut state = state(tmp.path());

        assert!(matches!(state.apply(Command::StopLog, now()), Err(Error::NotRecording)));
        state.apply(Command::StartLog, now()).unwrap();
        assert!(matches!(state.apply(Command::StartLog, now()), Err(Error::AlreadyRecording)));
    }

    #[test]
    fn test_exit() {
        let tmp = TempDir::new().unwrap();
        let mut state = state(tmp.path());
        assert_eq!(state.apply(Command::Exit, now()).unwrap(), Outcome::Exit);
    }
}
