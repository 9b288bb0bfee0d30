//! User configuration.
//!
//! Stored as YAML. Every field has a default, so an empty file (or no file at
//! all) yields a working configuration:
//!
//! ```yaml
//! version: 1
//! refresh_secs: 1
//! unit: celsius
//! thresholds:
//!   medium: 60.0
//!   high: 80.0
//! colors:
//!   low: "#00C000"
//!   medium: "#FFA500"
//!   high: "#FF0000"
//! history_length: 60
//! log_dir: "."
//! ```
//!
//! Thresholds are compared against readings already converted to `unit`.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::monitor::classify::{TierColors, TierConfig};
use crate::monitor::state::MonitorState;
use crate::monitor::units::TempUnit;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Refresh intervals offered to the user, in seconds.
pub const REFRESH_PRESETS: [u64; 7] = [1, 2, 5, 10, 15, 30, 60];

/// Checks that `secs` is one of [`REFRESH_PRESETS`].
///
/// # Errors
///
/// Returns [`Error::InvalidRefresh`] otherwise.
pub fn refresh_interval(secs: u64) -> Result<Duration> {
    if REFRESH_PRESETS.contains(&secs) {
        Ok(Duration::from_secs(secs))
    } else {
        Err(Error::InvalidRefresh(secs))
    }
}

/// Tier thresholds in the display unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Readings at or above this are `Medium`.
    #[serde(default = "default_medium")]
    pub medium: f64,
    /// Readings at or above this are `High`.
    #[serde(default = "default_high")]
    pub high: f64,
}

fn default_medium() -> f64 {
    60.0
}
fn default_high() -> f64 {
    80.0
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { medium: default_medium(), high: default_high() }
    }
}

/// Tier colors as hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorConfig {
    /// Color for low readings.
    #[serde(default = "default_low_color")]
    pub low: String,
    /// Color for medium readings.
    #[serde(default = "default_medium_color")]
    pub medium: String,
    /// Color for high readings.
    #[serde(default = "default_high_color")]
    pub high: String,
}

fn default_low_color() -> String {
    "#00C000".to_string()
}
fn default_medium_color() -> String {
    "#FFA500".to_string()
}
fn default_high_color() -> String {
    "#FF0000".to_string()
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self { low: default_low_color(), medium: default_medium_color(), high: default_high_color() }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Seconds between ticks; one of [`REFRESH_PRESETS`].
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,

    /// Display unit.
    #[serde(default)]
    pub unit: TempUnit,

    /// Tier thresholds.
    #[serde(default)]
    pub thresholds: Thresholds,

    /// Tier colors.
    #[serde(default)]
    pub colors: ColorConfig,

    /// Samples kept per channel.
    #[serde(default = "default_history_length")]
    pub history_length: usize,

    /// Directory for row logs and summaries.
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

fn default_version() -> u32 {
    1
}
fn default_refresh_secs() -> u64 {
    1
}
fn default_history_length() -> usize {
    60
}
fn default_log_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            refresh_secs: default_refresh_secs(),
            unit: TempUnit::default(),
            thresholds: Thresholds::default(),
            colors: ColorConfig::default(),
            history_length: default_history_length(),
            log_dir: default_log_dir(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location (`<config dir>/traytemp/config.yaml`).
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("traytemp").join("config.yaml"))
    }

    /// Loads and validates configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;

        Self::parse(&content)
    }

    /// Parses and validates configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails, or a validation
    /// error for out-of-range values.
    pub fn parse(yaml: &str) -> Result<Self> {
        // An empty document means "all defaults".
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::ConfigParse { line, message: e.to_string() }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("using default configuration: {e}");
                Self::default()
            }
        }
    }

    /// Writes the configuration as YAML, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let yaml = serde_yaml_ng::to_string(self)
            .map_err(|e| Error::ConfigParse { line: 0, message: e.to_string() })?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Checks every value that has a constrained range.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<()> {
        if self.history_length == 0 {
            return Err(Error::InvalidCapacity);
        }
        self.tier_config().map(|_| ())
    }

    /// Builds the runtime tier configuration.
    ///
    /// # Errors
    ///
    /// Returns an error for an unsupported refresh interval, unparsable
    /// colors or inverted thresholds.
    pub fn tier_config(&self) -> Result<TierConfig> {
        let colors = TierColors {
            low: Rgba::from_hex(&self.colors.low)?,
            medium: Rgba::from_hex(&self.colors.medium)?,
            high: Rgba::from_hex(&self.colors.high)?,
        };
        TierConfig::new(
            self.thresholds.medium,
            self.thresholds.high,
            colors,
            self.unit,
            refresh_interval(self.refresh_secs)?,
        )
    }

    /// Copies user-changeable runtime settings back for persistence.
    pub fn remember(&mut self, state: &MonitorState) {
        self.unit = state.tiers().unit();
        self.refresh_secs = state.tiers().refresh().as_secs();
        self.history_length = state.history_length();
    }
}
