//! Sensor providers.
//!
//! A [`SensorProvider`] enumerates hardware channels and reads their current
//! temperature on demand. [`HwmonProvider`] reads from `/sys/class/hwmon/` on
//! Linux, one channel per hwmon device.

use crate::error::Result;
use std::fmt;
use std::path::{Path, PathBuf};

/// Opaque, stable identity of a channel as assigned by its provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelKey(String);

impl ChannelKey {
    /// Creates a key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One monitored hardware unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    /// Stable key.
    pub key: ChannelKey,
    /// Hardware-type label (e.g. "coretemp", "nvme"), used as log column header
    /// and tooltip label.
    pub label: String,
}

impl Channel {
    /// Creates a channel.
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self { key: ChannelKey::new(key), label: label.into() }
    }
}

/// Source of temperature readings.
pub trait SensorProvider {
    /// Re-enumerates hardware and refreshes cached state before a tick.
    fn refresh(&mut self) {}

    /// Channels in enumeration order. The order should be stable while the
    /// hardware set is unchanged.
    fn channels(&self) -> Vec<Channel>;

    /// Current reading in degrees Celsius, or `None` if the channel has no
    /// reading right now.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying read fails. Callers treat this the
    /// same as "no reading".
    fn read_celsius(&mut self, key: &ChannelKey) -> Result<Option<f64>>;
}

/// Default hwmon class directory.
pub const HWMON_ROOT: &str = "/sys/class/hwmon";

/// Highest `temp<N>_input` index probed per device.
const MAX_TEMP_INPUTS: u32 = 32;

/// Provider backed by the Linux hwmon sysfs interface.
#[derive(Debug)]
pub struct HwmonProvider {
    root: PathBuf,
    /// Discovered device directories with their labels, in enumeration order.
    devices: Vec<(PathBuf, Channel)>,
}

impl HwmonProvider {
    /// Creates a provider reading from [`HWMON_ROOT`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_root(HWMON_ROOT)
    }

    /// Creates a provider reading from an arbitrary hwmon-style directory.
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let mut provider = Self { root: root.into(), devices: Vec::new() };
        provider.discover();
        provider
    }

    /// Returns true if at least one device was found.
    #[must_use]
    pub fn is_available(&self) -> bool {
        !self.devices.is_empty()
    }

    fn discover(&mut self) {
        let mut dirs: Vec<PathBuf> = std::fs::read_dir(&self.root)
            .ok()
            .map(|entries| {
                entries
                    .filter_map(std::result::Result::ok)
                    .map(|e| e.path())
                    .filter(|p| p.is_dir())
                    .collect()
            })
            .unwrap_or_default();
        dirs.sort_by_key(|p| device_sort_key(p));

        self.devices = dirs
            .into_iter()
            .filter_map(|path| {
                let key = path.file_name()?.to_string_lossy().into_owned();
                let label = read_trimmed(&path.join("name")).unwrap_or_else(|| key.clone());
                Some((path, Channel::new(key, label)))
            })
            .collect();
    }

    fn device_path(&self, key: &ChannelKey) -> Option<&Path> {
        self.devices.iter().find(|(_, c)| &c.key == key).map(|(p, _)| p.as_path())
    }
}

impl Default for HwmonProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorProvider for HwmonProvider {
    fn refresh(&mut self) {
        self.discover();
    }

    fn channels(&self) -> Vec<Channel> {
        self.devices.iter().map(|(_, c)| c.clone()).collect()
    }

    fn read_celsius(&mut self, key: &ChannelKey) -> Result<Option<f64>> {
        let Some(path) = self.device_path(key) else {
            return Ok(None);
        };

        // First temperature input that reads and parses (millidegrees Celsius).
        let mut any_read = false;
        let mut read_error = None;
        for i in 1..=MAX_TEMP_INPUTS {
            let input_path = path.join(format!("temp{i}_input"));
            if !input_path.exists() {
                continue;
            }
            let content = match std::fs::read_to_string(&input_path) {
                Ok(content) => content,
                Err(e) => {
                    log::trace!("skipping {}: {e}", input_path.display());
                    read_error = Some(e);
                    continue;
                }
            };
            any_read = true;
            if let Ok(millidegrees) = content.trim().parse::<i64>() {
                return Ok(Some(millidegrees as f64 / 1000.0));
            }
        }

        match read_error {
            Some(e) if !any_read => Err(e.into()),
            _ => Ok(None),
        }
    }
}

/// Sort `hwmon2` before `hwmon10`.
fn device_sort_key(path: &Path) -> (u64, String) {
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    let digits: String = name.chars().filter(char::is_ascii_digit).collect();
    (digits.parse().unwrap_or(u64::MAX), name)
}

fn read_trimmed(path: &Path) -> Option<String> {
    std::fs::read_to_string(path).ok().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
