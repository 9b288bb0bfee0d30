//! Threshold classification of readings into severity tiers.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::monitor::units::TempUnit;
use std::time::Duration;

/// Severity tier of a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// Below the medium threshold.
    Low,
    /// At or above medium, below high.
    Medium,
    /// At or above the high threshold.
    High,
}

/// Colors for each tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierColors {
    /// Color for [`Tier::Low`].
    pub low: Rgba,
    /// Color for [`Tier::Medium`].
    pub medium: Rgba,
    /// Color for [`Tier::High`].
    pub high: Rgba,
}

impl Default for TierColors {
    fn default() -> Self {
        Self { low: Rgba::rgb(0, 192, 0), medium: Rgba::ORANGE, high: Rgba::RED }
    }
}

/// Validated runtime view of the user's thresholds, colors, unit and
/// refresh interval.
///
/// Thresholds are expressed in `unit`, the same unit readings are converted
/// to before they are classified.
#[derive(Debug, Clone, PartialEq)]
pub struct TierConfig {
    medium: f64,
    high: f64,
    colors: TierColors,
    unit: TempUnit,
    refresh: Duration,
}

impl TierConfig {
    /// Builds a tier configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidThresholds`] if either threshold is not finite
    /// or `high < medium`.
    pub fn new(
        medium: f64,
        high: f64,
        colors: TierColors,
        unit: TempUnit,
        refresh: Duration,
    ) -> Result<Self> {
        if !medium.is_finite() || !high.is_finite() || high < medium {
            return Err(Error::InvalidThresholds { medium, high });
        }
        Ok(Self { medium, high, colors, unit, refresh })
    }

    /// Medium threshold.
    #[must_use]
    pub fn medium(&self) -> f64 {
        self.medium
    }

    /// High threshold.
    #[must_use]
    pub fn high(&self) -> f64 {
        self.high
    }

    /// Tier colors.
    #[must_use]
    pub fn colors(&self) -> TierColors {
        self.colors
    }

    /// Display unit.
    #[must_use]
    pub fn unit(&self) -> TempUnit {
        self.unit
    }

    /// Refresh interval between ticks.
    #[must_use]
    pub fn refresh(&self) -> Duration {
        self.refresh
    }

    /// Color associated with a tier.
    #[must_use]
    pub fn color(&self, tier: Tier) -> Rgba {
        match tier {
            Tier::Low => self.colors.low,
            Tier::Medium => self.colors.medium,
            Tier::High => self.colors.high,
        }
    }

    pub(crate) fn set_unit(&mut self, unit: TempUnit) {
        self.unit = unit;
    }

    pub(crate) fn set_refresh(&mut self, refresh: Duration) {
        self.refresh = refresh;
    }
}

impl Default for TierConfig {
    fn default() -> Self {
        Self {
            medium: 60.0,
            high: 80.0,
            colors: TierColors::default(),
            unit: TempUnit::Celsius,
            refresh: Duration::from_secs(1),
        }
    }
}

/// Classifies a value already converted to the configured unit.
///
/// Boundary values belong to the higher tier.
#[must_use]
pub fn classify(value: f64, config: &TierConfig) -> Tier {
    if value >= config.high {
        Tier::High
    } else if value >= config.medium {
        Tier::Medium
    } else {
        Tier::Low
    }
}
