//! Tooltip text for the status indicator.

use crate::error::{Error, Result};
use crate::monitor::units::TempUnit;
use crate::monitor::window::WindowStats;

/// Longest tooltip, in characters, the status indicator can display.
pub const TOOLTIP_MAX_CHARS: usize = 127;

/// Tooltip text guaranteed to fit the status indicator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tooltip(String);

impl Tooltip {
    /// Wraps `text`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooltipTooLong`] if `text` is longer than
    /// [`TOOLTIP_MAX_CHARS`] characters. Text is never truncated.
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        let len = text.chars().count();
        if len > TOOLTIP_MAX_CHARS {
            return Err(Error::TooltipTooLong { len, max: TOOLTIP_MAX_CHARS });
        }
        Ok(Self(text))
    }

    /// Returns the text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Two-line tooltip block for one channel:
///
/// ```text
/// coretemp
///  47.3°C ~ [41,55]
/// ```
#[must_use]
pub fn channel_block(label: &str, stats: &WindowStats, unit: TempUnit) -> String {
    format!(
        "{label}\n {:.1}{} ~ [{:.0},{:.0}]",
        stats.average,
        unit.suffix(),
        stats.min,
        stats.max
    )
}

/// Joins channel blocks in order, omitting blocks that would push the text
/// past [`TOOLTIP_MAX_CHARS`].
#[must_use]
pub fn compose(blocks: &[String]) -> Tooltip {
    let mut text = String::new();
    let mut len = 0;

    for block in blocks {
        let sep = usize::from(!text.is_empty());
        let block_len = block.chars().count();
        if len + sep + block_len > TOOLTIP_MAX_CHARS {
            log::debug!("tooltip full, omitting block {:?}", block.lines().next().unwrap_or_default());
            continue;
        }
        if sep == 1 {
            text.push('\n');
        }
        text.push_str(block);
        len += sep + block_len;
    }

    Tooltip(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(average: f64, min: f64, max: f64) -> WindowStats {
        WindowStats { average, min, max }
    }

    #[test]
    fn test_channel_block_format() {
        let block = channel_block("CPU", &stats(75.0, 60.0, 90.0), TempUnit::Celsius);
        assert_eq!(block, "CPU\n 75.0°C ~ [60,90]");
    }

    #[test]
    fn test_channel_block_rounds() {
        let block = channel_block("nvme", &stats(38.3, 37.6, 39.4), TempUnit::Fahrenheit);
        assert_eq!(block, "nvme\n 38.3°F ~ [38,39]");
    }

    #[test]
    fn test_new_rejects_long_text() {
        let long = "x".repeat(128);
        assert!(matches!(Tooltip::new(long), Err(Error::TooltipTooLong { len: 128, max: 127 })));
        assert!(Tooltip::new("x".repeat(127)).is_ok());
    }

    #[test]
    fn test_new_counts_chars_not_bytes() {
        // '°' is two bytes in UTF-8.
        assert!(Tooltip::new("°".repeat(127)).is_ok());
    }

    #[test]
    fn test_compose_joins_blocks() {
        let tooltip = compose(&["a\n 1".to_string(), "b\n 2".to_string()]);
        assert_eq!(tooltip.as_str(), "a\n 1\nb\n 2");
    }

    #[test]
    fn test_compose_omits_blocks_that_do_not_fit() {
        let big = "x".repeat(100);
        let small = "y".repeat(20);
        let tooltip = compose(&[big.clone(), big.clone(), small.clone()]);
        assert_eq!(tooltip.as_str(), format!("{big}\n{small}"));
        assert!(tooltip.as_str().chars().count() <= TOOLTIP_MAX_CHARS);
    }

    #[test]
    fn test_compose_empty() {
        assert_eq!(compose(&[]).as_str(), "");
    }
}
