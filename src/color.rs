//! RGBA colors for tier coloring and glyph rasters.
//!
//! Tier colors are configured as HTML-style hex strings (`#RRGGBB` or
//! `#RRGGBBAA`) and parsed into [`Rgba`] once, when a [`TierConfig`] is built.
//!
//! [`TierConfig`]: crate::monitor::TierConfig

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0, 255, 0, 255);
    /// Opaque orange.
    pub const ORANGE: Self = Self::new(255, 165, 0, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Parse an HTML-style hex color.
    ///
    /// Accepts `#RRGGBB` and `#RRGGBBAA`; the leading `#` is optional.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] for any other shape or non-hex digits.
    ///
    /// # Example
    ///
    /// ```
    /// use traytemp::color::Rgba;
    ///
    /// assert_eq!(Rgba::from_hex("#FF0000").unwrap(), Rgba::RED);
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
            return Err(Error::InvalidColor(hex.to_string()));
        }

        let component = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| Error::InvalidColor(hex.to_string()))
        };

        let a = if digits.len() == 8 { component(6)? } else { 255 };
        Ok(Self::new(component(0)?, component(2)?, component(4)?, a))
    }
}

impl FromStr for Rgba {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_constants() {
        assert_eq!(Rgba::BLACK, Rgba::rgb(0, 0, 0));
        assert_eq!(Rgba::WHITE, Rgba::rgb(255, 255, 255));
        assert_eq!(Rgba::TRANSPARENT.a, 0);
        assert_eq!(Rgba::ORANGE, Rgba::rgb(255, 165, 0));
    }

    #[test]
    fn test_from_hex_rgb() {
        assert_eq!(Rgba::from_hex("#00C000").unwrap(), Rgba::rgb(0, 192, 0));
        assert_eq!(Rgba::from_hex("ffa500").unwrap(), Rgba::ORANGE);
    }

    #[test]
    fn test_from_hex_rgba() {
        assert_eq!(Rgba::from_hex("#10203040").unwrap(), Rgba::new(0x10, 0x20, 0x30, 0x40));
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        for bad in ["", "#", "#FFF", "#GG0000", "#12345", "red", "#ÿÿÿ"] {
            assert!(
                matches!(Rgba::from_hex(bad), Err(Error::InvalidColor(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_display_uses_short_form_when_opaque() {
        assert_eq!(Rgba::RED.to_string(), "#FF0000");
        assert_eq!(Rgba::new(1, 2, 3, 4).to_string(), "#01020304");
    }

    #[test]
    fn test_from_str() {
        let color: Rgba = "#0000FF".parse().unwrap();
        assert_eq!(color, Rgba::rgb(0, 0, 255));
    }

    #[test]
    fn test_rgba_to_array_from_array() {
        let color = Rgba::new(10, 20, 30, 40);
        assert_eq!(Rgba::from_array(color.to_array()), color);
    }
}
