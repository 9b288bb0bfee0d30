//! Built-in 5-pixel-high bitmap font.
//!
//! Covers what the status glyph actually prints: digits, the degree sign,
//! unit letters, minus and decimal point. Everything else renders as `?`.

/// Height of every glyph in pixels.
pub const GLYPH_HEIGHT: u32 = 5;

/// Horizontal gap between consecutive glyphs in pixels.
pub const GLYPH_SPACING: u32 = 1;

/// A single bitmap glyph.
///
/// Bit `width - 1 - x` of `rows[y]` is set when pixel `(x, y)` is inked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontGlyph {
    /// Advance width in pixels, excluding spacing.
    pub width: u32,
    /// One bitmask per row, top to bottom.
    pub rows: [u8; GLYPH_HEIGHT as usize],
}

impl FontGlyph {
    const fn new(width: u32, rows: [u8; GLYPH_HEIGHT as usize]) -> Self {
        Self { width, rows }
    }

    /// Returns true if the pixel at `(x, y)` inside the glyph cell is inked.
    #[must_use]
    pub fn is_set(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= GLYPH_HEIGHT {
            return false;
        }
        (self.rows[y as usize] >> (self.width - 1 - x)) & 1 == 1
    }
}

const FALLBACK: FontGlyph = FontGlyph::new(3, [0b111, 0b001, 0b011, 0b000, 0b010]);

/// Looks up the glyph for a character.
#[must_use]
pub fn glyph(c: char) -> FontGlyph {
    match c {
        '0' => FontGlyph::new(3, [0b111, 0b101, 0b101, 0b101, 0b111]),
        '1' => FontGlyph::new(3, [0b010, 0b110, 0b010, 0b010, 0b111]),
        '2' => FontGlyph::new(3, [0b111, 0b001, 0b111, 0b100, 0b111]),
        '3' => FontGlyph::new(3, [0b111, 0b001, 0b111, 0b001, 0b111]),
        '4' => FontGlyph::new(3, [0b101, 0b101, 0b111, 0b001, 0b001]),
        '5' => FontGlyph::new(3, [0b111, 0b100, 0b111, 0b001, 0b111]),
        '6' => FontGlyph::new(3, [0b111, 0b100, 0b111, 0b101, 0b111]),
        '7' => FontGlyph::new(3, [0b111, 0b001, 0b001, 0b001, 0b001]),
        '8' => FontGlyph::new(3, [0b111, 0b101, 0b111, 0b101, 0b111]),
        '9' => FontGlyph::new(3, [0b111, 0b101, 0b111, 0b001, 0b111]),
        '°' => FontGlyph::new(2, [0b11, 0b11, 0b00, 0b00, 0b00]),
        'C' => FontGlyph::new(3, [0b111, 0b100, 0b100, 0b100, 0b111]),
        'F' => FontGlyph::new(3, [0b111, 0b100, 0b110, 0b100, 0b100]),
        'K' => FontGlyph::new(3, [0b101, 0b101, 0b110, 0b101, 0b101]),
        '-' => FontGlyph::new(3, [0b000, 0b000, 0b111, 0b000, 0b000]),
        '.' => FontGlyph::new(1, [0b0, 0b0, 0b0, 0b0, 0b1]),
        ' ' => FontGlyph::new(2, [0; 5]),
        _ => FALLBACK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_one_shape() {
        let one = glyph('1');
        assert!(one.is_set(1, 0));
        assert!(!one.is_set(0, 0));
        assert!(one.is_set(0, 4) && one.is_set(1, 4) && one.is_set(2, 4));
    }

    #[test]
    fn test_is_set_out_of_cell() {
        let zero = glyph('0');
        assert!(!zero.is_set(3, 0));
        assert!(!zero.is_set(0, 5));
    }

    #[test]
    fn test_unknown_char_uses_fallback() {
        assert_eq!(glyph('x'), glyph('?'));
        assert_eq!(glyph('Z'), FALLBACK);
    }

    #[test]
    fn test_widths() {
        assert_eq!(glyph('4').width, 3);
        assert_eq!(glyph('°').width, 2);
        assert_eq!(glyph('.').width, 1);
    }
}
