//! Status glyph compositor.
//!
//! Renders a handful of short colored text lines (typically one per channel,
//! e.g. `42°C`) into a small fixed raster. Lines are stacked top-down at a fixed
//! pitch; nothing wraps, and anything falling outside the canvas is clipped.
//!
//! Rendering is deterministic: the same lines on the same layout always produce
//! a byte-identical [`Framebuffer`].
//!
//! # Example
//!
//! ```
//! use traytemp::color::Rgba;
//! use traytemp::glyph::{GlyphCompositor, GlyphLayout, GlyphLine};
//!
//! let compositor = GlyphCompositor::new(GlyphLayout::default()).unwrap();
//! let glyph = compositor.render(&[GlyphLine::new("42°C", Rgba::GREEN)]);
//! assert_eq!(glyph.width(), 16);
//! ```

pub mod font;

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use font::{glyph, GLYPH_HEIGHT, GLYPH_SPACING};

/// One line of glyph text and the color it is drawn in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphLine {
    /// Text to draw (short, usually ≤ 4 characters).
    pub text: String,
    /// Ink color.
    pub color: Rgba,
}

impl GlyphLine {
    /// Creates a glyph line.
    #[must_use]
    pub fn new(text: impl Into<String>, color: Rgba) -> Self {
        Self { text: text.into(), color }
    }
}

/// Canvas size and line placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphLayout {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Vertical distance between the tops of consecutive lines.
    pub line_pitch: u32,
    /// Left edge of every line. Negative values clip the first columns.
    pub origin_x: i32,
    /// Top edge of the first line. Negative values clip the first rows.
    pub origin_y: i32,
}

impl Default for GlyphLayout {
    /// 16x16 tray icon with two lines.
    fn default() -> Self {
        Self { width: 16, height: 16, line_pitch: 8, origin_x: 0, origin_y: 1 }
    }
}

/// Renders [`GlyphLine`]s into a fixed-size raster.
#[derive(Debug, Clone)]
pub struct GlyphCompositor {
    layout: GlyphLayout,
    /// Blank canvas cloned for every render.
    blank: Framebuffer,
}

impl GlyphCompositor {
    /// Creates a compositor for the given layout.
    ///
    /// # Errors
    ///
    /// Returns an error if the canvas has a zero dimension or the line pitch
    /// is zero.
    pub fn new(layout: GlyphLayout) -> Result<Self> {
        if layout.line_pitch == 0 {
            return Err(Error::InvalidLayout("line pitch must be at least 1".to_string()));
        }
        let blank = Framebuffer::new(layout.width, layout.height)?;
        Ok(Self { layout, blank })
    }

    /// Returns the layout this compositor draws with.
    #[must_use]
    pub fn layout(&self) -> GlyphLayout {
        self.layout
    }

    /// Renders the lines top to bottom on a transparent canvas.
    #[must_use]
    pub fn render(&self, lines: &[GlyphLine]) -> Framebuffer {
        let mut fb = self.blank.clone();

        for (i, line) in lines.iter().enumerate() {
            let top = i64::from(self.layout.origin_y) + i as i64 * i64::from(self.layout.line_pitch);
            if top >= i64::from(self.layout.height) {
                break;
            }
            draw_text(&mut fb, &line.text, i64::from(self.layout.origin_x), top, line.color);
        }

        fb
    }
}

/// Draws `text` with its top-left corner at `(x, y)`, clipping at the edges.
fn draw_text(fb: &mut Framebuffer, text: &str, x: i64, y: i64, color: Rgba) {
    let mut pen_x = x;
    for c in text.chars() {
        if pen_x >= i64::from(fb.width()) {
            break;
        }
        let g = glyph(c);
        for gy in 0..GLYPH_HEIGHT {
            for gx in 0..g.width {
                if g.is_set(gx, gy) {
                    fb.set_pixel_clipped(pen_x + i64::from(gx), y + i64::from(gy), color);
                }
            }
        }
        pen_x += i64::from(g.width + GLYPH_SPACING);
    }
}
