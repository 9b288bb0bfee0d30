//! # traytemp
//!
//! Hardware temperature monitor for a system-tray style status indicator.
//!
//! Every tick reads each sensor channel, keeps a short rolling history per
//! channel, classifies the current reading into a colored severity tier and
//! renders all readings into one small glyph with a summary tooltip. A
//! logging session can record every tick to a CSV row log and finish with a
//! summary file.
//!
//! ## Quick Start
//!
//! ```rust
//! use traytemp::prelude::*;
//!
//! let compositor = GlyphCompositor::new(GlyphLayout::default())?;
//! let glyph = compositor.render(&[
//!     GlyphLine::new("42°C", Rgba::GREEN),
//!     GlyphLine::new("81°C", Rgba::RED),
//! ]);
//! let png = PngEncoder::to_bytes(&glyph)?;
//! assert!(!png.is_empty());
//! # Ok::<(), traytemp::Error>(())
//! ```

#![warn(missing_docs)]
// Allow unwrap() in tests only
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Bitmap-font glyph compositing.
pub mod glyph;

// ============================================================================
// Monitoring
// ============================================================================

/// Sampling, classification and session logging.
pub mod monitor;

// ============================================================================
// Output
// ============================================================================

/// Output encoders (PNG) and status indicators.
pub mod output;

// ============================================================================
// Error Handling
// ============================================================================

mod error;
pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::color::Rgba;
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::glyph::{GlyphCompositor, GlyphLayout, GlyphLine};
    pub use crate::monitor::{
        Command, Config, HwmonProvider, LoggingSession, MonitorState, Outcome, RollingWindow,
        SamplingCycle, SensorProvider, TempUnit, Tier, TierConfig, TickOutput, Tooltip,
    };
    pub use crate::output::{PngEncoder, PngIndicator, StatusIndicator};
}
