//! Temperature sampling, classification and session logging.
//!
//! The pieces, leaves first:
//!
//! - [`RollingWindow`]: bounded per-channel history with aggregates
//! - [`classify`]: maps a reading to a [`Tier`] under a [`TierConfig`]
//! - [`SensorProvider`]: hardware enumeration and reads ([`HwmonProvider`] on Linux)
//! - [`LoggingSession`]: CSV row log and summary file
//! - [`SamplingCycle`]: one tick over a [`MonitorState`]
//! - [`Command`]: user requests applied between ticks
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use traytemp::monitor::{Config, HwmonProvider, MonitorState, SamplingCycle};
//! use traytemp::glyph::GlyphLayout;
//! use traytemp::output::PngIndicator;
//!
//! # fn main() -> traytemp::Result<()> {
//! let config = Config::load_or_default("config.yaml");
//! let mut state = MonitorState::from_config(&config)?;
//! let mut provider = HwmonProvider::new();
//! let mut indicator = PngIndicator::new("/tmp/traytemp");
//! let mut cycle = SamplingCycle::new(GlyphLayout::default())?;
//!
//! let output = cycle.tick(&mut state, &mut provider, chrono::Local::now().naive_local());
//! cycle.emit(&output, &mut indicator)?;
//! cycle.shutdown(&mut state)?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Core Types
// ============================================================================

pub mod channel;
pub mod classify;
pub mod units;
pub mod window;

pub use channel::{ChannelEntry, ChannelTable};
pub use classify::{classify, Tier, TierColors, TierConfig};
pub use units::TempUnit;
pub use window::{RollingWindow, WindowStats};

// ============================================================================
// Sensors
// ============================================================================

pub mod sensors;

pub use sensors::{Channel, ChannelKey, HwmonProvider, SensorProvider};

// ============================================================================
// Sampling, Logging and Commands
// ============================================================================

pub mod command;
pub mod config;
pub mod cycle;
pub mod session;
pub mod state;
pub mod tooltip;

pub use command::{Command, Outcome};
pub use config::{Config, REFRESH_PRESETS};
pub use cycle::{CyclePhase, SampleEvent, SamplingCycle, TickOutput};
pub use session::LoggingSession;
pub use state::MonitorState;
pub use tooltip::{Tooltip, TOOLTIP_MAX_CHARS};
