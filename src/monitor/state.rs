//! State owned by the sampling loop.

use crate::error::Result;
use crate::monitor::channel::ChannelTable;
use crate::monitor::classify::TierConfig;
use crate::monitor::config::Config;
use crate::monitor::session::LoggingSession;
use std::path::PathBuf;

/// Everything a tick reads or mutates.
///
/// A single owner (the sampling loop) holds this and passes it into
/// [`SamplingCycle::tick`](crate::monitor::cycle::SamplingCycle::tick) and
/// [`MonitorState::apply`]. Nothing here is shared between threads.
#[derive(Debug)]
pub struct MonitorState {
    pub(crate) tiers: TierConfig,
    pub(crate) channels: ChannelTable,
    pub(crate) session: LoggingSession,
}

impl MonitorState {
    /// Creates state with empty windows of `history_length` samples and an
    /// idle logging session writing into `log_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if `history_length` is 0.
    pub fn new(tiers: TierConfig, history_length: usize, log_dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            tiers,
            channels: ChannelTable::new(history_length)?,
            session: LoggingSession::new(log_dir),
        })
    }

    /// Creates state from a loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.tier_config()?, config.history_length, config.log_dir.clone())
    }

    /// Current tier configuration.
    #[must_use]
    pub fn tiers(&self) -> &TierConfig {
        &self.tiers
    }

    /// Per-channel windows.
    #[must_use]
    pub fn channels(&self) -> &ChannelTable {
        &self.channels
    }

    /// Logging session.
    #[must_use]
    pub fn session(&self) -> &LoggingSession {
        &self.session
    }

    /// Samples kept per channel.
    #[must_use]
    pub fn history_length(&self) -> usize {
        self.channels.capacity()
    }

    /// Changes the number of samples kept per channel, evicting the oldest
    /// samples from longer windows.
    ///
    /// # Errors
    ///
    /// Returns an error if `history_length` is 0.
    pub fn set_history_length(&mut self, history_length: usize) -> Result<()> {
        self.channels.set_capacity(history_length)
    }
}
