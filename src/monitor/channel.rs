//! Per-channel rolling windows, in first-sight order.

use crate::error::Result;
use crate::monitor::sensors::{Channel, ChannelKey};
use crate::monitor::window::RollingWindow;

/// A known channel and its history.
#[derive(Debug, Clone)]
pub struct ChannelEntry {
    /// Channel identity and label.
    pub channel: Channel,
    /// Samples in the display unit.
    pub window: RollingWindow,
}

/// Rolling windows for every channel seen so far.
///
/// Entries are created the first time a channel delivers a value and keep
/// their position afterwards. Clearing empties windows but keeps entries.
#[derive(Debug, Clone)]
pub struct ChannelTable {
    entries: Vec<ChannelEntry>,
    /// Empty window cloned for newly seen channels.
    template: RollingWindow,
}

impl ChannelTable {
    /// Creates an empty table whose windows hold `capacity` samples.
    ///
    /// # Errors
    ///
    /// Returns an error if `capacity` is 0.
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self { entries: Vec::new(), template: RollingWindow::new(capacity)? })
    }

    /// Window capacity for new and existing channels.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.template.capacity()
    }

    /// Changes the capacity of every window.
    ///
    /// # Errors
    ///
    /// Returns an error if `capacity` is 0.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<()> {
        self.template.set_capacity(capacity)?;
        for entry in &mut self.entries {
            entry.window.set_capacity(capacity)?;
        }
        Ok(())
    }

    /// Pushes a sample for `channel`, registering it on first sight.
    ///
    /// Returns the channel's window after the push.
    pub fn push(&mut self, channel: &Channel, value: f64) -> &RollingWindow {
        let idx = match self.position(&channel.key) {
            Some(idx) => idx,
            None => {
                let window = self.template.clone();
                self.entries.push(ChannelEntry { channel: channel.clone(), window });
                self.entries.len() - 1
            }
        };

        let entry = &mut self.entries[idx];
        // Labels may change across re-enumeration; keep the freshest.
        if entry.channel.label != channel.label {
            entry.channel.label.clone_from(&channel.label);
        }
        entry.window.push(value);
        &entry.window
    }

    /// Looks up a channel's entry.
    #[must_use]
    pub fn get(&self, key: &ChannelKey) -> Option<&ChannelEntry> {
        self.entries.iter().find(|e| &e.channel.key == key)
    }

    /// Iterates entries in first-sight order.
    pub fn iter(&self) -> impl Iterator<Item = &ChannelEntry> {
        self.entries.iter()
    }

    /// Number of known channels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no channel has been seen yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Empties every window. Channels stay known.
    pub fn clear_all(&mut self) {
        for entry in &mut self.entries {
            entry.window.clear();
        }
    }

    fn position(&self, key: &ChannelKey) -> Option<usize> {
        self.entries.iter().position(|e| &e.channel.key == key)
    }
}
