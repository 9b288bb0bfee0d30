//! One sampling tick: read, convert, store, classify, render.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::glyph::{GlyphCompositor, GlyphLayout, GlyphLine};
use crate::monitor::classify::{classify, Tier};
use crate::monitor::sensors::{ChannelKey, SensorProvider};
use crate::monitor::state::MonitorState;
use crate::monitor::tooltip::{self, Tooltip};
use crate::output::StatusIndicator;
use chrono::NaiveDateTime;

/// Lifecycle of a [`SamplingCycle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CyclePhase {
    /// No tick has run, or [`SamplingCycle::shutdown`] was called.
    #[default]
    Stopped,
    /// Ticking.
    Running,
}

/// What happened to one channel during a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleEvent {
    /// Channel key.
    pub key: ChannelKey,
    /// Channel label.
    pub label: String,
    /// Reading in the display unit.
    pub value: f64,
    /// Severity tier of the reading.
    pub tier: Tier,
    /// Color of `tier`.
    pub color: Rgba,
    /// Glyph text, e.g. `"42°C"`.
    pub text: String,
}

/// Result of one tick.
#[derive(Debug)]
pub struct TickOutput {
    /// One event per channel that delivered a reading, in provider order.
    pub events: Vec<SampleEvent>,
    /// Lines drawn into `glyph`.
    pub lines: Vec<GlyphLine>,
    /// Rendered status glyph.
    pub glyph: Framebuffer,
    /// Tooltip text.
    pub tooltip: Tooltip,
    /// Row-log append failure, if recording and the append failed.
    pub log_error: Option<Error>,
}

/// Drives ticks over a [`MonitorState`].
#[derive(Debug)]
pub struct SamplingCycle {
    compositor: GlyphCompositor,
    phase: CyclePhase,
}

impl SamplingCycle {
    /// Creates a stopped cycle rendering with `layout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout is invalid.
    pub fn new(layout: GlyphLayout) -> Result<Self> {
        Ok(Self { compositor: GlyphCompositor::new(layout)?, phase: CyclePhase::Stopped })
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    /// Runs one tick.
    ///
    /// Channels without a reading are skipped for this tick: they get no
    /// window sample, no glyph line and no tooltip block. Session columns
    /// repeat their last value in the row log.
    pub fn tick(
        &mut self,
        state: &mut MonitorState,
        provider: &mut dyn SensorProvider,
        now: NaiveDateTime,
    ) -> TickOutput {
        self.phase = CyclePhase::Running;
        provider.refresh();

        let unit = state.tiers.unit();
        let mut events = Vec::new();
        let mut blocks = Vec::new();

        for channel in provider.channels() {
            let celsius = match provider.read_celsius(&channel.key) {
                Ok(Some(v)) if v.is_finite() => v,
                Ok(_) => {
                    log::debug!("no reading from {} ({})", channel.key, channel.label);
                    continue;
                }
                Err(e) => {
                    log::debug!("skipping {} ({}): {e}", channel.key, channel.label);
                    continue;
                }
            };

            let value = unit.convert(celsius);
            let window = state.channels.push(&channel, value);
            if let Some(stats) = window.stats() {
                blocks.push(tooltip::channel_block(&channel.label, &stats, unit));
            }

            let tier = classify(value, &state.tiers);
            events.push(SampleEvent {
                key: channel.key,
                label: channel.label,
                value,
                tier,
                color: state.tiers.color(tier),
                text: display_text(value, unit.suffix()),
            });
        }

        let log_error = if state.session.is_recording() {
            state
                .session
                .append(&state.channels, now)
                .inspect_err(|e| log::error!("failed to append to row log: {e}"))
                .err()
        } else {
            None
        };

        let lines: Vec<GlyphLine> =
            events.iter().map(|e| GlyphLine::new(e.text.clone(), e.color)).collect();
        let glyph = self.compositor.render(&lines);

        TickOutput { events, lines, glyph, tooltip: tooltip::compose(&blocks), log_error }
    }

    /// Hands a tick's glyph and tooltip to the indicator.
    ///
    /// # Errors
    ///
    /// Returns whatever the indicator reports.
    pub fn emit(&self, output: &TickOutput, indicator: &mut dyn StatusIndicator) -> Result<()> {
        indicator.show(&output.glyph, &output.tooltip)
    }

    /// Stops the cycle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordingAtShutdown`] if a logging session was still
    /// active. The row log is flushed, closed and left on disk.
    pub fn shutdown(&mut self, state: &mut MonitorState) -> Result<()> {
        self.phase = CyclePhase::Stopped;
        match state.session.abandon() {
            Some(row_log) => Err(Error::RecordingAtShutdown { row_log }),
            None => Ok(()),
        }
    }
}

/// Rounded integer reading with unit suffix.
fn display_text(value: f64, suffix: &str) -> String {
    let rounded = value.round();
    // -0.4 rounds to -0, which formats as "-0".
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded:.0}{suffix}")
}
