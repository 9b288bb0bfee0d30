//! Logging sessions: CSV row log plus a closing summary.
//!
//! A session moves `Idle → Recording → Idle`:
//!
//! - [`LoggingSession::start`] opens `temp.log` in the log directory, writes the
//!   header row and clears every rolling window so statistics cover the session
//!   only.
//! - [`LoggingSession::append`] writes one row per tick and flushes it at once,
//!   so an abnormal exit loses at most the row in flight.
//! - [`LoggingSession::stop`] writes `<YYYY-MM-DD_HH-MM-SS>.log` holding the
//!   per-channel summary table, a blank line and the whole row log, then deletes
//!   the row log. An existing summary is never overwritten; a second session
//!   stopped within the same second gets `<YYYY-MM-DD_HH-MM-SS>_1.log`.
//!
//! Rows repeat the last known value of each column; a column with no sample
//! since the session started is left empty. Columns are fixed at `start()`.

use crate::error::{Error, Result};
use crate::monitor::channel::ChannelTable;
use crate::monitor::sensors::ChannelKey;
use chrono::NaiveDateTime;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// File name of the temporary row log.
pub const ROW_LOG_NAME: &str = "temp.log";

/// Timestamp format of the `DateTime` column.
const ROW_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp format of summary file names.
const SUMMARY_NAME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Highest `_<n>` suffix tried before giving up on a free summary name.
const MAX_SUMMARY_SUFFIX: u32 = 99;

/// State of an open session.
#[derive(Debug)]
struct Recording {
    writer: BufWriter<File>,
    columns: Vec<ChannelKey>,
    started_at: NaiveDateTime,
    rows: usize,
}

/// Logging session state machine.
#[derive(Debug)]
pub struct LoggingSession {
    dir: PathBuf,
    recording: Option<Recording>,
}

impl LoggingSession {
    /// Creates an idle session that writes into `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), recording: None }
    }

    /// Returns true while recording.
    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.recording.is_some()
    }

    /// Directory that receives the row log and summary files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Location of the temporary row log.
    #[must_use]
    pub fn row_log_path(&self) -> PathBuf {
        self.dir.join(ROW_LOG_NAME)
    }

    /// When the current session started.
    #[must_use]
    pub fn started_at(&self) -> Option<NaiveDateTime> {
        self.recording.as_ref().map(|r| r.started_at)
    }

    /// Rows written in the current session.
    #[must_use]
    pub fn rows_written(&self) -> usize {
        self.recording.as_ref().map_or(0, |r| r.rows)
    }

    /// Starts recording.
    ///
    /// Columns are the channels currently in `channels`, in table order. On
    /// success every window in `channels` is cleared.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyRecording`] if a session is active, or an I/O
    /// error if the row log cannot be created. Nothing is cleared on error.
    pub fn start(&mut self, channels: &mut ChannelTable, now: NaiveDateTime) -> Result<()> {
        if self.recording.is_some() {
            return Err(Error::AlreadyRecording);
        }

        fs::create_dir_all(&self.dir)?;
        let path = self.row_log_path();
        let mut writer = BufWriter::new(File::create(&path)?);

        let mut header = String::from("DateTime");
        for entry in channels.iter() {
            header.push(',');
            header.push_str(&csv_field(&entry.channel.label));
        }
        writeln!(writer, "{header}")?;
        writer.flush()?;

        let columns = channels.iter().map(|e| e.channel.key.clone()).collect::<Vec<_>>();
        log::info!("logging started: {} column(s) -> {}", columns.len(), path.display());

        channels.clear_all();
        self.recording = Some(Recording { writer, columns, started_at: now, rows: 0 });
        Ok(())
    }

    /// Appends one row with the latest value of every session column.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotRecording`] if idle, or an I/O error if the row
    /// cannot be written.
    pub fn append(&mut self, channels: &ChannelTable, now: NaiveDateTime) -> Result<()> {
        let recording = self.recording.as_mut().ok_or(Error::NotRecording)?;

        let mut row = now.format(ROW_TIMESTAMP_FORMAT).to_string();
        for key in &recording.columns {
            row.push(',');
            if let Some(value) = channels.get(key).and_then(|e| e.window.latest()) {
                row.push_str(&format!("{value:.2}"));
            }
        }

        writeln!(recording.writer, "{row}")?;
        recording.writer.flush()?;
        recording.rows += 1;
        Ok(())
    }

    /// Stops recording and writes the summary file.
    ///
    /// Returns the summary file's location. The summary covers the session
    /// columns only. If the row log has disappeared, the summary table is
    /// written on its own.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotRecording`] if idle. If an existing row log cannot
    /// be read or the summary cannot be written, the error is returned, the session
    /// keeps recording and the row log is left in place.
    pub fn stop(&mut self, channels: &ChannelTable, now: NaiveDateTime) -> Result<PathBuf> {
        let recording = self.recording.as_mut().ok_or(Error::NotRecording)?;
        recording.writer.flush()?;

        let row_log = self.dir.join(ROW_LOG_NAME);
        let rows = match fs::read_to_string(&row_log) {
            Ok(rows) => Some(rows),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::warn!("row log {} is gone, summary holds statistics only", row_log.display());
                None
            }
            Err(e) => return Err(e.into()),
        };

        let mut content = summary_table(channels, &recording.columns);
        if let Some(rows) = &rows {
            content.push('\n');
            content.push_str(rows);
        }
        fs::create_dir_all(&self.dir)?;
        let summary_path = write_summary(&self.dir, now, &content)?;

        // Close the handle before removing the file.
        self.recording = None;
        if rows.is_some() {
            if let Err(e) = fs::remove_file(&row_log) {
                log::warn!(
                    "summary saved but row log {} could not be removed: {e}",
                    row_log.display()
                );
            }
        }

        log::info!("logging stopped, summary saved to {}", summary_path.display());
        Ok(summary_path)
    }

    /// Closes the row log without writing a summary. The row log stays on
    /// disk. Returns its location if a session was active.
    pub fn abandon(&mut self) -> Option<PathBuf> {
        let mut recording = self.recording.take()?;
        if let Err(e) = recording.writer.flush() {
            log::error!("failed to flush row log: {e}");
        }
        Some(self.row_log_path())
    }
}

/// Writes `content` to the first free summary name for `now`.
fn write_summary(dir: &Path, now: NaiveDateTime, content: &str) -> Result<PathBuf> {
    let stamp = now.format(SUMMARY_NAME_FORMAT).to_string();
    for n in 0..=MAX_SUMMARY_SUFFIX {
        let path = if n == 0 {
            dir.join(format!("{stamp}.log"))
        } else {
            dir.join(format!("{stamp}_{n}.log"))
        };
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e.into()),
        };
        if let Err(e) = file.write_all(content.as_bytes()) {
            drop(file);
            if let Err(cleanup) = fs::remove_file(&path) {
                log::warn!("partial summary {} left behind: {cleanup}", path.display());
            }
            return Err(e.into());
        }
        return Ok(path);
    }
    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("no free summary name for {stamp} in {}", dir.display()),
    )
    .into())
}

/// `Hardware,Average,Minimum,Maximum` followed by one line per session column
/// with data, each line newline-terminated.
fn summary_table(channels: &ChannelTable, columns: &[ChannelKey]) -> String {
    let mut table = String::from("Hardware,Average,Minimum,Maximum\n");
    for entry in columns.iter().filter_map(|key| channels.get(key)) {
        if let Some(stats) = entry.window.stats() {
            table.push_str(&format!(
                "{},{:.2},{:.2},{:.2}\n",
                csv_field(&entry.channel.label),
                stats.average,
                stats.min,
                stats.max
            ));
        }
    }
    table
}

/// Quotes a CSV field if it contains a separator, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains(|c: char| matches!(c, ',' | '"' | '\n' | '\r')) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
