//! Status indicators.
//!
//! A [`StatusIndicator`] is the sink a tick's glyph and tooltip are handed to.
//! [`PngIndicator`] keeps them on disk so any tray or panel applet that can
//! watch a file can display them.

use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::monitor::tooltip::Tooltip;
use crate::output::PngEncoder;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the glyph written by [`PngIndicator`].
pub const GLYPH_FILE_NAME: &str = "traytemp.png";

/// File name of the tooltip written by [`PngIndicator`].
pub const TOOLTIP_FILE_NAME: &str = "traytemp.txt";

/// Displays the status glyph and its tooltip.
pub trait StatusIndicator {
    /// Replaces what is currently shown.
    ///
    /// # Errors
    ///
    /// Returns an error if the indicator cannot be updated.
    fn show(&mut self, glyph: &Framebuffer, tooltip: &Tooltip) -> Result<()>;
}

/// Writes the glyph as PNG and the tooltip as text into a directory.
#[derive(Debug, Clone)]
pub struct PngIndicator {
    dir: PathBuf,
}

impl PngIndicator {
    /// Creates an indicator writing into `dir`. The directory is created on
    /// first use.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Location of the glyph image.
    #[must_use]
    pub fn glyph_path(&self) -> PathBuf {
        self.dir.join(GLYPH_FILE_NAME)
    }

    /// Location of the tooltip text.
    #[must_use]
    pub fn tooltip_path(&self) -> PathBuf {
        self.dir.join(TOOLTIP_FILE_NAME)
    }

    /// Output directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl StatusIndicator for PngIndicator {
    fn show(&mut self, glyph: &Framebuffer, tooltip: &Tooltip) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        // Write beside the target and rename so watchers never see a partial file.
        let tmp = self.dir.join(format!(".{GLYPH_FILE_NAME}.tmp"));
        PngEncoder::write_to_file(glyph, &tmp)?;
        fs::rename(&tmp, self.glyph_path())?;

        fs::write(self.tooltip_path(), tooltip.as_str())?;
        Ok(())
    }
}
