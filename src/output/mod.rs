//! Output encoders and status indicators.

mod indicator;
mod png_encoder;

pub use indicator::{PngIndicator, StatusIndicator, GLYPH_FILE_NAME, TOOLTIP_FILE_NAME};
pub use png_encoder::PngEncoder;
