//! Structured JSON output.

use super::SlideFormatter;
use crate::{Result, Slide};

/// Formatter for a pretty-printed JSON array of slides.
///
/// Non-ASCII text is written as-is, not escaped.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Decode slides previously written by [`JsonFormatter::format`].
    pub fn parse(&self, json: &str) -> Result<Vec<Slide>> {
        Ok(serde_json::from_str(json)?)
    }
}

impl SlideFormatter for JsonFormatter {
    fn format(&self, slides: &[Slide]) -> Result<String> {
        Ok(serde_json::to_string_pretty(slides)?)
    }
}
