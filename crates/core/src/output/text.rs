//! Plain text output.
//!
//! Each slide opens with a banner block:
//!
//! ```text
//! ============================================================
//! Slide 1
//! ============================================================
//!
//! Title: Company Profile
//!
//! Founded in 2004
//!
//! Table:
//! Year | Projects
//! 2023 | 14
//!
//! Images:
//!   - image1.jpeg
//! ```

use super::SlideFormatter;
use crate::{Result, Slide};

/// Width of the `=` banner framing each slide label.
pub const DEFAULT_BANNER_WIDTH: usize = 60;

/// Formatter for banner-delimited plain text.
#[derive(Debug, Clone)]
pub struct TextFormatter {
    banner_width: usize,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self {
            banner_width: DEFAULT_BANNER_WIDTH,
        }
    }
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom banner width.
    pub fn with_banner_width(mut self, width: usize) -> Self {
        self.banner_width = width.max(1);
        self
    }

    /// The banner line, without newline.
    pub fn banner(&self) -> String {
        "=".repeat(self.banner_width)
    }

    fn push_slide(&self, out: &mut String, slide: &Slide) {
        let banner = self.banner();
        out.push_str(&format!("{b}\nSlide {}\n{b}\n\n", slide.slide_number, b = banner));

        if let Some(title) = &slide.title {
            out.push_str(&format!("Title: {}\n\n", title));
        }

        for text in &slide.text_content {
            out.push_str(text);
            out.push_str("\n\n");
        }

        for table in &slide.tables {
            out.push_str("Table:\n");
            for row in &table.rows {
                out.push_str(&row.join(" | "));
                out.push('\n');
            }
            out.push('\n');
        }

        if !slide.images.is_empty() {
            out.push_str("Images:\n");
            for image in &slide.images {
                out.push_str(&format!("  - {}\n", image.filename));
            }
        }

        out.push('\n');
    }
}

impl SlideFormatter for TextFormatter {
    fn format(&self, slides: &[Slide]) -> Result<String> {
        let mut out = String::new();
        for slide in slides {
            self.push_slide(&mut out, slide);
        }
        Ok(out)
    }
}
