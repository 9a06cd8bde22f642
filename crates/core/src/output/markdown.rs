//! Markdown output with one `#` heading per slide.

use super::SlideFormatter;
use crate::{Result, Slide, Table};

/// Formatter for Markdown output.
#[derive(Debug, Clone, Default)]
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    fn push_slide(&self, out: &mut String, slide: &Slide) {
        out.push_str(&format!("# Slide {}\n\n", slide.slide_number));

        if let Some(title) = &slide.title {
            out.push_str(&format!("## {}\n\n", title));
        }

        for text in &slide.text_content {
            out.push_str(text);
            out.push_str("\n\n");
        }

        for table in &slide.tables {
            self.push_table(out, table);
        }

        out.push_str("---\n\n");
    }

    /// Header row, separator sized to the header, then the remaining rows.
    fn push_table(&self, out: &mut String, table: &Table) {
        let Some(header) = table.header() else {
            return;
        };

        out.push_str(&pipe_row(header));
        out.push_str(&pipe_row(vec!["---"; header.len()].as_slice()));
        for row in &table.rows[1..] {
            out.push_str(&pipe_row(row.as_slice()));
        }
        out.push('\n');
    }
}

fn pipe_row<S: AsRef<str>>(cells: &[S]) -> String {
    let cells: Vec<&str> = cells.iter().map(AsRef::as_ref).collect();
    format!("| {} |\n", cells.join(" | "))
}

impl SlideFormatter for MarkdownFormatter {
    fn format(&self, slides: &[Slide]) -> Result<String> {
        let mut out = String::new();
        for slide in slides {
            self.push_slide(&mut out, slide);
        }
        Ok(out)
    }
}
