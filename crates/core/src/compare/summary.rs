//! Reading slide summaries back from the plain text output.

use crate::{extract::preview, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Matches the `Slide N` label between the banners.
static SLIDE_LABEL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Slide (\d+)$").unwrap());

const TITLE_PREFIX: &str = "Title:";

/// What the plain text output says about one slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideSummary {
    pub number: usize,
    pub title: Option<String>,
    /// Every other non-empty line, trimmed, in order.
    pub content: Vec<String>,
}

impl SlideSummary {
    fn new(number: usize) -> Self {
        Self {
            number,
            title: None,
            content: Vec::new(),
        }
    }

    /// The first `lines` content lines joined by spaces, cut to `max_chars`.
    pub fn preview(&self, lines: usize, max_chars: usize) -> String {
        let joined = self
            .content
            .iter()
            .take(lines)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        preview(&joined, max_chars)
    }
}

/// Parse the plain text output into per-slide summaries.
///
/// A slide starts at a `Slide N` line framed directly by banner lines above
/// and below; the same words anywhere else are content. Banner lines are
/// skipped and text before the first slide is ignored.
pub fn parse_text_output(content: &str) -> Vec<SlideSummary> {
    let lines: Vec<&str> = content.lines().map(str::trim).collect();
    let mut summaries = Vec::new();
    let mut current: Option<SlideSummary> = None;

    for (idx, line) in lines.iter().enumerate() {
        if line.is_empty() || is_banner(line) {
            continue;
        }

        if let Some(number) = slide_label(&lines, idx) {
            summaries.extend(current.take());
            current = Some(SlideSummary::new(number));
            continue;
        }

        let Some(summary) = current.as_mut() else {
            continue;
        };

        match line.strip_prefix(TITLE_PREFIX) {
            Some(title) => summary.title = Some(title.trim().to_string()),
            None => summary.content.push(line.to_string()),
        }
    }

    summaries.extend(current);
    summaries
}

/// Slide number if `lines[idx]` is a label between two banners.
fn slide_label(lines: &[&str], idx: usize) -> Option<usize> {
    let above = idx.checked_sub(1).and_then(|i| lines.get(i))?;
    let below = lines.get(idx + 1)?;
    if !is_banner(above) || !is_banner(below) {
        return None;
    }

    let caps = SLIDE_LABEL_REGEX.captures(lines[idx])?;
    caps[1].parse().ok()
}

/// Load summaries from a plain text output file.
pub fn load_slide_summaries(path: &Path) -> Result<Vec<SlideSummary>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_text_output(&content))
}

fn is_banner(line: &str) -> bool {
    line.len() >= 3 && line.chars().all(|c| c == '=')
}
