//! Output encodings for extracted slides.
//!
//! Each [`OutputFormat`] has a formatter turning the slide records into text
//! and a fixed file extension used to derive the output path.

mod json;
mod markdown;
mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::{TextFormatter, DEFAULT_BANNER_WIDTH};

use crate::{Error, Result, Slide};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Renders a slide sequence into one output encoding.
pub trait SlideFormatter {
    fn format(&self, slides: &[Slide]) -> Result<String>;
}

/// The supported output encodings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Banner-delimited plain text.
    #[default]
    Text,
    /// Pretty-printed JSON array of slides.
    Json,
    /// Markdown with one heading per slide.
    Markdown,
}

impl OutputFormat {
    /// File extension of this encoding.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }

    /// The formatter for this encoding, with default settings.
    pub fn formatter(self) -> Box<dyn SlideFormatter> {
        match self {
            Self::Text => Box::new(TextFormatter::new()),
            Self::Json => Box::new(JsonFormatter::new()),
            Self::Markdown => Box::new(MarkdownFormatter::new()),
        }
    }

    /// Output path for a source file: `<stem>_extracted.<ext>` next to it.
    pub fn output_path(self, source: &Path) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());

        source.with_file_name(format!("{}_extracted.{}", stem, self.extension()))
    }

    /// Render the slides in this encoding.
    pub fn render(self, slides: &[Slide]) -> Result<String> {
        self.formatter().format(slides)
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self> {
        match token.trim().to_lowercase().as_str() {
            "txt" | "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Self::Text => "txt",
            Self::Json => "json",
            Self::Markdown => "markdown",
        };
        f.write_str(token)
    }
}

/// Write rendered output, replacing any existing file.
///
/// The file is flushed and closed before returning, on success and on error.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(content.as_bytes())?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format_tokens() {
        assert_eq!("txt".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(
            "markdown".parse::<OutputFormat>().unwrap(),
            OutputFormat::Markdown
        );
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);

        let err = "pdf".parse::<OutputFormat>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(ref t) if t == "pdf"));
    }

    #[test]
    fn test_default_format_is_text() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }

    #[test]
    fn test_output_path() {
        let source = Path::new("decks/Company Profile.pptx");
        assert_eq!(
            OutputFormat::Text.output_path(source),
            PathBuf::from("decks/Company Profile_extracted.txt")
        );
        assert_eq!(
            OutputFormat::Json.output_path(source),
            PathBuf::from("decks/Company Profile_extracted.json")
        );
        assert_eq!(
            OutputFormat::Markdown.output_path(Path::new("deck.pptx")),
            PathBuf::from("deck_extracted.md")
        );
    }

    #[test]
    fn test_write_output_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");

        write_output(&path, "first version").unwrap();
        write_output(&path, "second").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_no_null_tokens_for_empty_slide() {
        let slides = vec![Slide::new(1)];
        for format in [OutputFormat::Text, OutputFormat::Json, OutputFormat::Markdown] {
            let output = format.render(&slides).unwrap();
            assert!(!output.contains("null"), "{} output: {}", format, output);
            assert!(!output.contains("None"), "{} output: {}", format, output);
        }
    }
}
