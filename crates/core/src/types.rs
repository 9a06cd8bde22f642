//! Domain types for representing extracted slide content.

use serde::{Deserialize, Serialize};

/// Filename recorded for images whose original name is not available.
pub const UNKNOWN_IMAGE_NAME: &str = "unknown";

/// A single extracted slide.
///
/// Field names are the keys of the structured (JSON) output, so they are
/// part of the output format and must not be renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    /// 1-based slide number in document order.
    pub slide_number: usize,

    /// First short text on the slide, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Remaining non-empty texts, in shape order.
    #[serde(default)]
    pub text_content: Vec<String>,

    /// Tables, in shape order.
    #[serde(default)]
    pub tables: Vec<Table>,

    /// Embedded images that could be read, in shape order.
    #[serde(default)]
    pub images: Vec<ImageRef>,
}

impl Slide {
    /// Create an empty slide with the given number.
    pub fn new(slide_number: usize) -> Self {
        Self {
            slide_number,
            title: None,
            text_content: Vec::new(),
            tables: Vec::new(),
            images: Vec::new(),
        }
    }

    /// True when nothing was extracted from this slide.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.text_content.is_empty()
            && self.tables.is_empty()
            && self.images.is_empty()
    }
}

/// Table content as rows of trimmed cell text.
///
/// Rows are not guaranteed to have the same length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table from its rows.
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// The first row, used as the header when rendering.
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Number of columns in the first row.
    pub fn header_width(&self) -> usize {
        self.header().map_or(0, <[String]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Reference to an image embedded in a slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Original filename, or [`UNKNOWN_IMAGE_NAME`].
    pub filename: String,

    /// Declared width in EMU.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u64>,

    /// Declared height in EMU.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,
}

impl ImageRef {
    /// Create an image reference, substituting the placeholder name when
    /// no usable filename is known.
    pub fn new(filename: Option<&str>, width: Option<u64>, height: Option<u64>) -> Self {
        let filename = filename
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_IMAGE_NAME)
            .to_string();

        Self {
            filename,
            width,
            height,
        }
    }

    /// True when the filename is the placeholder.
    pub fn is_unnamed(&self) -> bool {
        self.filename == UNKNOWN_IMAGE_NAME
    }
}
