//! Parsed PPTX slides and shapes.

use crate::rels;
use deck_core::{Error, ImageRef, Result, Shape, ShapeImage, SlideShapes, Table};

/// The XML element a shape came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// `p:sp`: text boxes, placeholders, autoshapes.
    Shape,
    /// `p:pic`: pictures.
    Picture,
    /// `p:graphicFrame`: tables, charts, diagrams.
    GraphicFrame,
    /// `p:cxnSp`: connectors.
    Connector,
}

impl ShapeKind {
    /// Map a local element name to a shape kind.
    pub fn from_element(local_name: &[u8]) -> Option<Self> {
        match local_name {
            b"sp" => Some(Self::Shape),
            b"pic" => Some(Self::Picture),
            b"graphicFrame" => Some(Self::GraphicFrame),
            b"cxnSp" => Some(Self::Connector),
            _ => None,
        }
    }
}

/// Bytes of an embedded media part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    /// Lowercase extension of the part name, `bin` if it has none.
    pub extension: String,
    pub data: Vec<u8>,
}

/// An image referenced by a picture shape.
#[derive(Debug, Clone)]
pub struct Picture {
    /// Relationship id from `a:blip/@r:embed`.
    pub rel_id: Option<String>,
    /// Resolved part name (or external target) of the image.
    pub part_name: Option<String>,
    /// The image bytes, or why they could not be read.
    pub media: std::result::Result<Media, String>,
}

impl Picture {
    /// File name of the image part, if known.
    pub fn filename(&self) -> Option<&str> {
        self.part_name.as_deref().and_then(rels::file_name)
    }
}

/// A shape of a slide with everything that could be read from it.
#[derive(Debug, Clone)]
pub struct PptxShape {
    pub kind: ShapeKind,
    /// `cNvPr/@name`, e.g. "Title 1".
    pub name: Option<String>,
    /// Text body content, paragraphs joined by newlines.
    pub text: Option<String>,
    pub table: Option<Table>,
    pub picture: Option<Picture>,
    /// Declared width in EMU.
    pub width: Option<u64>,
    /// Declared height in EMU.
    pub height: Option<u64>,
}

impl Shape for PptxShape {
    fn as_text(&self) -> Option<String> {
        self.text.clone()
    }

    fn as_table(&self) -> Option<Table> {
        self.table.clone()
    }

    fn as_image(&self) -> Option<Result<ShapeImage<'_>>> {
        let picture = self.picture.as_ref()?;
        Some(match &picture.media {
            Ok(media) => Ok(ShapeImage {
                reference: ImageRef::new(picture.filename(), self.width, self.height),
                extension: &media.extension,
                data: &media.data,
            }),
            Err(reason) => Err(Error::ShapeExtraction(format!(
                "{}: {}",
                self.name.as_deref().unwrap_or("picture"),
                reason
            ))),
        })
    }
}

/// One slide and its shapes in document order.
#[derive(Debug, Clone)]
pub struct PptxSlide {
    /// 1-based position in the presentation.
    pub number: usize,
    /// Part name, e.g. `ppt/slides/slide3.xml`.
    pub part_name: String,
    pub shapes: Vec<PptxShape>,
}

impl SlideShapes for PptxSlide {
    type Shape = PptxShape;

    fn shapes(&self) -> &[PptxShape] {
        &self.shapes
    }
}

/// A parsed presentation.
#[derive(Debug, Clone)]
pub struct PptxDocument {
    /// Original filename (without path).
    pub filename: String,
    /// Slides in presentation order.
    pub slides: Vec<PptxSlide>,
}

impl PptxDocument {
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }
}
