//! PPTX (Office Open XML) backend for slide content extraction.
//!
//! Parses .pptx files, which are ZIP archives of XML parts, into slides and
//! shapes that implement the capability traits of `deck-core`.

#[cfg(any(test, feature = "fixtures"))]
pub mod fixture;
pub mod parser;
pub mod rels;
pub mod shape;
mod slide_xml;
mod xml;

pub use parser::PptxParser;
pub use shape::{Media, Picture, PptxDocument, PptxShape, PptxSlide, ShapeKind};
