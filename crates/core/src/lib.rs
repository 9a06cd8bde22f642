//! Core domain types, shape classification and output formatting for
//! presentation content extraction.

pub mod compare;
pub mod error;
pub mod extract;
pub mod images;
pub mod output;
pub mod shape;
pub mod types;

pub use error::{Error, Result};
pub use extract::SlideExtractor;
pub use images::{ExportSummary, ImageExporter, SavedImage};
pub use output::{OutputFormat, SlideFormatter};
pub use shape::{Shape, ShapeImage, SlideShapes};
pub use types::{ImageRef, Slide, Table, UNKNOWN_IMAGE_NAME};
