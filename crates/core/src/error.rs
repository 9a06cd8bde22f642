//! Error types for presentation extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while extracting or rendering a presentation.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open, read or write a file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The input presentation does not exist.
    #[error("Source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// Failed to parse the PPTX package structure.
    #[error("PPTX parsing error: {0}")]
    PptxParseError(String),

    /// ZIP archive error.
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    XmlError(String),

    /// A single shape could not be extracted (e.g. its image blob is unreadable).
    #[error("Shape extraction error: {0}")]
    ShapeExtraction(String),

    /// The requested output mode token is not recognized.
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// Structured output could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The image usage mapping file is invalid.
    #[error("Invalid image mapping: {0}")]
    MappingConfig(String),
}
