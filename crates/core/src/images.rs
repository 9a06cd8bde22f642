//! Saving embedded images to disk.

use crate::{Result, Shape, SlideShapes};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory images are written to unless configured otherwise.
pub const DEFAULT_IMAGE_DIR: &str = "images";

/// An image written by [`ImageExporter::export`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedImage {
    /// 1-based number of the slide the image came from.
    pub slide_number: usize,
    /// Name of the written file.
    pub filename: String,
    /// Full path of the written file.
    pub path: PathBuf,
}

/// Outcome of an export run.
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    /// Number of slides visited.
    pub slide_count: usize,
    /// Images written, in slide and shape order.
    pub saved: Vec<SavedImage>,
    /// Images that could not be read or written.
    pub failed: usize,
}

/// Writes every embedded image of a presentation into one directory.
///
/// Files are named `slide_{NN}_img_{MM}.{ext}`, where `MM` counts the
/// images saved so far on that slide.
#[derive(Debug, Clone)]
pub struct ImageExporter {
    output_dir: PathBuf,
}

impl Default for ImageExporter {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_DIR)
    }
}

impl ImageExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Create the output directory if needed. Returns true if it was created.
    pub fn prepare(&self) -> Result<bool> {
        if self.output_dir.is_dir() {
            return Ok(false);
        }
        fs::create_dir_all(&self.output_dir)?;
        Ok(true)
    }

    /// File name for the `index`-th image (0-based) of a slide.
    pub fn image_filename(slide_number: usize, index: usize, extension: &str) -> String {
        format!("slide_{:02}_img_{:02}.{}", slide_number, index, extension)
    }

    /// Write all readable images, skipping and logging the ones that fail.
    ///
    /// Only a missing or uncreatable output directory fails the export.
    pub fn export<T: SlideShapes>(&self, slides: &[T]) -> Result<ExportSummary> {
        self.prepare()?;

        let mut summary = ExportSummary {
            slide_count: slides.len(),
            ..ExportSummary::default()
        };

        for (idx, slide) in slides.iter().enumerate() {
            let slide_number = idx + 1;
            let mut slide_image_count = 0;

            for shape in slide.shapes() {
                let image = match shape.as_image() {
                    Some(Ok(image)) => image,
                    Some(Err(e)) => {
                        log::warn!("Slide {}: failed to extract image: {}", slide_number, e);
                        summary.failed += 1;
                        continue;
                    }
                    None => continue,
                };

                let filename =
                    Self::image_filename(slide_number, slide_image_count, image.extension);
                let path = self.output_dir.join(&filename);

                match fs::write(&path, image.data) {
                    Ok(()) => {
                        log::debug!("Slide {}: saved {}", slide_number, filename);
                        summary.saved.push(SavedImage {
                            slide_number,
                            filename,
                            path,
                        });
                        slide_image_count += 1;
                    }
                    Err(e) => {
                        log::warn!(
                            "Slide {}: failed to write {}: {}",
                            slide_number,
                            path.display(),
                            e
                        );
                        summary.failed += 1;
                    }
                }
            }
        }

        Ok(summary)
    }
}
