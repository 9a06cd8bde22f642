//! Console report cross-referencing slides, image files and the usage mapping.

use super::{ImageInventory, ImageUsage, SlideSummary, UsageMapping};
use std::fmt;
use std::path::Path;

const BANNER_WIDTH: usize = 80;
const SLIDE_PREVIEW_LIMIT: usize = 15;
const PREVIEW_LINES: usize = 2;
const PREVIEW_CHARS: usize = 100;
const LARGE_IMAGE_KB: f64 = 500.0;
const LARGE_IMAGE_LIMIT: usize = 10;
const UNUSED_IMAGE_KB: f64 = 100.0;
const UNUSED_IMAGE_LIMIT: usize = 20;

const NEXT_STEPS: &[&str] = &[
    "Open the large images (> 1 MB) and confirm which slide each belongs to",
    "Use the slide content above to decide which images belong to which page section",
    "Check that the images currently in use are the right ones",
    "Consider replacing them with higher quality originals where available",
    "Find suitable images for newly added sections",
    "Update the image paths in the website",
];

/// A usage entry and the size of its file, if present.
#[derive(Debug, Clone)]
pub struct UsageStatus {
    pub usage: ImageUsage,
    pub size_bytes: Option<u64>,
}

/// Everything needed to print the comparison report.
#[derive(Debug, Clone)]
pub struct ComparisonReport {
    slides: Vec<SlideSummary>,
    inventory: ImageInventory,
    mapping: UsageMapping,
    usage: Vec<UsageStatus>,
}

impl ComparisonReport {
    /// Build a report, checking each mapped image in `image_dir`.
    pub fn build(
        slides: Vec<SlideSummary>,
        inventory: ImageInventory,
        mapping: UsageMapping,
        image_dir: &Path,
    ) -> Self {
        let usage = mapping
            .current_usage
            .iter()
            .map(|usage| {
                let size_bytes = std::fs::metadata(image_dir.join(&usage.key))
                    .ok()
                    .filter(|m| m.is_file())
                    .map(|m| m.len());
                UsageStatus {
                    usage: usage.clone(),
                    size_bytes,
                }
            })
            .collect();

        Self {
            slides,
            inventory,
            mapping,
            usage,
        }
    }

    pub fn usage(&self) -> &[UsageStatus] {
        &self.usage
    }

    fn write_section(f: &mut fmt::Formatter<'_>, heading: &str) -> fmt::Result {
        let banner = "=".repeat(BANNER_WIDTH);
        writeln!(f, "{}", banner)?;
        writeln!(f, "{}", heading)?;
        writeln!(f, "{}", banner)
    }

    fn write_usage(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::write_section(f, "Images currently used by the website")?;
        for status in &self.usage {
            let ImageUsage { key, description } = &status.usage;
            match status.size_bytes {
                Some(bytes) => writeln!(
                    f,
                    "[OK] {:<30} -> {:<40} ({:.1} KB)",
                    key,
                    description,
                    bytes as f64 / 1024.0
                )?,
                None => writeln!(f, "[X]  {:<30} -> {:<40} (missing)", key, description)?,
            }
        }
        writeln!(f)
    }

    fn write_slides(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::write_section(f, "Slide content summary")?;
        for slide in self.slides.iter().take(SLIDE_PREVIEW_LIMIT) {
            writeln!(f)?;
            writeln!(
                f,
                "Slide {}: {}",
                slide.number,
                slide.title.as_deref().unwrap_or_default()
            )?;
            if !slide.content.is_empty() {
                writeln!(f, "  Content: {}...", slide.preview(PREVIEW_LINES, PREVIEW_CHARS))?;
            }
        }
        writeln!(f)
    }

    fn write_large_images(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::write_section(f, "Large images (likely primary images)")?;
        for (idx, image) in self
            .inventory
            .larger_than(LARGE_IMAGE_KB)
            .take(LARGE_IMAGE_LIMIT)
            .enumerate()
        {
            writeln!(f, "{:2}. {:<35} ({})", idx + 1, image.name, image.display_size())?;
        }
        writeln!(f)
    }

    fn write_suggestions(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::write_section(f, "Suggested image mapping")?;
        for suggestion in &self.mapping.suggestions {
            writeln!(f)?;
            writeln!(f, "{}:", suggestion.slide)?;
            for note in &suggestion.notes {
                writeln!(f, "  - {}", note)?;
            }
        }
        writeln!(f)
    }

    fn write_unused(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::write_section(f, "Unused images (need identification)")?;
        let unused: Vec<_> = self
            .inventory
            .larger_than(UNUSED_IMAGE_KB)
            .filter(|image| !self.mapping.is_used(&image.name))
            .collect();

        writeln!(f)?;
        writeln!(f, "Found {} unused medium/large images:", unused.len())?;
        for image in unused.iter().take(UNUSED_IMAGE_LIMIT) {
            writeln!(f, "  - {:<35} ({})", image.name, image.display_size())?;
        }
        writeln!(f)
    }

    fn write_next_steps(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::write_section(f, "Next steps")?;
        for (idx, step) in NEXT_STEPS.iter().enumerate() {
            writeln!(f, "{}. {}", idx + 1, step)?;
        }
        Ok(())
    }
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::write_section(f, "Slide and image mapping analysis")?;
        writeln!(f)?;
        writeln!(f, "Slides in extracted text: {}", self.slides.len())?;
        writeln!(f, "Image files: {}", self.inventory.len())?;
        writeln!(f)?;

        self.write_usage(f)?;
        self.write_slides(f)?;
        self.write_large_images(f)?;
        self.write_suggestions(f)?;
        self.write_unused(f)?;
        Self::write_next_steps(f)
    }
}
