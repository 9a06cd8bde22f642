//! Shared plumbing for the deck command-line tools.

use anyhow::{Context, Result};
use deck_core::compare::{
    load_slide_summaries, ComparisonReport, ImageInventory, SlideSummary, UsageMapping,
};
use deck_core::{output, Error, ExportSummary, ImageExporter, OutputFormat, SlideExtractor};
use deck_pptx::{PptxDocument, PptxParser};
use std::path::{Path, PathBuf};

/// Presentation looked for in the working directory when none is given.
pub const DEFAULT_SOURCE: &str = "presentation.pptx";

/// Initialize logging; `RUST_LOG` overrides the default filter.
pub fn init_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();
}

/// Pick the source file and make sure it exists before any parsing.
pub fn resolve_source(input: Option<PathBuf>) -> deck_core::Result<PathBuf> {
    let path = input.unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE));
    if path.is_file() {
        Ok(path)
    } else {
        Err(Error::SourceNotFound(path))
    }
}

/// Open and parse a presentation.
pub fn load_presentation(path: &Path) -> Result<PptxDocument> {
    PptxParser::new()
        .open(path)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Result of a successful extraction run.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub output_path: PathBuf,
    pub slide_count: usize,
}

/// Extract every slide of `source` and write it next to the source.
///
/// Nothing is written unless parsing and rendering both succeed.
pub fn extract_to_file(source: &Path, format: OutputFormat) -> Result<Extraction> {
    let document = load_presentation(source)?;
    log::debug!("Processing {} slides", document.slide_count());

    let slides = SlideExtractor::new().extract(&document.slides);
    let content = format
        .render(&slides)
        .with_context(|| format!("Failed to render {} output", format))?;

    let output_path = format.output_path(source);
    output::write_output(&output_path, &content)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    Ok(Extraction {
        output_path,
        slide_count: slides.len(),
    })
}

/// Save the embedded images of `source` with `exporter`.
pub fn export_images(source: &Path, exporter: &ImageExporter) -> Result<ExportSummary> {
    let document = load_presentation(source)?;
    exporter.export(&document.slides).with_context(|| {
        format!(
            "Failed to export images to {}",
            exporter.output_dir().display()
        )
    })
}

/// Load the comparison inputs and build the report.
///
/// A missing extraction file or mapping file yields an empty section rather
/// than an error.
pub fn build_report(extracted: &Path, image_dir: &Path, mapping: &Path) -> Result<ComparisonReport> {
    let slides: Vec<SlideSummary> = if extracted.is_file() {
        load_slide_summaries(extracted)
            .with_context(|| format!("Failed to read {}", extracted.display()))?
    } else {
        log::warn!("{} not found, slide summary is empty", extracted.display());
        Vec::new()
    };

    let inventory = ImageInventory::scan(image_dir)
        .with_context(|| format!("Failed to scan {}", image_dir.display()))?;

    let mapping = if mapping.is_file() {
        UsageMapping::load(mapping)
            .with_context(|| format!("Invalid image mapping {}", mapping.display()))?
    } else {
        log::warn!("{} not found, no image usage to check", mapping.display());
        UsageMapping::default()
    };

    Ok(ComparisonReport::build(slides, inventory, mapping, image_dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::output::JsonFormatter;
    use deck_pptx::fixture::{self, PackageBuilder};
    use tempfile::TempDir;

    fn sample_deck(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("profile.pptx");
        PackageBuilder::new()
            .slide(&[
                fixture::text_shape("Company Profile"),
                fixture::text_shape("Founded in 1998"),
            ])
            .slide(&[fixture::table_frame(&[&["Year", "Revenue"], &["2023", "12M"]])])
            .slide(&[fixture::picture("rId2", 914400, 914400)])
            .slide_rel(3, "rId2", "../media/image1.png")
            .media("ppt/media/image1.png", b"\x89PNG\r\n")
            .write_to(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_resolve_source_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.pptx");
        let err = resolve_source(Some(path.clone())).unwrap_err();
        assert!(matches!(err, Error::SourceNotFound(p) if p == path));
    }

    #[test]
    fn test_resolve_source_existing() {
        let dir = TempDir::new().unwrap();
        let path = sample_deck(&dir);
        assert_eq!(resolve_source(Some(path.clone())).unwrap(), path);
    }

    #[test]
    fn test_extract_to_text_file() {
        let dir = TempDir::new().unwrap();
        let source = sample_deck(&dir);

        let extraction = extract_to_file(&source, OutputFormat::Text).unwrap();
        assert_eq!(extraction.slide_count, 3);
        assert_eq!(extraction.output_path, dir.path().join("profile_extracted.txt"));

        let content = std::fs::read_to_string(&extraction.output_path).unwrap();
        assert!(content.contains("Slide 1"));
        assert!(content.contains("Title: Company Profile"));
        assert!(content.contains("Year | Revenue"));
        assert!(content.contains("  - image1.png"));
    }

    #[test]
    fn test_extract_to_json_round_trips() {
        let dir = TempDir::new().unwrap();
        let source = sample_deck(&dir);

        let extraction = extract_to_file(&source, OutputFormat::Json).unwrap();
        assert_eq!(extraction.output_path, dir.path().join("profile_extracted.json"));

        let content = std::fs::read_to_string(&extraction.output_path).unwrap();
        let slides = JsonFormatter::new().parse(&content).unwrap();
        assert_eq!(slides.len(), 3);
        assert_eq!(slides[1].tables[0].rows[1], vec!["2023", "12M"]);
        assert_eq!(slides[2].images[0].width, Some(914400));
    }

    #[test]
    fn test_extract_invalid_source_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("broken.pptx");
        std::fs::write(&source, b"not a presentation").unwrap();

        assert!(extract_to_file(&source, OutputFormat::Markdown).is_err());
        assert!(!dir.path().join("broken_extracted.md").exists());
    }

    #[test]
    fn test_export_images() {
        let dir = TempDir::new().unwrap();
        let source = sample_deck(&dir);
        let exporter = ImageExporter::new(dir.path().join("images"));

        let summary = export_images(&source, &exporter).unwrap();
        assert_eq!(summary.slide_count, 3);
        assert_eq!(summary.saved.len(), 1);
        assert_eq!(summary.saved[0].filename, "slide_03_img_00.png");
        assert_eq!(std::fs::read(&summary.saved[0].path).unwrap(), b"\x89PNG\r\n");
    }

    #[test]
    fn test_build_report_with_missing_inputs() {
        let dir = TempDir::new().unwrap();
        let report = build_report(
            &dir.path().join("none_extracted.txt"),
            &dir.path().join("images"),
            &dir.path().join("image-mapping.json"),
        )
        .unwrap();

        assert!(report.usage().is_empty());
        assert!(report.to_string().contains("Slides in extracted text: 0"));
    }

    #[test]
    fn test_build_report_rejects_invalid_mapping() {
        let dir = TempDir::new().unwrap();
        let mapping = dir.path().join("image-mapping.json");
        std::fs::write(&mapping, "{ not json").unwrap();

        let result = build_report(&dir.path().join("x.txt"), dir.path(), &mapping);
        assert!(result.is_err());
    }
}
