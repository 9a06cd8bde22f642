//! Save the embedded images of a PowerPoint file.

use clap::Parser;
use deck_cli::{export_images, init_logging, resolve_source};
use deck_core::images::DEFAULT_IMAGE_DIR;
use deck_core::ImageExporter;
use std::path::PathBuf;
use std::process::ExitCode;

/// Write every embedded image as `slide_NN_img_MM.ext`.
#[derive(Parser, Debug)]
#[command(name = "deck-images")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input PowerPoint file (default: presentation.pptx)
    input: Option<PathBuf>,

    /// Directory the images are written to
    #[arg(short, long, default_value = DEFAULT_IMAGE_DIR)]
    output_dir: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let source = match resolve_source(args.input) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let exporter = ImageExporter::new(args.output_dir);
    match exporter.prepare() {
        Ok(true) => println!("Created directory: {}", exporter.output_dir().display()),
        Ok(false) => {}
        Err(e) => {
            eprintln!("Error creating {}: {}", exporter.output_dir().display(), e);
            return ExitCode::FAILURE;
        }
    }

    println!("Extracting images from: {}", source.display());

    let summary = match export_images(&source, &exporter) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Error processing {}: {:#}", source.display(), e);
            return ExitCode::FAILURE;
        }
    };

    println!("Found {} slides", summary.slide_count);
    for image in &summary.saved {
        println!("  Saved: {} (slide {})", image.filename, image.slide_number);
    }
    if summary.failed > 0 {
        println!("Skipped {} images that could not be saved", summary.failed);
    }

    let output_dir = exporter
        .output_dir()
        .canonicalize()
        .unwrap_or_else(|_| exporter.output_dir().to_path_buf());
    println!(
        "Extracted {} images to: {}",
        summary.saved.len(),
        output_dir.display()
    );

    ExitCode::SUCCESS
}
