//! Compare extracted slide text against the exported image directory.

use clap::Parser;
use deck_cli::{build_report, init_logging};
use deck_core::compare::DEFAULT_MAPPING_FILE;
use deck_core::images::DEFAULT_IMAGE_DIR;
use std::path::PathBuf;
use std::process::ExitCode;

/// Report which images are in use and which slides might need one.
#[derive(Parser, Debug)]
#[command(name = "deck-compare")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Plain-text extraction output
    #[arg(short, long, default_value = "presentation_extracted.txt")]
    extracted: PathBuf,

    /// Directory of exported images
    #[arg(short, long, default_value = DEFAULT_IMAGE_DIR)]
    images: PathBuf,

    /// JSON file listing current image usage and suggestions
    #[arg(short, long, default_value = DEFAULT_MAPPING_FILE)]
    mapping: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match build_report(&args.extracted, &args.images, &args.mapping) {
        Ok(report) => {
            print!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
