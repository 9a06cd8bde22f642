//! Extract slide text, tables and image references from a PowerPoint file.

use clap::Parser;
use deck_cli::{extract_to_file, init_logging, resolve_source};
use deck_core::OutputFormat;
use std::path::PathBuf;
use std::process::ExitCode;

/// Extract slide content into `<name>_extracted.{txt,json,md}`.
#[derive(Parser, Debug)]
#[command(name = "deck-extract")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input PowerPoint file (default: presentation.pptx)
    input: Option<PathBuf>,

    /// Output format: txt, json or markdown (md)
    #[arg(short, long, default_value = "txt")]
    format: OutputFormat,

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

    println!("Extracting content from: {}", source.display());

    match extract_to_file(&source, args.format) {
        Ok(extraction) => {
            println!("Extracted {} slides", extraction.slide_count);
            println!("Output written to: {}", extraction.output_path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error processing {}: {:#}", source.display(), e);
            ExitCode::FAILURE
        }
    }
}
