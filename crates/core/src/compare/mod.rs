//! Cross-referencing extracted slides with a directory of image files.
//!
//! The usage mapping is static configuration; nothing here tries to match
//! image content to slides.

mod inventory;
mod mapping;
mod report;
mod summary;

pub use inventory::{ImageFile, ImageInventory, IMAGE_EXTENSIONS};
pub use mapping::{ImageUsage, Suggestion, UsageMapping, DEFAULT_MAPPING_FILE};
pub use report::{ComparisonReport, UsageStatus};
pub use summary::{load_slide_summaries, parse_text_output, SlideSummary};
