//! Image files found in a directory.

use crate::Result;
use std::fs;
use std::path::Path;

/// Extensions counted as images, compared case-insensitively.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "svg", "webp"];

const BYTES_PER_KB: f64 = 1024.0;

/// An image file and its size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    pub size_bytes: u64,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
        }
    }

    pub fn size_kb(&self) -> f64 {
        self.size_bytes as f64 / BYTES_PER_KB
    }

    pub fn size_mb(&self) -> f64 {
        self.size_kb() / BYTES_PER_KB
    }

    /// Size as `x.x MB` above one megabyte, otherwise `x.x KB`.
    pub fn display_size(&self) -> String {
        if self.size_mb() > 1.0 {
            format!("{:.1} MB", self.size_mb())
        } else {
            format!("{:.1} KB", self.size_kb())
        }
    }
}

/// Image files of a directory, largest first.
#[derive(Debug, Clone, Default)]
pub struct ImageInventory {
    pub images: Vec<ImageFile>,
}

impl ImageInventory {
    /// Build an inventory, ordering by size (descending) then name.
    pub fn new(mut images: Vec<ImageFile>) -> Self {
        images.sort_by(|a, b| {
            b.size_bytes
                .cmp(&a.size_bytes)
                .then_with(|| a.name.cmp(&b.name))
        });
        Self { images }
    }

    /// Scan a directory (not recursively). A missing directory is an empty inventory.
    pub fn scan(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            log::debug!("Image directory {} does not exist", dir.display());
            return Ok(Self::default());
        }

        let mut images = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() || !has_image_extension(&path) {
                continue;
            }

            match entry.metadata() {
                Ok(metadata) => images.push(ImageFile::new(
                    entry.file_name().to_string_lossy(),
                    metadata.len(),
                )),
                Err(e) => log::warn!("Skipping {}: {}", path.display(), e),
            }
        }

        Ok(Self::new(images))
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Images strictly larger than `min_kb`, largest first.
    pub fn larger_than(&self, min_kb: f64) -> impl Iterator<Item = &ImageFile> {
        self.images.iter().filter(move |img| img.size_kb() > min_kb)
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_size() {
        assert_eq!(ImageFile::new("a.png", 512).display_size(), "0.5 KB");
        assert_eq!(ImageFile::new("a.png", 1024 * 1024).display_size(), "1024.0 KB");
        assert_eq!(
            ImageFile::new("a.png", 3 * 1024 * 1024 / 2).display_size(),
            "1.5 MB"
        );
    }

    #[test]
    fn test_sorted_by_size_then_name() {
        let inventory = ImageInventory::new(vec![
            ImageFile::new("b.png", 10),
            ImageFile::new("a.png", 10),
            ImageFile::new("big.jpg", 1000),
        ]);
        let names: Vec<&str> = inventory.images.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["big.jpg", "a.png", "b.png"]);
    }

    #[test]
    fn test_scan_filters_extensions() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("hero.JPG"), vec![0u8; 2048]).unwrap();
        fs::write(dir.path().join("logo.svg"), b"<svg/>").unwrap();
        fs::write(dir.path().join("notes.txt"), b"not an image").unwrap();
        fs::create_dir(dir.path().join("nested.png")).unwrap();

        let inventory = ImageInventory::scan(dir.path()).unwrap();
        let names: Vec<&str> = inventory.images.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["hero.JPG", "logo.svg"]);
        assert_eq!(inventory.images[0].size_bytes, 2048);
    }

    #[test]
    fn test_scan_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let inventory = ImageInventory::scan(&dir.path().join("nope")).unwrap();
        assert!(inventory.is_empty());
    }

    #[test]
    fn test_larger_than() {
        let inventory = ImageInventory::new(vec![
            ImageFile::new("small.png", 100 * 1024),
            ImageFile::new("large.png", 600 * 1024),
        ]);
        let large: Vec<&str> = inventory.larger_than(500.0).map(|i| i.name.as_str()).collect();
        assert_eq!(large, vec!["large.png"]);
        assert_eq!(inventory.larger_than(100.0).count(), 1);
    }
}
