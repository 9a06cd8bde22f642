//! Hand-authored image usage mapping.
//!
//! The mapping is a JSON file such as:
//!
//! ```json
//! {
//!   "current_usage": [
//!     { "key": "hero-bg.jpg", "description": "Home page background (slide 1)" }
//!   ],
//!   "suggestions": [
//!     { "slide": "Slide 1 (home)", "notes": ["image1.jpeg may be a sharper background"] }
//!   ]
//! }
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Default location of the mapping file.
pub const DEFAULT_MAPPING_FILE: &str = "image-mapping.json";

/// An image the website currently uses, and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUsage {
    /// Image file name.
    pub key: String,
    pub description: String,
}

/// Review notes for one slide or slide range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub slide: String,
    #[serde(default)]
    pub notes: Vec<String>,
}

/// Ordered usage entries and suggestions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageMapping {
    #[serde(default)]
    pub current_usage: Vec<ImageUsage>,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

impl UsageMapping {
    /// Parse and validate a mapping document.
    pub fn from_json(json: &str) -> Result<Self> {
        let mapping: Self =
            serde_json::from_str(json).map_err(|e| Error::MappingConfig(e.to_string()))?;
        mapping.validate()?;
        Ok(mapping)
    }

    /// Load a mapping file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Whether `name` is one of the usage keys.
    pub fn is_used(&self, name: &str) -> bool {
        self.current_usage.iter().any(|usage| usage.key == name)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for usage in &self.current_usage {
            if usage.key.trim().is_empty() {
                return Err(Error::MappingConfig("empty image key".to_string()));
            }
            if !seen.insert(usage.key.as_str()) {
                return Err(Error::MappingConfig(format!(
                    "duplicate image key '{}'",
                    usage.key
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_order() {
        let mapping = UsageMapping::from_json(
            r#"{
                "current_usage": [
                    {"key": "hero-bg.jpg", "description": "Home (slide 1)"},
                    {"key": "intro.jpg", "description": "Intro (slide 2)"}
                ],
                "suggestions": [
                    {"slide": "Slide 8", "notes": ["image42.png may be the equipment"]},
                    {"slide": "Slide 9"}
                ]
            }"#,
        )
        .unwrap();

        let keys: Vec<&str> = mapping.current_usage.iter().map(|u| u.key.as_str()).collect();
        assert_eq!(keys, vec!["hero-bg.jpg", "intro.jpg"]);
        assert_eq!(mapping.suggestions[0].notes.len(), 1);
        assert!(mapping.suggestions[1].notes.is_empty());
        assert!(mapping.is_used("intro.jpg"));
        assert!(!mapping.is_used("other.jpg"));
    }

    #[test]
    fn test_empty_document() {
        let mapping = UsageMapping::from_json("{}").unwrap();
        assert_eq!(mapping, UsageMapping::default());
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let err = UsageMapping::from_json(
            r#"{"current_usage": [
                {"key": "a.jpg", "description": "x"},
                {"key": "a.jpg", "description": "y"}
            ]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::MappingConfig(_)));
    }

    #[test]
    fn test_invalid_json_rejected() {
        let err = UsageMapping::from_json("[1, 2]").unwrap_err();
        assert!(matches!(err, Error::MappingConfig(_)));
    }
}
