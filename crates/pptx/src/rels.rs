//! Package relationships (`*.rels` parts) and part path resolution.

use crate::xml::{attr, local_name};
use deck_core::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;

/// One `<Relationship>` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub rel_type: String,
    pub target: String,
    /// `TargetMode="External"`: the target is outside the package.
    pub external: bool,
}

impl Relationship {
    /// Whether this relationship points at a slide part.
    pub fn is_slide(&self) -> bool {
        self.rel_type.ends_with("/slide")
    }
}

/// Relationships of one part, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    entries: Vec<Relationship>,
    by_id: HashMap<String, usize>,
}

impl Relationships {
    /// Parse a `.rels` part.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut rels = Self::default();

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if local_name(e.name().as_ref()) == b"Relationship" =>
                {
                    let (Some(id), Some(target)) = (attr(e, b"Id"), attr(e, b"Target")) else {
                        log::debug!("Skipping relationship without Id or Target");
                        continue;
                    };
                    let rel_type = attr(e, b"Type").unwrap_or_default();
                    let external = attr(e, b"TargetMode")
                        .is_some_and(|mode| mode.eq_ignore_ascii_case("External"));

                    rels.push(Relationship {
                        id,
                        rel_type,
                        target,
                        external,
                    });
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!(
                        "Error parsing relationships: {}",
                        e
                    )));
                }
                _ => {}
            }
        }

        Ok(rels)
    }

    fn push(&mut self, rel: Relationship) {
        self.by_id.entry(rel.id.clone()).or_insert(self.entries.len());
        self.entries.push(rel);
    }

    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.by_id.get(id).map(|&idx| &self.entries[idx])
    }

    /// All entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Path of the relationships part for a part.
///
/// `ppt/slides/slide1.xml` → `ppt/slides/_rels/slide1.xml.rels`
pub fn rels_path_for(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part),
    }
}

/// Directory of a part, without trailing slash.
pub fn part_dir(part: &str) -> &str {
    part.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

/// Resolve a relationship target against the directory of its source part.
///
/// Absolute targets (`/ppt/media/image1.png`) are taken from the package root.
pub fn resolve_target(base_dir: &str, target: &str) -> String {
    let (mut segments, target) = match target.strip_prefix('/') {
        Some(absolute) => (Vec::new(), absolute),
        None => (
            base_dir.split('/').filter(|s| !s.is_empty()).collect::<Vec<_>>(),
            target,
        ),
    };

    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    segments.join("/")
}

/// Last path segment of a part name or target.
pub fn file_name(path: &str) -> Option<&str> {
    path.rsplit('/').next().filter(|name| !name.is_empty())
}

/// Lowercase extension of a part name, without the dot.
pub fn extension(path: &str) -> Option<String> {
    file_name(path)?
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .filter(|ext| !ext.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLIDE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image1.png"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="https://example.com/logo.png" TargetMode="External"/>
</Relationships>"#;

    #[test]
    fn test_parse_relationships() {
        let rels = Relationships::parse(SLIDE_RELS).unwrap();
        assert_eq!(rels.len(), 3);

        let image = rels.get("rId2").unwrap();
        assert_eq!(image.target, "../media/image1.png");
        assert!(!image.external);
        assert!(rels.get("rId3").unwrap().external);
        assert!(rels.get("rId9").is_none());

        let ids: Vec<&str> = rels.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["rId1", "rId2", "rId3"]);
    }

    #[test]
    fn test_is_slide() {
        let rel = |t: &str| Relationship {
            id: "rId1".into(),
            rel_type: format!("http://schemas.openxmlformats.org/officeDocument/2006/relationships/{}", t),
            target: String::new(),
            external: false,
        };
        assert!(rel("slide").is_slide());
        assert!(!rel("slideLayout").is_slide());
        assert!(!rel("slideMaster").is_slide());
        assert!(!rel("notesSlide").is_slide());
    }

    #[test]
    fn test_malformed_relationships() {
        assert!(Relationships::parse("<Relationships><Relationship Id=\"a\"></Other>").is_err());
    }

    #[test]
    fn test_rels_path_for() {
        assert_eq!(rels_path_for("ppt/slides/slide1.xml"), "ppt/slides/_rels/slide1.xml.rels");
        assert_eq!(rels_path_for("ppt/presentation.xml"), "ppt/_rels/presentation.xml.rels");
    }

    #[test]
    fn test_resolve_target() {
        assert_eq!(resolve_target("ppt/slides", "../media/image1.png"), "ppt/media/image1.png");
        assert_eq!(resolve_target("ppt", "slides/slide2.xml"), "ppt/slides/slide2.xml");
        assert_eq!(resolve_target("ppt/slides", "./pic.png"), "ppt/slides/pic.png");
        assert_eq!(resolve_target("ppt/slides", "/ppt/media/a.jpg"), "ppt/media/a.jpg");
    }

    #[test]
    fn test_file_name_and_extension() {
        assert_eq!(file_name("ppt/media/image1.PNG"), Some("image1.PNG"));
        assert_eq!(extension("ppt/media/image1.PNG").as_deref(), Some("png"));
        assert_eq!(extension("ppt/media/blob"), None);
        assert_eq!(file_name("ppt/media/"), None);
    }
}
