//! PPTX file parser implementation.

use crate::rels::{self, Relationships};
use crate::shape::{Media, Picture, PptxDocument, PptxShape, PptxSlide, ShapeKind};
use crate::slide_xml::{extract_shapes_from_xml, RawShape};
use crate::xml::{local_name, prefixed_attr};
use deck_core::{Error, Result, Table};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// Main part of a presentation package.
const PRESENTATION_PART: &str = "ppt/presentation.xml";

/// Extension used for media parts without one.
const FALLBACK_EXTENSION: &str = "bin";

/// Parser for PPTX (Office Open XML) files.
pub struct PptxParser;

impl PptxParser {
    /// Create a new PPTX parser.
    pub fn new() -> Self {
        Self
    }

    /// Open and parse a PPTX file from disk.
    pub fn open(&self, path: &Path) -> Result<PptxDocument> {
        if !path.is_file() {
            return Err(Error::SourceNotFound(path.to_path_buf()));
        }

        let file = File::open(path)?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown");

        self.parse(BufReader::new(file), filename)
    }

    /// Parse a PPTX file from a reader.
    pub fn parse<R: Read + Seek>(&self, reader: R, filename: &str) -> Result<PptxDocument> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let slide_order = self.get_slide_order(&mut archive)?;
        log::debug!("{}: {} slides", filename, slide_order.len());

        let mut slides = Vec::with_capacity(slide_order.len());
        for (idx, slide_path) in slide_order.iter().enumerate() {
            slides.push(self.parse_slide(&mut archive, slide_path, idx + 1)?);
        }

        Ok(PptxDocument {
            filename: filename.to_string(),
            slides,
        })
    }

    /// Get the ordered list of slide part names.
    ///
    /// Follows `p:sldIdLst` in the presentation part. Without one, slide
    /// relationships are ordered by the number in their target name.
    fn get_slide_order<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        let presentation = self.read_file_from_archive(archive, PRESENTATION_PART)?;
        let rels_content =
            self.read_file_from_archive(archive, &rels::rels_path_for(PRESENTATION_PART))?;
        let rels = Relationships::parse(&rels_content)?;
        let base_dir = rels::part_dir(PRESENTATION_PART);

        let slide_ids = slide_id_list(&presentation)?;
        if !slide_ids.is_empty() {
            return slide_ids
                .iter()
                .map(|id| match rels.get(id) {
                    Some(rel) if rel.is_slide() => Ok(rels::resolve_target(base_dir, &rel.target)),
                    _ => Err(Error::PptxParseError(format!(
                        "Slide list entry '{}' has no slide relationship",
                        id
                    ))),
                })
                .collect();
        }

        log::debug!("No slide list in {}, ordering by part name", PRESENTATION_PART);
        let mut slides: Vec<(String, Option<usize>)> = rels
            .iter()
            .filter(|rel| rel.is_slide())
            .map(|rel| {
                (
                    rels::resolve_target(base_dir, &rel.target),
                    extract_slide_number(&rel.target),
                )
            })
            .collect();

        // Sort slides by their number
        slides.sort_by(|a, b| match (a.1, b.1) {
            (Some(na), Some(nb)) => na.cmp(&nb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.0.cmp(&b.0),
        });

        Ok(slides.into_iter().map(|(path, _)| path).collect())
    }

    /// Parse a single slide from the archive.
    fn parse_slide<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        slide_path: &str,
        slide_number: usize,
    ) -> Result<PptxSlide> {
        let content = self.read_file_from_archive(archive, slide_path)?;

        let rels_path = rels::rels_path_for(slide_path);
        let rels = if has_file(archive, &rels_path) {
            Relationships::parse(&self.read_file_from_archive(archive, &rels_path)?)?
        } else {
            Relationships::default()
        };

        let shapes = extract_shapes_from_xml(&content)?
            .into_iter()
            .map(|raw| self.build_shape(archive, slide_path, &rels, raw))
            .collect::<Vec<_>>();

        log::debug!("{}: {} shapes", slide_path, shapes.len());

        Ok(PptxSlide {
            number: slide_number,
            part_name: slide_path.to_string(),
            shapes,
        })
    }

    fn build_shape<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        slide_path: &str,
        rels: &Relationships,
        raw: RawShape,
    ) -> PptxShape {
        let picture = raw
            .picture
            .map(|rel_id| self.resolve_picture(archive, slide_path, rels, rel_id));

        PptxShape {
            kind: raw.kind.unwrap_or(ShapeKind::Shape),
            name: raw.name,
            text: raw.text,
            table: raw.table.map(Table::new),
            picture,
            width: raw.width,
            height: raw.height,
        }
    }

    /// Load the image a picture shape points at.
    ///
    /// Failures are kept on the picture rather than returned, so one broken
    /// image does not fail the slide.
    fn resolve_picture<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        slide_path: &str,
        rels: &Relationships,
        rel_id: Option<String>,
    ) -> Picture {
        let Some(id) = rel_id else {
            return Picture {
                rel_id: None,
                part_name: None,
                media: Err("picture has no embedded image".to_string()),
            };
        };

        let Some(rel) = rels.get(&id) else {
            return Picture {
                media: Err(format!("relationship '{}' not found", id)),
                rel_id: Some(id),
                part_name: None,
            };
        };

        if rel.external {
            return Picture {
                rel_id: Some(id),
                part_name: Some(rel.target.clone()),
                media: Err(format!("image is linked to '{}', not embedded", rel.target)),
            };
        }

        let part_name = rels::resolve_target(rels::part_dir(slide_path), &rel.target);
        let media = self
            .read_bytes_from_archive(archive, &part_name)
            .map(|data| Media {
                extension: rels::extension(&part_name)
                    .unwrap_or_else(|| FALLBACK_EXTENSION.to_string()),
                data,
            })
            .map_err(|e| e.to_string());

        Picture {
            rel_id: Some(id),
            part_name: Some(part_name),
            media,
        }
    }

    /// Read a text file from the ZIP archive.
    fn read_file_from_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<String> {
        let mut file = archive
            .by_name(path)
            .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

        Ok(content)
    }

    /// Read a binary file from the ZIP archive.
    fn read_bytes_from_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<Vec<u8>> {
        let mut file = archive
            .by_name(path)
            .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

        let mut content = Vec::new();
        file.read_to_end(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

        Ok(content)
    }
}

impl Default for PptxParser {
    fn default() -> Self {
        Self::new()
    }
}

fn has_file<R: Read + Seek>(archive: &ZipArchive<R>, path: &str) -> bool {
    archive.file_names().any(|name| name == path)
}

/// Relationship ids of `p:sldIdLst/p:sldId`, in presentation order.
fn slide_id_list(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut ids = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"sldId" =>
            {
                if let Some(id) = prefixed_attr(e, b"id") {
                    ids.push(id);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing {}: {}",
                    PRESENTATION_PART, e
                )));
            }
            _ => {}
        }
    }

    Ok(ids)
}

/// Extract a slide number from a string like "slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    // Remove common extensions first
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    // Try to find digits at the end
    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}
