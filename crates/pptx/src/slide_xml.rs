//! Walks a slide part's shape tree.
//!
//! Shapes inside group shapes (`p:grpSp`) are reported in document order as if
//! they were top-level shapes. A shape nested in another shape (e.g. the
//! fallback picture of an OLE object) is reported before its parent. Of an
//! `mc:AlternateContent` block only the `mc:Choice` branch is read.

use crate::shape::ShapeKind;
use crate::xml::{attr, emu_attr, local_name};
use deck_core::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// A shape as found in the slide XML, before images are resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RawShape {
    pub kind: Option<ShapeKind>,
    pub name: Option<String>,
    pub text: Option<String>,
    pub table: Option<Vec<Vec<String>>>,
    /// Set for picture shapes; holds the `r:embed` id when there is one.
    pub picture: Option<Option<String>>,
    pub width: Option<u64>,
    pub height: Option<u64>,
}

#[derive(Debug, Default)]
struct ShapeBuilder {
    shape: RawShape,
    in_tx_body: bool,
    in_run_text: bool,
    in_xfrm: bool,
    size_seen: bool,
    paragraphs: usize,
    row: Option<Vec<String>>,
    cell: Option<String>,
    cell_paragraphs: usize,
}

impl ShapeBuilder {
    fn new(kind: ShapeKind) -> Self {
        let mut builder = Self::default();
        builder.shape.kind = Some(kind);
        if kind == ShapeKind::Picture {
            builder.shape.picture = Some(None);
        }
        builder
    }

    /// Where text currently goes: the open table cell, else the text body.
    fn text_target(&mut self) -> Option<&mut String> {
        if self.cell.is_some() {
            self.cell.as_mut()
        } else if self.in_tx_body {
            self.shape.text.as_mut()
        } else {
            None
        }
    }

    fn start_paragraph(&mut self) {
        if let Some(cell) = self.cell.as_mut() {
            if self.cell_paragraphs > 0 {
                cell.push('\n');
            }
            self.cell_paragraphs += 1;
        } else if self.in_tx_body {
            if self.paragraphs > 0 {
                if let Some(text) = self.shape.text.as_mut() {
                    text.push('\n');
                }
            }
            self.paragraphs += 1;
        }
    }

    fn open(&mut self, local: &[u8], e: &BytesStart, empty: bool) {
        match local {
            b"cNvPr" if self.shape.name.is_none() => {
                self.shape.name = attr(e, b"name");
            }
            b"txBody" if self.cell.is_none() => {
                if !empty {
                    self.in_tx_body = true;
                }
                self.shape.text.get_or_insert_with(String::new);
            }
            b"p" => self.start_paragraph(),
            b"t" if !empty => self.in_run_text = true,
            b"br" => {
                if let Some(target) = self.text_target() {
                    target.push('\n');
                }
            }
            b"tbl" => {
                self.shape.table.get_or_insert_with(Vec::new);
            }
            b"tr" => {
                if empty {
                    self.shape.table.get_or_insert_with(Vec::new).push(Vec::new());
                } else {
                    self.row = Some(Vec::new());
                }
            }
            b"tc" => {
                if empty {
                    self.row.get_or_insert_with(Vec::new).push(String::new());
                } else {
                    self.cell = Some(String::new());
                    self.cell_paragraphs = 0;
                }
            }
            b"xfrm" if !self.size_seen && !empty => self.in_xfrm = true,
            b"ext" if self.in_xfrm => {
                self.shape.width = emu_attr(e, b"cx");
                self.shape.height = emu_attr(e, b"cy");
                self.size_seen = true;
            }
            b"blip" => {
                if let Some(embed) = self.shape.picture.as_mut() {
                    if embed.is_none() {
                        *embed = attr(e, b"embed");
                    }
                }
            }
            _ => {}
        }
    }

    fn close(&mut self, local: &[u8]) {
        match local {
            b"t" => self.in_run_text = false,
            b"txBody" if self.cell.is_none() => self.in_tx_body = false,
            b"tc" => {
                if let Some(cell) = self.cell.take() {
                    self.row.get_or_insert_with(Vec::new).push(cell);
                }
            }
            b"tr" => {
                if let Some(row) = self.row.take() {
                    self.shape.table.get_or_insert_with(Vec::new).push(row);
                }
            }
            b"xfrm" => self.in_xfrm = false,
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.in_run_text {
            if let Some(target) = self.text_target() {
                target.push_str(text);
            }
        }
    }
}

/// Extract the shapes of a slide part, in document order.
pub(crate) fn extract_shapes_from_xml(xml: &str) -> Result<Vec<RawShape>> {
    let mut reader = Reader::from_str(xml);
    // Run text is significant whitespace.
    reader.trim_text(false);

    let mut shapes = Vec::new();
    let mut stack: Vec<ShapeBuilder> = Vec::new();
    // Open `mc:Fallback` elements; their content repeats the `mc:Choice` branch.
    let mut fallback_depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if local_name(e.name().as_ref()) == b"Fallback" => {
                fallback_depth += 1;
            }
            Ok(Event::End(ref e)) if local_name(e.name().as_ref()) == b"Fallback" => {
                fallback_depth = fallback_depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!("Error parsing slide: {}", e)));
            }
            Ok(_) if fallback_depth > 0 => {}
            Ok(Event::Start(ref e)) => {
                let name = e.name();
                let local = local_name(name.as_ref());
                if let Some(kind) = ShapeKind::from_element(local) {
                    stack.push(ShapeBuilder::new(kind));
                } else if let Some(builder) = stack.last_mut() {
                    builder.open(local, e, false);
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name = e.name();
                let local = local_name(name.as_ref());
                if let Some(kind) = ShapeKind::from_element(local) {
                    shapes.push(ShapeBuilder::new(kind).shape);
                } else if let Some(builder) = stack.last_mut() {
                    builder.open(local, e, true);
                }
            }
            Ok(Event::Text(ref e)) => {
                if let Some(builder) = stack.last_mut() {
                    let text = e
                        .unescape()
                        .map_err(|e| Error::XmlError(format!("Invalid slide text: {}", e)))?;
                    builder.text(&text);
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.name();
                let local = local_name(name.as_ref());
                if ShapeKind::from_element(local).is_some() {
                    if let Some(builder) = stack.pop() {
                        shapes.push(builder.shape);
                    }
                } else if let Some(builder) = stack.last_mut() {
                    builder.close(local);
                }
            }
            _ => {}
        }
    }

    Ok(shapes)
}
