//! Builds small in-memory PPTX packages for tests.
//!
//! Only the parts the parser reads are written: the presentation part and
//! its relationships, slide parts, slide relationships and media.

use quick_xml::escape::escape;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::result::ZipResult;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const NS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006""#;
const REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Assembles a PPTX package slide by slide.
#[derive(Debug, Clone)]
pub struct PackageBuilder {
    slides: Vec<String>,
    slide_rels: Vec<Vec<(String, String)>>,
    media: Vec<(String, Vec<u8>)>,
    order: Option<Vec<usize>>,
    slide_list: bool,
    presentation: bool,
}

impl PackageBuilder {
    pub fn new() -> Self {
        Self {
            slides: Vec::new(),
            slide_rels: Vec::new(),
            media: Vec::new(),
            order: None,
            slide_list: true,
            presentation: true,
        }
    }

    /// Append a slide made of the given shape elements.
    pub fn slide(mut self, shapes: &[String]) -> Self {
        self.slides.push(slide_xml(shapes));
        self.slide_rels.push(Vec::new());
        self
    }

    /// Add an image relationship to slide `number` (1-based).
    pub fn slide_rel(mut self, number: usize, id: &str, target: &str) -> Self {
        if let Some(rels) = self.slide_rels.get_mut(number - 1) {
            rels.push((id.to_string(), target.to_string()));
        }
        self
    }

    pub fn media(mut self, part_name: &str, data: &[u8]) -> Self {
        self.media.push((part_name.to_string(), data.to_vec()));
        self
    }

    /// List slide files in this order in `p:sldIdLst` instead of file order.
    pub fn slide_order(mut self, numbers: &[usize]) -> Self {
        self.order = Some(numbers.to_vec());
        self
    }

    pub fn without_slide_list(mut self) -> Self {
        self.slide_list = false;
        self
    }

    pub fn without_presentation(mut self) -> Self {
        self.presentation = false;
        self
    }

    /// Write the package into a byte buffer.
    pub fn build(&self) -> ZipResult<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(CompressionMethod::Stored);

        zip.start_file("[Content_Types].xml", options)?;
        zip.write_all(content_types_xml().as_bytes())?;

        if self.presentation {
            let order: Vec<usize> = match &self.order {
                Some(order) => order.clone(),
                None => (1..=self.slides.len()).collect(),
            };
            let ids: Vec<String> = if self.slide_list {
                order.iter().map(|n| slide_rel_id(*n)).collect()
            } else {
                Vec::new()
            };
            let ids: Vec<&str> = ids.iter().map(String::as_str).collect();

            zip.start_file("ppt/presentation.xml", options)?;
            zip.write_all(presentation_xml(&ids).as_bytes())?;

            zip.start_file("ppt/_rels/presentation.xml.rels", options)?;
            zip.write_all(self.presentation_rels_xml().as_bytes())?;
        }

        for (idx, (slide, rels)) in self.slides.iter().zip(&self.slide_rels).enumerate() {
            let number = idx + 1;
            zip.start_file(format!("ppt/slides/slide{}.xml", number), options)?;
            zip.write_all(slide.as_bytes())?;

            if !rels.is_empty() {
                zip.start_file(format!("ppt/slides/_rels/slide{}.xml.rels", number), options)?;
                zip.write_all(image_rels_xml(rels).as_bytes())?;
            }
        }

        for (part_name, data) in &self.media {
            zip.start_file(part_name.as_str(), options)?;
            zip.write_all(data)?;
        }

        Ok(zip.finish()?.into_inner())
    }

    /// Write the package to a file.
    pub fn write_to(&self, path: &Path) -> ZipResult<()> {
        std::fs::write(path, self.build()?)?;
        Ok(())
    }

    fn presentation_rels_xml(&self) -> String {
        let mut xml = format!(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="{}">"#, REL_NS);
        xml.push_str(&format!(
            r#"<Relationship Id="rId1" Type="{}/slideMaster" Target="slideMasters/slideMaster1.xml"/>"#,
            REL_BASE
        ));
        for number in 1..=self.slides.len() {
            xml.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}/slide" Target="slides/slide{}.xml"/>"#,
                slide_rel_id(number),
                REL_BASE,
                number
            ));
        }
        xml.push_str("</Relationships>");
        xml
    }
}

impl Default for PackageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn slide_rel_id(number: usize) -> String {
    format!("rId{}", number + 1)
}

fn content_types_xml() -> String {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/><Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/></Types>"#.to_string()
}

/// A presentation part listing the given slide relationship ids.
pub fn presentation_xml(rel_ids: &[&str]) -> String {
    let mut xml = format!(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:presentation {}>"#, NS);
    if !rel_ids.is_empty() {
        xml.push_str("<p:sldIdLst>");
        for (idx, id) in rel_ids.iter().enumerate() {
            xml.push_str(&format!(r#"<p:sldId id="{}" r:id="{}"/>"#, 256 + idx, id));
        }
        xml.push_str("</p:sldIdLst>");
    }
    xml.push_str(r#"<p:sldSz cx="9144000" cy="6858000"/></p:presentation>"#);
    xml
}

fn slide_xml(shapes: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sld {}><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{}</p:spTree></p:cSld></p:sld>"#,
        NS,
        shapes.concat()
    )
}

fn image_rels_xml(rels: &[(String, String)]) -> String {
    let mut xml = format!(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="{}">"#, REL_NS);
    for (id, target) in rels {
        xml.push_str(&format!(
            r#"<Relationship Id="{}" Type="{}/image" Target="{}"/>"#,
            id, REL_BASE, target
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

/// A text box; each line of `text` becomes a paragraph.
pub fn text_shape(text: &str) -> String {
    let paragraphs: String = text
        .split('\n')
        .map(|line| format!("<a:p><a:r><a:rPr lang=\"en-US\"/><a:t>{}</a:t></a:r></a:p>", escape(line)))
        .collect();
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="TextBox"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="4000000" cy="500000"/></a:xfrm></p:spPr><p:txBody><a:bodyPr/><a:lstStyle/>{}</p:txBody></p:sp>"#,
        paragraphs
    )
}

/// A graphic frame holding a table.
pub fn table_frame(rows: &[&[&str]]) -> String {
    let rows: String = rows
        .iter()
        .map(|row| {
            let cells: String = row
                .iter()
                .map(|cell| {
                    format!(
                        "<a:tc><a:txBody><a:bodyPr/><a:p><a:r><a:t>{}</a:t></a:r></a:p></a:txBody><a:tcPr/></a:tc>",
                        escape(*cell)
                    )
                })
                .collect();
            format!(r#"<a:tr h="370840">{}</a:tr>"#, cells)
        })
        .collect();
    format!(
        r#"<p:graphicFrame><p:nvGraphicFramePr><p:cNvPr id="4" name="Table 3"/><p:cNvGraphicFramePr/><p:nvPr/></p:nvGraphicFramePr><p:xfrm><a:off x="0" y="0"/><a:ext cx="6096000" cy="741680"/></p:xfrm><a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table"><a:tbl><a:tblPr/><a:tblGrid/>{}</a:tbl></a:graphicData></a:graphic></p:graphicFrame>"#,
        rows
    )
}

/// A picture embedding the image behind `rel_id`, sized in EMU.
pub fn picture(rel_id: &str, cx: u64, cy: u64) -> String {
    format!(
        r#"<p:pic><p:nvPicPr><p:cNvPr id="5" name="Picture 4"/><p:cNvPicPr/><p:nvPr/></p:nvPicPr><p:blipFill><a:blip r:embed="{}"/><a:stretch><a:fillRect/></a:stretch></p:blipFill><p:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{}" cy="{}"/></a:xfrm></p:spPr></p:pic>"#,
        rel_id, cx, cy
    )
}

/// Wraps two renditions of the same content in `mc:AlternateContent`.
pub fn alternate_content(choice: &str, fallback: &str) -> String {
    format!(
        r#"<mc:AlternateContent><mc:Choice Requires="p14">{}</mc:Choice><mc:Fallback>{}</mc:Fallback></mc:AlternateContent>"#,
        choice, fallback
    )
}
