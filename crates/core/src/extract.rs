//! Shape classification into per-slide records.

use crate::{Shape, Slide, SlideShapes, Table};

/// Texts shorter than this many characters may become a slide title.
pub const DEFAULT_TITLE_MAX_CHARS: usize = 100;

/// Classifies shapes into titles, body texts, tables and images.
#[derive(Debug, Clone)]
pub struct SlideExtractor {
    /// Exclusive upper bound on title length, in characters.
    title_max_chars: usize,
}

impl Default for SlideExtractor {
    fn default() -> Self {
        Self {
            title_max_chars: DEFAULT_TITLE_MAX_CHARS,
        }
    }
}

impl SlideExtractor {
    /// Create an extractor with the default 100 character title limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom title length limit.
    pub fn with_title_max_chars(mut self, chars: usize) -> Self {
        self.title_max_chars = chars;
        self
    }

    /// Extract all slides, numbering them 1..=N in the given order.
    pub fn extract<T: SlideShapes>(&self, slides: &[T]) -> Vec<Slide> {
        slides
            .iter()
            .enumerate()
            .map(|(idx, slide)| self.extract_slide(idx + 1, slide.shapes()))
            .collect()
    }

    /// Extract a single slide from its shapes.
    ///
    /// Unreadable images are logged and skipped; nothing here fails the slide.
    pub fn extract_slide<S: Shape>(&self, slide_number: usize, shapes: &[S]) -> Slide {
        let mut slide = Slide::new(slide_number);
        log::debug!("Processing slide {} ({} shapes)", slide_number, shapes.len());

        for shape in shapes {
            if let Some(text) = shape.as_text() {
                let text = text.trim();
                if !text.is_empty() {
                    log::debug!("  - text: {}...", preview(text, 50));
                    if slide.title.is_none() && self.is_title(text) {
                        slide.title = Some(text.to_string());
                    } else {
                        slide.text_content.push(text.to_string());
                    }
                }
            }

            if let Some(table) = shape.as_table() {
                let table = trim_cells(table);
                log::debug!(
                    "  - table: {} rows x {} cols",
                    table.rows.len(),
                    table.header_width()
                );
                slide.tables.push(table);
            }

            match shape.as_image() {
                Some(Ok(image)) => {
                    log::debug!("  - image: {}", image.reference.filename);
                    slide.images.push(image.reference);
                }
                Some(Err(e)) => {
                    log::warn!("Slide {}: skipping image: {}", slide_number, e);
                }
                None => {}
            }
        }

        slide
    }

    fn is_title(&self, text: &str) -> bool {
        text.chars().count() < self.title_max_chars
    }
}

fn trim_cells(table: Table) -> Table {
    let rows = table
        .rows
        .into_iter()
        .map(|row| row.into_iter().map(|cell| cell.trim().to_string()).collect())
        .collect();
    Table::new(rows)
}

/// First `max_chars` characters of `text`.
pub(crate) fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::testing::FakeShape;

    fn text_of_len(len: usize) -> String {
        "x".repeat(len)
    }

    #[test]
    fn test_slides_are_numbered_in_order() {
        let slides: Vec<Vec<FakeShape>> = vec![vec![], vec![], vec![]];
        let extracted = SlideExtractor::new().extract(&slides);

        let numbers: Vec<usize> = extracted.iter().map(|s| s.slide_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_slide_has_no_content() {
        let slide = SlideExtractor::new().extract_slide::<FakeShape>(1, &[]);
        assert!(slide.is_empty());
    }

    #[test]
    fn test_title_limit_is_exclusive() {
        let extractor = SlideExtractor::new();

        let short = text_of_len(99);
        let slide = extractor.extract_slide(1, &[FakeShape::text(&short)]);
        assert_eq!(slide.title.as_deref(), Some(short.as_str()));
        assert!(slide.text_content.is_empty());

        let long = text_of_len(100);
        let slide = extractor.extract_slide(1, &[FakeShape::text(&long)]);
        assert_eq!(slide.title, None);
        assert_eq!(slide.text_content, vec![long]);
    }

    #[test]
    fn test_title_limit_counts_characters_not_bytes() {
        let text = "幻".repeat(99);
        let slide = SlideExtractor::new().extract_slide(1, &[FakeShape::text(&text)]);
        assert_eq!(slide.title, Some(text));
    }

    #[test]
    fn test_first_short_text_wins() {
        let shapes = vec![
            FakeShape::text("First"),
            FakeShape::text("Second"),
            FakeShape::text("Third"),
        ];
        let slide = SlideExtractor::new().extract_slide(1, &shapes);
        assert_eq!(slide.title.as_deref(), Some("First"));
        assert_eq!(slide.text_content, vec!["Second", "Third"]);
    }

    #[test]
    fn test_long_text_does_not_take_title() {
        let long = text_of_len(150);
        let shapes = vec![FakeShape::text(&long), FakeShape::text("Short")];
        let slide = SlideExtractor::new().extract_slide(1, &shapes);
        assert_eq!(slide.text_content, vec![long]);
        assert_eq!(slide.title.as_deref(), Some("Short"));
    }

    #[test]
    fn test_blank_text_is_ignored() {
        let shapes = vec![FakeShape::text("   \n\t"), FakeShape::text("  Padded  ")];
        let slide = SlideExtractor::new().extract_slide(1, &shapes);
        assert_eq!(slide.title.as_deref(), Some("Padded"));
        assert!(slide.text_content.is_empty());
    }

    #[test]
    fn test_custom_title_limit() {
        let extractor = SlideExtractor::new().with_title_max_chars(5);
        let slide = extractor.extract_slide(1, &[FakeShape::text("Hello")]);
        assert_eq!(slide.title, None);
        assert_eq!(slide.text_content, vec!["Hello"]);
    }

    #[test]
    fn test_table_cells_are_trimmed_and_ordered() {
        let shapes = vec![FakeShape::table(&[&[" A ", "B"], &["1", " 2", "3 "]])];
        let slide = SlideExtractor::new().extract_slide(1, &shapes);
        assert_eq!(
            slide.tables[0].rows,
            vec![vec!["A", "B"], vec!["1", "2", "3"]]
        );
    }

    #[test]
    fn test_capabilities_are_checked_independently() {
        let mut shape = FakeShape::table(&[&["A"]]);
        shape.text = Some("Caption".to_string());
        shape.image = Some(Ok(crate::ImageRef::new(Some("pic.png"), None, None)));

        let slide = SlideExtractor::new().extract_slide(1, &[shape]);
        assert_eq!(slide.title.as_deref(), Some("Caption"));
        assert_eq!(slide.tables.len(), 1);
        assert_eq!(slide.images.len(), 1);
    }

    #[test]
    fn test_broken_image_keeps_other_images() {
        let shapes = vec![
            FakeShape::image(Some("a.png"), b"a"),
            FakeShape::broken_image("blob missing"),
            FakeShape::image(Some("c.png"), b"c"),
        ];
        let slide = SlideExtractor::new().extract_slide(1, &shapes);
        let names: Vec<&str> = slide.images.iter().map(|i| i.filename.as_str()).collect();
        assert_eq!(names, vec!["a.png", "c.png"]);
    }

    #[test]
    fn test_three_slide_scenario() {
        let title = text_of_len(20);
        let body = text_of_len(150);
        let slides = vec![
            vec![FakeShape::text(&title), FakeShape::text(&body)],
            vec![FakeShape::table(&[&["A", "B", "C"], &["1", "2", "3"]])],
            vec![FakeShape::image(None, b"\x89PNG")],
        ];

        let extracted = SlideExtractor::new().extract(&slides);
        assert_eq!(extracted.len(), 3);

        assert_eq!(extracted[0].title.as_deref(), Some(title.as_str()));
        assert_eq!(extracted[0].text_content, vec![body]);

        assert_eq!(
            extracted[1].tables,
            vec![Table::new(vec![
                vec!["A".into(), "B".into(), "C".into()],
                vec!["1".into(), "2".into(), "3".into()],
            ])]
        );

        assert_eq!(extracted[2].images.len(), 1);
        assert_eq!(extracted[2].images[0].filename, "unknown");
    }

    #[test]
    fn test_preview_truncates_by_chars() {
        assert_eq!(preview("héllo wörld", 5), "héllo");
        assert_eq!(preview("abc", 10), "abc");
    }
}
