//! Capability view of a presentation's shapes.
//!
//! A parser backend exposes its slides through [`SlideShapes`] and each of
//! their shapes through [`Shape`]. Every capability is queried on its own, so
//! one shape may carry text, a table and an image at the same time.

use crate::{ImageRef, Result, Table};

/// An embedded image with its raw bytes.
#[derive(Debug, Clone)]
pub struct ShapeImage<'a> {
    /// Name and declared size of the image.
    pub reference: ImageRef,

    /// Lowercase file extension without the dot, e.g. `"png"`.
    pub extension: &'a str,

    /// Raw image bytes as stored in the presentation.
    pub data: &'a [u8],
}

/// Content queries for a single shape.
pub trait Shape {
    /// Raw text of the shape, if it has a text body.
    fn as_text(&self) -> Option<String>;

    /// Table rows, if the shape is a table container.
    fn as_table(&self) -> Option<Table>;

    /// Embedded image, if the shape has one.
    ///
    /// `Some(Err(_))` means the shape references an image that cannot be read.
    fn as_image(&self) -> Option<Result<ShapeImage<'_>>>;
}

/// A slide, seen as its shapes in document order.
pub trait SlideShapes {
    type Shape: Shape;

    fn shapes(&self) -> &[Self::Shape];
}

impl<S: Shape> SlideShapes for Vec<S> {
    type Shape = S;

    fn shapes(&self) -> &[S] {
        self
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory shapes for unit tests.

    use super::*;
    use crate::Error;

    #[derive(Debug, Default)]
    pub struct FakeShape {
        pub text: Option<String>,
        pub table: Option<Table>,
        pub image: Option<std::result::Result<ImageRef, String>>,
        pub data: Vec<u8>,
    }

    impl FakeShape {
        pub fn text(text: &str) -> Self {
            Self {
                text: Some(text.to_string()),
                ..Self::default()
            }
        }

        pub fn table(rows: &[&[&str]]) -> Self {
            let rows = rows
                .iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect();
            Self {
                table: Some(Table::new(rows)),
                ..Self::default()
            }
        }

        pub fn image(filename: Option<&str>, data: &[u8]) -> Self {
            Self {
                image: Some(Ok(ImageRef::new(filename, Some(100), Some(50)))),
                data: data.to_vec(),
                ..Self::default()
            }
        }

        pub fn broken_image(reason: &str) -> Self {
            Self {
                image: Some(Err(reason.to_string())),
                ..Self::default()
            }
        }
    }

    impl Shape for FakeShape {
        fn as_text(&self) -> Option<String> {
            self.text.clone()
        }

        fn as_table(&self) -> Option<Table> {
            self.table.clone()
        }

        fn as_image(&self) -> Option<Result<ShapeImage<'_>>> {
            self.image.as_ref().map(|image| match image {
                Ok(reference) => Ok(ShapeImage {
                    reference: reference.clone(),
                    extension: "png",
                    data: &self.data,
                }),
                Err(reason) => Err(Error::ShapeExtraction(reason.clone())),
            })
        }
    }
}
