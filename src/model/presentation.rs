//! Slide types: slides and their shapes.

use serde::{Deserialize, Serialize};

/// A single slide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    /// Top-level shapes in document order
    pub shapes: Vec<Shape>,
}

impl Slide {
    /// Create a slide from shapes.
    pub fn new(shapes: Vec<Shape>) -> Self {
        Self { shapes }
    }

    /// Build a slide where every shape is a text box.
    pub fn from_texts<S: Into<String>>(texts: impl IntoIterator<Item = S>) -> Self {
        Self::new(texts.into_iter().map(Shape::text_box).collect())
    }

    /// Trimmed, non-empty text of each text-bearing shape, in order.
    pub fn text_blocks(&self) -> impl Iterator<Item = &str> {
        self.shapes
            .iter()
            .filter_map(|shape| shape.text.as_deref())
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

/// A shape on a slide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    /// Shape name from `p:cNvPr/@name`
    pub name: Option<String>,

    /// Text frame content; `None` when the shape has no text frame
    pub text: Option<String>,
}

impl Shape {
    /// A shape with a text frame.
    pub fn text_box(text: impl Into<String>) -> Self {
        Self {
            name: None,
            text: Some(text.into()),
        }
    }

    /// A shape with no text frame (picture, connector, group).
    pub fn graphic(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            text: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_blocks_skip_empty_and_graphics() {
        let slide = Slide::new(vec![
            Shape::text_box("  Title  "),
            Shape::graphic("Picture 1"),
            Shape::text_box("   "),
            Shape::text_box("Body"),
        ]);

        let blocks: Vec<&str> = slide.text_blocks().collect();
        assert_eq!(blocks, vec!["Title", "Body"]);
    }
}
