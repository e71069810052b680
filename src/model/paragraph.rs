//! Paragraph types for word-processing documents.

use serde::{Deserialize, Serialize};

/// Deepest heading level that gets its own HTML tag.
pub const MAX_HEADING_LEVEL: u8 = 3;

/// A body paragraph reduced to its plain text.
///
/// Run-level formatting (bold, italic, fonts) is not kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Concatenated run text
    pub text: String,

    /// Paragraph style
    pub style: ParagraphStyle,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a body paragraph with plain text.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: ParagraphStyle::default(),
        }
    }

    /// Create a paragraph whose style is identified by name.
    pub fn styled(text: impl Into<String>, style_name: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: ParagraphStyle::named(style_name),
        }
    }

    /// Text with surrounding whitespace removed.
    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }

    /// Check if the paragraph has no visible text.
    pub fn is_empty(&self) -> bool {
        self.trimmed_text().is_empty()
    }

    /// Get the heading level (1-3) or None for body text.
    pub fn heading_level(&self) -> Option<u8> {
        self.style.heading_level
    }
}

/// Paragraph style information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphStyle {
    /// Style name as found in the styles part (e.g. "heading 1")
    pub name: Option<String>,

    /// Heading level derived from the style name
    pub heading_level: Option<u8>,
}

impl ParagraphStyle {
    /// Build a style from its name, classifying heading levels.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        let heading_level = heading_level_for(&name);
        Self {
            name: Some(name),
            heading_level,
        }
    }
}

/// Classify a style name as heading 1, 2 or 3.
///
/// Matching is case-insensitive and ignores spaces, so both the display
/// name ("Heading 1") and the style id ("Heading1") are recognized.
pub fn heading_level_for(style_name: &str) -> Option<u8> {
    let compact: String = style_name
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    (1..=MAX_HEADING_LEVEL).find(|level| compact.contains(&format!("heading{}", level)))
}
