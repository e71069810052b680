//! Parsed word-processing document.

use super::{Paragraph, Table};
use serde::{Deserialize, Serialize};

/// Body content of a DOCX file: paragraphs, then tables, each in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordDocument {
    /// Top-level body paragraphs (paragraphs inside tables are excluded)
    pub paragraphs: Vec<Paragraph>,

    /// Top-level body tables
    pub tables: Vec<Table>,
}

impl WordDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a paragraph.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    /// Add a table.
    pub fn add_table(&mut self, table: Table) {
        self.tables.push(table);
    }

    /// Check if the document has no paragraphs and no tables.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty() && self.tables.is_empty()
    }
}
