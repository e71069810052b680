//! Document model types for preview conversion.
//!
//! This module defines the intermediate representation that bridges
//! package parsing and preview rendering, plus the request/response
//! types exchanged with the caller.

mod document;
mod paragraph;
mod presentation;
mod preview;
mod table;

pub use document::WordDocument;
pub use paragraph::{heading_level_for, Paragraph, ParagraphStyle, MAX_HEADING_LEVEL};
pub use presentation::{Shape, Slide};
pub use preview::{DocumentInfo, PreviewArtifact, PreviewRequest, SourceDocument, UNKNOWN_COUNT};
pub use table::{Table, TableCell, TableRow};
