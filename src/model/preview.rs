//! Request and response types at the preview boundary.

use crate::error::{Error, Result};
use crate::format::{ContentType, FileKind};
use serde::{Deserialize, Serialize};

/// Count value meaning "could not be determined".
pub const UNKNOWN_COUNT: i64 = -1;

/// Uploaded bytes plus the file type declared at upload time.
///
/// The converter only borrows the buffer; it never mutates or stores it.
#[derive(Debug, Clone, Copy)]
pub struct SourceDocument<'a> {
    /// Raw file content
    pub content: &'a [u8],

    /// Declared extension (`pdf`, `docx`, `pptx`, `ppt`)
    pub file_type: &'a str,
}

impl<'a> SourceDocument<'a> {
    /// Create a source document.
    pub fn new(content: &'a [u8], file_type: &'a str) -> Self {
        Self { content, file_type }
    }
}

/// A source document with an optional 1-based page or slide number.
#[derive(Debug, Clone, Copy)]
pub struct PreviewRequest<'a> {
    /// Document to preview
    pub source: SourceDocument<'a>,

    /// Requested page/slide; out-of-range values fall back to the first
    pub page: Option<i64>,
}

impl<'a> PreviewRequest<'a> {
    /// Create a request for the default (first) page.
    pub fn new(content: &'a [u8], file_type: &'a str) -> Self {
        Self {
            source: SourceDocument::new(content, file_type),
            page: None,
        }
    }

    /// Select a page or slide.
    pub fn with_page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }
}

/// Rendered preview bytes and their content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewArtifact {
    /// Preview bytes (PDF, HTML or PNG)
    pub content: Vec<u8>,

    /// Content type derived from the declared file type
    pub content_type: ContentType,

    /// Declared file type the artifact was produced for
    pub kind: FileKind,
}

impl PreviewArtifact {
    /// Create an artifact for a file kind.
    pub fn new(content: Vec<u8>, kind: FileKind) -> Self {
        Self {
            content,
            content_type: kind.content_type(),
            kind,
        }
    }

    /// Value for the `Content-Disposition` response header.
    pub fn content_disposition(&self) -> String {
        format!("inline; filename=preview.{}", self.kind.extension())
    }

    /// Get content length in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check if the artifact is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Size and page/slide count of a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// Size of the source in bytes
    pub size_bytes: u64,

    /// Page count (PDF only); -1 when unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<i64>,

    /// Slide count (PPTX/PPT only); -1 when unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slide_count: Option<i64>,
}

impl DocumentInfo {
    /// Info with only the size known.
    pub fn with_size(size_bytes: u64) -> Self {
        Self {
            size_bytes,
            ..Self::default()
        }
    }

    /// Page or slide count, whichever applies.
    pub fn count(&self) -> Option<i64> {
        self.page_count.or(self.slide_count)
    }

    /// Whether a count applies and was determined.
    pub fn has_known_count(&self) -> bool {
        self.count().is_some_and(|c| c != UNKNOWN_COUNT)
    }

    /// Serialize as the JSON object returned by the info endpoint.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::Other(format!("JSON serialization failed: {}", e)))
    }
}
