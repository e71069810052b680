//! # docpeek
//!
//! Browser-ready previews of submitted office documents.
//!
//! This library turns uploaded documents into artifacts a web page can show
//! directly: PDFs pass through unchanged, Word documents become semantic
//! HTML, and presentations become a PNG summary of one slide.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docpeek::{produce_preview, resolve_content_type};
//!
//! fn main() -> docpeek::Result<()> {
//!     let data = std::fs::read("report.docx")?;
//!     let html = produce_preview(&data, "docx", None)?;
//!     assert_eq!(resolve_content_type("docx").as_str(), "text/html");
//!     std::fs::write("preview.html", html)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Fixed content types**: derived from the declared file type, never sniffed
//! - **Graceful degradation**: malformed input yields an error page or placeholder image
//! - **Page addressing**: out-of-range slide numbers fall back to the first slide
//! - **Parallel batches**: `Previewer::preview_many` uses Rayon
//! - **Async file access**: optional `async` feature backed by Tokio

pub mod convert;
pub mod error;
pub mod format;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use convert::{DocumentRenderer, PreviewOptions, Previewer, UnavailableRenderer};
pub use error::{Error, Result};
pub use format::{resolve_content_type, ContentType, FileKind};
pub use model::{
    DocumentInfo, Paragraph, PreviewArtifact, PreviewRequest, Slide,
    SourceDocument, Table, WordDocument, UNKNOWN_COUNT,
};
pub use render::SlideOptions;

use std::path::Path;

/// Produce preview bytes for a document.
///
/// # Arguments
///
/// * `content` - Uploaded file content
/// * `file_type` - Declared extension (`pdf`, `docx`, `pptx`, `ppt`)
/// * `page` - Optional 1-based page or slide number
///
/// # Errors
///
/// Fails only with [`Error::UnsupportedFormat`]. Malformed documents
/// produce substitute output of the declared content type.
///
/// # Example
///
/// ```no_run
/// use docpeek::produce_preview;
///
/// let data = std::fs::read("deck.pptx").unwrap();
/// let png = produce_preview(&data, "pptx", Some(3)).unwrap();
/// ```
pub fn produce_preview(content: &[u8], file_type: &str, page: Option<i64>) -> Result<Vec<u8>> {
    Previewer::new().produce_preview(content, file_type, page)
}

/// Report size and page/slide count of a document. Never fails.
///
/// Counts that cannot be determined are reported as [`UNKNOWN_COUNT`].
pub fn describe(content: &[u8], file_type: &str) -> DocumentInfo {
    Previewer::new().describe(content, file_type)
}

/// Preview a document stored on disk.
///
/// # Example
///
/// ```no_run
/// use docpeek::preview_file;
///
/// let artifact = preview_file("submission.pdf", "pdf", None)?;
/// println!("{} ({} bytes)", artifact.content_type, artifact.len());
/// # Ok::<(), docpeek::Error>(())
/// ```
pub fn preview_file<P: AsRef<Path>>(
    path: P,
    file_type: &str,
    page: Option<i64>,
) -> Result<PreviewArtifact> {
    let data = std::fs::read(path)?;
    let request = PreviewRequest {
        source: SourceDocument::new(&data, file_type),
        page,
    };
    Previewer::new().preview(&request)
}

/// Describe a document stored on disk.
///
/// A missing or unreadable file is reported with size 0.
pub fn describe_file<P: AsRef<Path>>(path: P, file_type: &str) -> DocumentInfo {
    let path = path.as_ref();
    let data = std::fs::read(path).unwrap_or_else(|e| {
        log::warn!("Cannot read {}: {}", path.display(), e);
        Vec::new()
    });
    describe(&data, file_type)
}

/// Preview a document stored on disk without blocking the async runtime.
#[cfg(feature = "async")]
pub async fn preview_file_async<P: AsRef<Path>>(
    path: P,
    file_type: &str,
    page: Option<i64>,
) -> Result<PreviewArtifact> {
    let data = tokio::fs::read(path).await?;
    let file_type = file_type.to_string();
    tokio::task::spawn_blocking(move || {
        let request = PreviewRequest {
            source: SourceDocument::new(&data, &file_type),
            page,
        };
        Previewer::new().preview(&request)
    })
    .await
    .map_err(|e| Error::Other(format!("preview task failed: {}", e)))?
}

/// Describe a document stored on disk without blocking the async runtime.
#[cfg(feature = "async")]
pub async fn describe_file_async<P: AsRef<Path>>(path: P, file_type: &str) -> DocumentInfo {
    let data = tokio::fs::read(path.as_ref()).await.unwrap_or_default();
    let file_type = file_type.to_string();
    let size = data.len() as u64;
    tokio::task::spawn_blocking(move || describe(&data, &file_type))
        .await
        .unwrap_or_else(|e| {
            log::error!("describe task failed: {}", e);
            DocumentInfo::with_size(size)
        })
}
