//! Preview dispatch with pluggable per-format renderers.
//!
//! Each supported format is backed by a [`DocumentRenderer`]. Renderers are
//! chosen once when a [`Previewer`] is built; a format whose capability is
//! switched off gets an [`UnavailableRenderer`] instead. Rendering failures
//! never reach the caller: they are turned into substitute artifacts of the
//! declared content type.
//!
//! # Example
//!
//! ```no_run
//! use docpeek::convert::{PreviewOptions, Previewer};
//! use docpeek::PreviewRequest;
//!
//! fn main() -> docpeek::Result<()> {
//!     let previewer = Previewer::with_options(PreviewOptions::new().with_pdf_capability(false));
//!
//!     let data = std::fs::read("slides.pptx")?;
//!     let artifact = previewer.preview(&PreviewRequest::new(&data, "pptx").with_page(2))?;
//!     std::fs::write("preview.png", &artifact.content)?;
//!     Ok(())
//! }
//! ```

mod docx;
mod pdf;
mod slides;

pub use docx::DocxRenderer;
pub use pdf::PdfRenderer;
pub use slides::SlideRenderer;

use crate::error::{Error, Result};
use crate::format::FileKind;
use crate::model::{DocumentInfo, PreviewArtifact, PreviewRequest, UNKNOWN_COUNT};
use crate::render::{Rasterizer, SlideOptions};
use rayon::prelude::*;
use std::sync::Arc;

/// Reason reported by renderers that were switched off.
pub const NOT_INSTALLED: &str = "not installed";

/// Options for preview conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewOptions {
    /// Slide rasterization settings
    pub slides: SlideOptions,

    /// Whether DOCX to HTML conversion is available
    pub docx_capability: bool,

    /// Whether slide rasterization is available
    pub slides_capability: bool,

    /// Whether PDF structure parsing (page counting) is available
    pub pdf_capability: bool,
}

impl PreviewOptions {
    /// Create new preview options with every capability enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set slide rasterization options.
    pub fn with_slide_options(mut self, options: SlideOptions) -> Self {
        self.slides = options;
        self
    }

    /// Enable or disable DOCX conversion.
    pub fn with_docx_capability(mut self, available: bool) -> Self {
        self.docx_capability = available;
        self
    }

    /// Enable or disable slide rasterization.
    pub fn with_slides_capability(mut self, available: bool) -> Self {
        self.slides_capability = available;
        self
    }

    /// Enable or disable PDF page counting.
    pub fn with_pdf_capability(mut self, available: bool) -> Self {
        self.pdf_capability = available;
        self
    }
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            slides: SlideOptions::default(),
            docx_capability: true,
            slides_capability: true,
            pdf_capability: true,
        }
    }
}

/// Trait for per-format preview renderers.
///
/// Implement this trait to plug in a different backend for a format.
pub trait DocumentRenderer: Send + Sync {
    /// Get the name of this renderer.
    fn name(&self) -> &str;

    /// Render preview bytes for a document.
    ///
    /// `page` is the caller's 1-based page or slide, if any.
    fn render(&self, content: &[u8], page: Option<i64>) -> Result<Vec<u8>>;

    /// Count pages or slides. `Ok(None)` when the format is not paginated.
    fn count(&self, _content: &[u8]) -> Result<Option<u32>> {
        Ok(None)
    }

    /// Whether this renderer can produce real output.
    fn is_available(&self) -> bool {
        true
    }
}

/// Stand-in for a renderer whose backing capability is missing.
#[derive(Debug, Clone)]
pub struct UnavailableRenderer {
    format: &'static str,
    reason: String,
}

impl UnavailableRenderer {
    /// Create a stub for a format.
    pub fn new(format: &'static str, reason: impl Into<String>) -> Self {
        Self {
            format,
            reason: reason.into(),
        }
    }

    /// Stub reporting the capability as not installed.
    pub fn not_installed(format: &'static str) -> Self {
        Self::new(format, NOT_INSTALLED)
    }

    fn error(&self) -> Error {
        Error::RendererUnavailable {
            format: self.format,
            reason: self.reason.clone(),
        }
    }
}

impl DocumentRenderer for UnavailableRenderer {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn render(&self, _content: &[u8], _page: Option<i64>) -> Result<Vec<u8>> {
        Err(self.error())
    }

    fn count(&self, _content: &[u8]) -> Result<Option<u32>> {
        Err(self.error())
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Converts uploaded documents into preview artifacts.
///
/// Cheap to clone; renderers are shared behind `Arc`.
#[derive(Clone)]
pub struct Previewer {
    pdf: Arc<dyn DocumentRenderer>,
    docx: Arc<dyn DocumentRenderer>,
    slides: Arc<dyn DocumentRenderer>,
    placeholder: Rasterizer,
}

impl Previewer {
    /// Create a previewer with every capability enabled.
    pub fn new() -> Self {
        Self::with_options(PreviewOptions::default())
    }

    /// Create a previewer from options.
    pub fn with_options(options: PreviewOptions) -> Self {
        let pdf: Arc<dyn DocumentRenderer> = if options.pdf_capability {
            Arc::new(PdfRenderer::new())
        } else {
            Arc::new(UnavailableRenderer::not_installed("pdf"))
        };
        let docx: Arc<dyn DocumentRenderer> = if options.docx_capability {
            Arc::new(DocxRenderer::new())
        } else {
            Arc::new(UnavailableRenderer::not_installed("docx"))
        };
        let slides: Arc<dyn DocumentRenderer> = if options.slides_capability {
            Arc::new(SlideRenderer::new(options.slides.clone()))
        } else {
            Arc::new(UnavailableRenderer::not_installed("pptx"))
        };

        Self {
            pdf,
            docx,
            slides,
            placeholder: Rasterizer::bitmap(options.slides.glyph_scale),
        }
    }

    /// Replace the renderer used for a file kind.
    ///
    /// `pptx` and `ppt` share one renderer.
    pub fn with_renderer(mut self, kind: FileKind, renderer: Arc<dyn DocumentRenderer>) -> Self {
        match kind {
            FileKind::Pdf => self.pdf = renderer,
            FileKind::Docx => self.docx = renderer,
            FileKind::Pptx | FileKind::Ppt => self.slides = renderer,
        }
        self
    }

    /// Get the renderer used for a file kind.
    pub fn renderer(&self, kind: FileKind) -> &Arc<dyn DocumentRenderer> {
        match kind {
            FileKind::Pdf => &self.pdf,
            FileKind::Docx => &self.docx,
            FileKind::Pptx | FileKind::Ppt => &self.slides,
        }
    }

    /// Check whether a file kind has a working renderer.
    pub fn is_available(&self, kind: FileKind) -> bool {
        self.renderer(kind).is_available()
    }

    /// Produce preview bytes for a document.
    ///
    /// Fails only with [`Error::UnsupportedFormat`]; rendering problems
    /// yield substitute output instead.
    pub fn produce_preview(&self, content: &[u8], file_type: &str, page: Option<i64>) -> Result<Vec<u8>> {
        let kind = FileKind::from_extension(file_type)?;
        log::debug!("Previewing {} bytes as {} (page {:?})", content.len(), kind, page);
        Ok(self.render_kind(kind, content, page))
    }

    /// Produce a preview artifact with its content type.
    pub fn preview(&self, request: &PreviewRequest<'_>) -> Result<PreviewArtifact> {
        let kind = FileKind::from_extension(request.source.file_type)?;
        let content = self.render_kind(kind, request.source.content, request.page);
        Ok(PreviewArtifact::new(content, kind))
    }

    /// Produce previews for many requests in parallel.
    ///
    /// Results are returned in request order.
    pub fn preview_many(&self, requests: &[PreviewRequest<'_>]) -> Vec<Result<PreviewArtifact>> {
        requests.par_iter().map(|request| self.preview(request)).collect()
    }

    /// Report size and page/slide count. Never fails.
    pub fn describe(&self, content: &[u8], file_type: &str) -> DocumentInfo {
        let mut info = DocumentInfo::with_size(content.len() as u64);
        match FileKind::from_extension(file_type) {
            Ok(kind) if kind.is_paginated() => {
                let count = Some(self.count_or_unknown(self.renderer(kind), content));
                if kind.is_presentation() {
                    info.slide_count = count;
                } else {
                    info.page_count = count;
                }
            }
            Ok(_) => {}
            Err(_) => log::debug!("No count for file type {:?}", file_type),
        }
        info
    }

    fn render_kind(&self, kind: FileKind, content: &[u8], page: Option<i64>) -> Vec<u8> {
        match kind {
            FileKind::Pdf => pdf::preview(self.pdf.as_ref(), content),
            FileKind::Docx => docx::preview(self.docx.as_ref(), content),
            FileKind::Pptx | FileKind::Ppt => {
                slides::preview(self.slides.as_ref(), &self.placeholder, content, page)
            }
        }
    }

    fn count_or_unknown(&self, renderer: &Arc<dyn DocumentRenderer>, content: &[u8]) -> i64 {
        match renderer.count(content) {
            Ok(Some(count)) => i64::from(count),
            Ok(None) => UNKNOWN_COUNT,
            Err(e) => {
                log::warn!("Could not count pages with {}: {}", renderer.name(), e);
                UNKNOWN_COUNT
            }
        }
    }
}

impl Default for Previewer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Previewer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Previewer")
            .field("pdf", &self.pdf.name())
            .field("docx", &self.docx.name())
            .field("slides", &self.slides.name())
            .finish()
    }
}
