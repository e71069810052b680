//! PDF preview: pass-through with lopdf page counting.

use crate::error::Result;
use crate::parser::pdf::page_count;

use super::DocumentRenderer;

/// PDF renderer.
///
/// Browsers display PDFs natively, so the preview is the input itself.
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    _private: (),
}

impl PdfRenderer {
    /// Create a new PDF renderer.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentRenderer for PdfRenderer {
    fn name(&self) -> &str {
        "pdf"
    }

    fn render(&self, content: &[u8], _page: Option<i64>) -> Result<Vec<u8>> {
        Ok(content.to_vec())
    }

    fn count(&self, content: &[u8]) -> Result<Option<u32>> {
        page_count(content).map(Some)
    }
}

/// PDF bytes are returned unchanged even when the renderer is a stub.
pub(super) fn preview(renderer: &dyn DocumentRenderer, content: &[u8]) -> Vec<u8> {
    renderer.render(content, None).unwrap_or_else(|e| {
        log::debug!("PDF renderer unavailable ({}), passing bytes through", e);
        content.to_vec()
    })
}
