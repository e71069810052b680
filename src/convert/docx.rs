//! DOCX preview: semantic HTML with static error pages.

use crate::error::{Error, Result};
use crate::parser::DocxParser;
use crate::render::{error_page, to_html, unavailable_page};

use super::DocumentRenderer;

/// DOCX to HTML renderer.
#[derive(Debug, Clone, Default)]
pub struct DocxRenderer {
    _private: (),
}

impl DocxRenderer {
    /// Create a new DOCX renderer.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentRenderer for DocxRenderer {
    fn name(&self) -> &str {
        "docx"
    }

    fn render(&self, content: &[u8], _page: Option<i64>) -> Result<Vec<u8>> {
        let doc = DocxParser::from_bytes(content)?.parse()?;
        log::debug!(
            "Parsed DOCX: {} paragraphs, {} tables",
            doc.paragraphs.len(),
            doc.tables.len()
        );
        Ok(to_html(&doc).into_bytes())
    }
}

/// Render HTML, replacing failures with a static page.
pub(super) fn preview(renderer: &dyn DocumentRenderer, content: &[u8]) -> Vec<u8> {
    match renderer.render(content, None) {
        Ok(html) => html,
        Err(Error::RendererUnavailable { reason, .. }) => {
            log::warn!("DOCX preview unavailable: {}", reason);
            unavailable_page(&format!("DOCX renderer {}.", reason)).into_bytes()
        }
        Err(e) => {
            log::warn!("DOCX preview failed: {}", e);
            error_page(&e.to_string()).into_bytes()
        }
    }
}
