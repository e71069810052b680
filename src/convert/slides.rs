//! PPTX/PPT preview: one slide rasterized as a text summary.

use crate::error::{Error, Result};
use crate::parser::PptxParser;
use crate::render::{clamp_slide_index, layout_slide, Rasterizer, SlideLayout, SlideOptions};

use super::DocumentRenderer;

/// Slide summary renderer.
#[derive(Debug, Clone)]
pub struct SlideRenderer {
    options: SlideOptions,
    rasterizer: Rasterizer,
}

impl SlideRenderer {
    /// Create a slide renderer; loads the configured font once.
    pub fn new(options: SlideOptions) -> Self {
        let rasterizer = Rasterizer::from_options(&options);
        Self {
            options,
            rasterizer,
        }
    }

    /// Lay out the requested slide without painting it.
    pub fn layout(&self, content: &[u8], page: Option<i64>) -> Result<SlideLayout> {
        let mut parser = PptxParser::from_bytes(content)?;
        let total = parser.slide_count();
        if total == 0 {
            return Err(Error::Corrupted("presentation has no slides".into()));
        }

        let index = clamp_slide_index(page, total);
        let slide = parser.parse_slide(index)?;
        log::debug!(
            "Rendering slide {}/{} with {} shapes",
            index + 1,
            total,
            slide.shapes.len()
        );
        Ok(layout_slide(&slide, index, total, &self.options))
    }
}

impl Default for SlideRenderer {
    fn default() -> Self {
        Self::new(SlideOptions::default())
    }
}

impl DocumentRenderer for SlideRenderer {
    fn name(&self) -> &str {
        "pptx"
    }

    fn render(&self, content: &[u8], page: Option<i64>) -> Result<Vec<u8>> {
        let layout = self.layout(content, page)?;
        self.rasterizer.render_png(&layout)
    }

    fn count(&self, content: &[u8]) -> Result<Option<u32>> {
        let slides = PptxParser::from_bytes(content)?.slide_count();
        u32::try_from(slides)
            .map(Some)
            .map_err(|_| Error::Corrupted(format!("implausible slide count {}", slides)))
    }
}

/// Render a slide PNG, replacing failures with a placeholder PNG.
pub(super) fn preview(
    renderer: &dyn DocumentRenderer,
    placeholder: &Rasterizer,
    content: &[u8],
    page: Option<i64>,
) -> Vec<u8> {
    match renderer.render(content, page) {
        Ok(png) => png,
        Err(Error::RendererUnavailable { format, reason }) => {
            log::warn!("Slide preview unavailable: {}", reason);
            let message = format!("{} renderer {}", format.to_uppercase(), reason);
            placeholder.placeholder_png(&SlideLayout::unavailable(&message))
        }
        Err(e) => {
            log::warn!("Slide preview failed: {}", e);
            placeholder.placeholder_png(&SlideLayout::error(&e.to_string()))
        }
    }
}
