//! Painting slide layouts onto RGB canvases and PNG encoding.

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use ab_glyph::{FontVec, PxScale};
use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;

use crate::error::{Error, Result};

use super::options::{SlideOptions, MAX_GLYPH_SCALE};
use super::slide::{SlideLayout, TextItem};

/// Width and height of a bitmap glyph cell before scaling.
const GLYPH_CELL: u32 = 8;

/// Where glyph shapes come from.
#[derive(Clone)]
enum GlyphSource {
    /// Built-in 8x8 bitmap font, magnified by an integer factor
    Bitmap { scale: u32 },
    /// A TrueType font loaded from disk
    TrueType { font: Arc<FontVec>, scale: PxScale },
}

/// Paints [`SlideLayout`]s.
///
/// Holds only immutable font data; every call paints onto a fresh canvas.
#[derive(Clone)]
pub struct Rasterizer {
    glyphs: GlyphSource,
}

impl std::fmt::Debug for Rasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let source = match &self.glyphs {
            GlyphSource::Bitmap { .. } => "bitmap",
            GlyphSource::TrueType { .. } => "truetype",
        };
        f.debug_struct("Rasterizer").field("glyphs", &source).finish()
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::bitmap(1)
    }
}

impl Rasterizer {
    /// Rasterizer using the built-in bitmap font.
    ///
    /// The magnification is clamped to `1..=MAX_GLYPH_SCALE`.
    pub fn bitmap(scale: u32) -> Self {
        Self {
            glyphs: GlyphSource::Bitmap {
                scale: scale.clamp(1, MAX_GLYPH_SCALE),
            },
        }
    }

    /// Rasterizer using a TrueType font file.
    pub fn truetype(path: &Path, px_height: f32) -> Result<Self> {
        let data = std::fs::read(path)?;
        let font = FontVec::try_from_vec(data)
            .map_err(|e| Error::Render(format!("invalid font {}: {}", path.display(), e)))?;
        Ok(Self {
            glyphs: GlyphSource::TrueType {
                font: Arc::new(font),
                scale: PxScale::from(px_height),
            },
        })
    }

    /// Build a rasterizer from slide options.
    ///
    /// A font that cannot be loaded falls back to the bitmap font.
    pub fn from_options(options: &SlideOptions) -> Self {
        match &options.font_path {
            Some(path) => Self::truetype(path, options.font_size).unwrap_or_else(|e| {
                log::warn!("Falling back to bitmap font: {}", e);
                Self::bitmap(options.glyph_scale)
            }),
            None => Self::bitmap(options.glyph_scale),
        }
    }

    /// Check if the built-in bitmap font is in use.
    pub fn is_bitmap(&self) -> bool {
        matches!(self.glyphs, GlyphSource::Bitmap { .. })
    }

    /// Paint a layout onto a new canvas.
    pub fn paint(&self, layout: &SlideLayout) -> RgbImage {
        let width = layout.width.max(1);
        let height = layout.height.max(1);
        let mut canvas = RgbImage::from_pixel(width, height, Rgb(layout.background));

        for item in layout.draw_calls() {
            self.draw_item(&mut canvas, item);
        }
        canvas
    }

    /// Paint a layout and encode it as PNG.
    pub fn render_png(&self, layout: &SlideLayout) -> Result<Vec<u8>> {
        encode_png(self.paint(layout))
    }

    /// Paint and encode a placeholder, never failing.
    ///
    /// Returns an empty buffer only if PNG encoding itself fails.
    pub fn placeholder_png(&self, layout: &SlideLayout) -> Vec<u8> {
        self.render_png(layout).unwrap_or_else(|e| {
            log::error!("Failed to encode placeholder image: {}", e);
            Vec::new()
        })
    }

    fn draw_item(&self, canvas: &mut RgbImage, item: &TextItem) {
        let color = Rgb(item.color);
        match &self.glyphs {
            GlyphSource::Bitmap { scale } => {
                draw_bitmap_text(canvas, color, item.x, item.y, *scale, &item.text)
            }
            GlyphSource::TrueType { font, scale } => {
                draw_text_mut(canvas, color, item.x, item.y, *scale, &**font, &item.text)
            }
        }
    }
}

/// Encode an RGB canvas as PNG.
pub fn encode_png(image: RgbImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(image).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

fn glyph_for(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

fn draw_bitmap_text(canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, scale: u32, text: &str) {
    let cell = (GLYPH_CELL * scale) as i64;
    let (width, height) = (canvas.width() as i64, canvas.height() as i64);

    for (i, c) in text.chars().enumerate() {
        let origin_x = x as i64 + i as i64 * cell;
        if origin_x >= width {
            break;
        }
        if c == ' ' {
            continue;
        }

        let glyph = glyph_for(c);
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH_CELL {
                if bits & (1 << col) == 0 {
                    continue;
                }
                let px = origin_x + (col * scale) as i64;
                let py = y as i64 + (row as u32 * scale) as i64;
                for dy in 0..scale as i64 {
                    for dx in 0..scale as i64 {
                        let (tx, ty) = (px + dx, py + dy);
                        if (0..width).contains(&tx) && (0..height).contains(&ty) {
                            canvas.put_pixel(tx as u32, ty as u32, color);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Slide;
    use crate::render::options::{BLACK, WHITE};
    use crate::render::slide::layout_slide;

    const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

    fn has_color_in(image: &RgbImage, color: [u8; 3], x0: u32, y0: u32, w: u32, h: u32) -> bool {
        (y0..y0 + h).any(|y| (x0..x0 + w).any(|x| image.get_pixel(x, y).0 == color))
    }

    #[test]
    fn test_paint_background_and_text() {
        let slide = Slide::from_texts(["Hello"]);
        let layout = layout_slide(&slide, 0, 1, &SlideOptions::default());
        let image = Rasterizer::default().paint(&layout);

        assert_eq!(image.dimensions(), (1280, 720));
        assert_eq!(image.get_pixel(0, 0).0, WHITE);
        assert!(has_color_in(&image, BLACK, 50, 50, 40, 8));
        assert!(!has_color_in(&image, BLACK, 50, 100, 40, 8));
    }

    #[test]
    fn test_text_clipped_at_canvas_edge() {
        let layout = SlideLayout::unavailable(&"W".repeat(500));
        let image = Rasterizer::bitmap(3).paint(&layout);
        assert_eq!(image.dimensions(), (800, 600));
    }

    #[test]
    fn test_oversized_glyph_scale_is_clamped() {
        let options = SlideOptions {
            glyph_scale: u32::MAX,
            ..SlideOptions::default()
        };
        let layout = layout_slide(&Slide::from_texts(["Hi"]), 0, 1, &options);
        let image = Rasterizer::from_options(&options).paint(&layout);

        let cell = 8 * MAX_GLYPH_SCALE;
        assert!(has_color_in(&image, BLACK, 50, 50, 2 * cell, cell));
        assert!(!has_color_in(&image, BLACK, 50 + 2 * cell, 50, cell, cell));
    }

    #[test]
    fn test_render_png() {
        let layout = SlideLayout::error("boom");
        let png = Rasterizer::default().render_png(&layout).unwrap();
        assert!(png.starts_with(PNG_SIGNATURE));

        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (800, 600));
        assert_eq!(decoded.to_rgb8().get_pixel(0, 0).0, [0xff, 0xf0, 0xf0]);
    }

    #[test]
    fn test_missing_font_falls_back_to_bitmap() {
        let options = SlideOptions::new().with_font_path("/nonexistent/font.ttf");
        assert!(Rasterizer::from_options(&options).is_bitmap());
        assert!(Rasterizer::truetype(Path::new("/nonexistent/font.ttf"), 16.0).is_err());
    }

    #[test]
    fn test_unknown_glyph_has_fallback() {
        assert_ne!(glyph_for('\u{4e2d}'), [0; 8]);
        assert_eq!(glyph_for('A'), BASIC_FONTS.get('A').unwrap());
    }
}
