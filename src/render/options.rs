//! Slide rendering options and configuration.

use std::path::PathBuf;

/// An RGB color.
pub type Color = [u8; 3];

/// Plain white.
pub const WHITE: Color = [255, 255, 255];
/// Plain black.
pub const BLACK: Color = [0, 0, 0];
/// Mid gray, used for the slide footer.
pub const GRAY: Color = [128, 128, 128];
/// Pure red, used for placeholder messages.
pub const RED: Color = [255, 0, 0];

/// Largest bitmap font magnification.
pub const MAX_GLYPH_SCALE: u32 = 8;

/// Options for rasterizing a slide summary.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideOptions {
    /// Canvas width in pixels
    pub width: u32,

    /// Canvas height in pixels
    pub height: u32,

    /// Canvas background
    pub background: Color,

    /// Color of text block lines
    pub text_color: Color,

    /// Color of the `Slide n/total` footer
    pub footer_color: Color,

    /// X position of text block lines
    pub margin_left: i32,

    /// Y position of the first text block line
    pub margin_top: i32,

    /// Vertical distance between text block lines
    pub line_step: i32,

    /// Maximum number of text blocks drawn
    pub max_text_blocks: usize,

    /// Text blocks longer than this are cut and suffixed with `...`
    pub max_block_chars: usize,

    /// Footer distance from the right edge
    pub footer_right: i32,

    /// Footer distance from the bottom edge
    pub footer_bottom: i32,

    /// TrueType font for text; the built-in bitmap font is used when unset
    pub font_path: Option<PathBuf>,

    /// Pixel height for TrueType text
    pub font_size: f32,

    /// Integer magnification of the 8x8 bitmap font
    pub glyph_scale: u32,
}

impl SlideOptions {
    /// Create new slide options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canvas size.
    pub fn with_canvas(mut self, width: u32, height: u32) -> Self {
        self.width = width.max(1);
        self.height = height.max(1);
        self
    }

    /// Set the maximum number of text blocks drawn.
    pub fn with_max_text_blocks(mut self, max: usize) -> Self {
        self.max_text_blocks = max;
        self
    }

    /// Set the truncation length of a text block.
    pub fn with_max_block_chars(mut self, max: usize) -> Self {
        self.max_block_chars = max;
        self
    }

    /// Use a TrueType font file for text.
    pub fn with_font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_path = Some(path.into());
        self
    }

    /// Set the TrueType pixel height.
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Set the bitmap font magnification.
    pub fn with_glyph_scale(mut self, scale: u32) -> Self {
        self.glyph_scale = scale.clamp(1, MAX_GLYPH_SCALE);
        self
    }
}

impl Default for SlideOptions {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            background: WHITE,
            text_color: BLACK,
            footer_color: GRAY,
            margin_left: 50,
            margin_top: 50,
            line_step: 40,
            max_text_blocks: 10,
            max_block_chars: 100,
            footer_right: 100,
            footer_bottom: 50,
            font_path: None,
            font_size: 16.0,
            glyph_scale: 1,
        }
    }
}
