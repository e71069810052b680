//! Rendering module for converting parsed documents to preview artifacts.

mod html;
mod options;
mod raster;
mod slide;

pub use html::{error_page, escape_html, to_html, unavailable_page, HtmlRenderer};
pub use options::{Color, SlideOptions, BLACK, GRAY, MAX_GLYPH_SCALE, RED, WHITE};
pub use raster::{encode_png, Rasterizer};
pub use slide::{
    clamp_slide_index, layout_slide, truncate_block, SlideLayout, TextItem, ELLIPSIS,
    PLACEHOLDER_DETAIL_CHARS, PLACEHOLDER_SIZE,
};
