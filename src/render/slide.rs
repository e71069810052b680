//! Slide summary layout: which text goes where on the canvas.
//!
//! Layout is kept separate from rasterization so the draw calls can be
//! inspected without decoding pixels.

use crate::model::Slide;

use super::options::{Color, SlideOptions, RED};

/// Suffix appended to truncated text blocks.
pub const ELLIPSIS: &str = "...";

/// Placeholder canvas size.
pub const PLACEHOLDER_SIZE: (u32, u32) = (800, 600);
/// Longest error detail shown on a placeholder.
pub const PLACEHOLDER_DETAIL_CHARS: usize = 60;

const UNAVAILABLE_BACKGROUND: Color = [0xf0, 0xf0, 0xf0];
const ERROR_BACKGROUND: Color = [0xff, 0xf0, 0xf0];

/// One text draw call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextItem {
    /// Left edge in pixels
    pub x: i32,
    /// Top edge in pixels
    pub y: i32,
    /// Single-line text
    pub text: String,
    /// Fill color
    pub color: Color,
}

/// Everything drawn onto one canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideLayout {
    /// Canvas width
    pub width: u32,
    /// Canvas height
    pub height: u32,
    /// Background fill
    pub background: Color,
    /// Text block lines, top to bottom
    pub lines: Vec<TextItem>,
    /// Slide number footer (absent on placeholders)
    pub footer: Option<TextItem>,
}

impl SlideLayout {
    /// All text draw calls in paint order.
    pub fn draw_calls(&self) -> impl Iterator<Item = &TextItem> {
        self.lines.iter().chain(self.footer.iter())
    }

    /// Placeholder shown when slide rendering is not installed.
    pub fn unavailable(message: &str) -> Self {
        Self::placeholder(UNAVAILABLE_BACKGROUND, 200, message.to_string())
    }

    /// Placeholder shown when rendering a slide failed.
    pub fn error(detail: &str) -> Self {
        let detail: String = detail.chars().take(PLACEHOLDER_DETAIL_CHARS).collect();
        Self::placeholder(ERROR_BACKGROUND, 50, format!("Error: {}", detail))
    }

    fn placeholder(background: Color, x: i32, text: String) -> Self {
        let (width, height) = PLACEHOLDER_SIZE;
        Self {
            width,
            height,
            background,
            lines: vec![TextItem {
                x,
                y: 280,
                text: single_line(&text),
                color: RED,
            }],
            footer: None,
        }
    }
}

/// Map a requested 1-based page to a 0-based slide index.
///
/// Missing, zero, negative and past-the-end pages all select the first slide.
pub fn clamp_slide_index(page: Option<i64>, slide_count: usize) -> usize {
    let index = page.unwrap_or(1).saturating_sub(1);
    match usize::try_from(index) {
        Ok(i) if i < slide_count => i,
        _ => 0,
    }
}

/// Cut a text block to `max_chars` characters plus [`ELLIPSIS`].
pub fn truncate_block(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let mut cut: String = text.chars().take(max_chars).collect();
        cut.push_str(ELLIPSIS);
        cut
    } else {
        text.to_string()
    }
}

/// Lay out a slide's text blocks and footer.
///
/// `index` is 0-based; the footer shows it 1-based against `total`.
pub fn layout_slide(slide: &Slide, index: usize, total: usize, options: &SlideOptions) -> SlideLayout {
    let lines = slide
        .text_blocks()
        .take(options.max_text_blocks)
        .enumerate()
        .map(|(i, block)| TextItem {
            x: options.margin_left,
            y: options.margin_top + options.line_step * i as i32,
            text: single_line(&truncate_block(block, options.max_block_chars)),
            color: options.text_color,
        })
        .collect();

    let footer = TextItem {
        x: options.width as i32 - options.footer_right,
        y: options.height as i32 - options.footer_bottom,
        text: format!("Slide {}/{}", index + 1, total),
        color: options.footer_color,
    };

    SlideLayout {
        width: options.width,
        height: options.height,
        background: options.background,
        lines,
        footer: Some(footer),
    }
}

/// Collapse paragraph and line breaks so a block draws on one line.
fn single_line(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_slide_index() {
        assert_eq!(clamp_slide_index(None, 5), 0);
        assert_eq!(clamp_slide_index(Some(1), 5), 0);
        assert_eq!(clamp_slide_index(Some(3), 5), 2);
        assert_eq!(clamp_slide_index(Some(5), 5), 4);
        assert_eq!(clamp_slide_index(Some(6), 5), 0);
        assert_eq!(clamp_slide_index(Some(0), 5), 0);
        assert_eq!(clamp_slide_index(Some(-4), 5), 0);
        assert_eq!(clamp_slide_index(Some(i64::MIN), 5), 0);
        assert_eq!(clamp_slide_index(Some(i64::MAX), 5), 0);
    }

    #[test]
    fn test_truncate_block() {
        let long = "x".repeat(150);
        let cut = truncate_block(&long, 100);
        assert_eq!(cut.len(), 103);
        assert!(cut.ends_with(ELLIPSIS));

        let exact = "y".repeat(100);
        assert_eq!(truncate_block(&exact, 100), exact);
    }

    #[test]
    fn test_truncate_counts_characters() {
        let text = "é".repeat(101);
        let cut = truncate_block(&text, 100);
        assert_eq!(cut.chars().count(), 103);
    }

    #[test]
    fn test_layout_limits_lines() {
        let slide = Slide::from_texts((1..=15).map(|i| format!("Block {}", i)));
        let layout = layout_slide(&slide, 0, 1, &SlideOptions::default());

        assert_eq!(layout.lines.len(), 10);
        assert_eq!(layout.lines[0].text, "Block 1");
        assert_eq!((layout.lines[0].x, layout.lines[0].y), (50, 50));
        assert_eq!(layout.lines[9].y, 50 + 40 * 9);
        assert_eq!(layout.draw_calls().count(), 11);
    }

    #[test]
    fn test_layout_footer() {
        let slide = Slide::from_texts(["only"]);
        let layout = layout_slide(&slide, 2, 7, &SlideOptions::default());

        let footer = layout.footer.unwrap();
        assert_eq!(footer.text, "Slide 3/7");
        assert_eq!((footer.x, footer.y), (1180, 670));
        assert_eq!(footer.color, super::super::options::GRAY);
    }

    #[test]
    fn test_multiline_block_flattened() {
        let slide = Slide::from_texts(["first\nsecond\u{b}third"]);
        let layout = layout_slide(&slide, 0, 1, &SlideOptions::default());
        assert_eq!(layout.lines[0].text, "first second third");
    }

    #[test]
    fn test_error_placeholder_truncates_detail() {
        let layout = SlideLayout::error(&"z".repeat(80));
        assert_eq!((layout.width, layout.height), PLACEHOLDER_SIZE);
        assert_eq!(layout.lines[0].text, format!("Error: {}", "z".repeat(60)));
        assert!(layout.footer.is_none());
    }
}
