//! HTML rendering for Word documents.

use crate::model::{Paragraph, Table, TableRow, WordDocument};

const HTML_HEAD: &[&str] = &[
    "<!DOCTYPE html>",
    "<html><head>",
    "<meta charset='utf-8'>",
    "<style>",
    "body { font-family: Arial, sans-serif; max-width: 800px; margin: 0 auto; padding: 20px; line-height: 1.6; }",
    "h1, h2, h3 { color: #333; }",
    "p { margin: 10px 0; }",
    "table { border-collapse: collapse; width: 100%; margin: 15px 0; }",
    "td, th { border: 1px solid #ddd; padding: 8px; text-align: left; }",
    "th { background-color: #f4f4f4; }",
    "</style>",
    "</head><body>",
];

const HTML_TAIL: &str = "</body></html>";

/// Convert a Word document to a standalone HTML page.
///
/// Paragraphs come first, then tables, each group in document order.
pub fn to_html(doc: &WordDocument) -> String {
    HtmlRenderer::new().render(doc)
}

/// Static page shown when a document could not be converted.
pub fn error_page(message: &str) -> String {
    format!(
        "<html><body><p>Error previewing document: {}</p></body></html>",
        escape_html(message)
    )
}

/// Static page shown when DOCX conversion is not available.
pub fn unavailable_page(reason: &str) -> String {
    format!(
        "<html><body><p>{} Cannot preview DOCX files.</p></body></html>",
        escape_html(reason)
    )
}

/// Escape the characters that would otherwise be parsed as markup.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Line-oriented HTML renderer.
#[derive(Debug, Default)]
pub struct HtmlRenderer {
    parts: Vec<String>,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a document, consuming the renderer.
    pub fn render(mut self, doc: &WordDocument) -> String {
        self.parts.extend(HTML_HEAD.iter().map(|line| line.to_string()));

        for paragraph in &doc.paragraphs {
            self.render_paragraph(paragraph);
        }
        for table in &doc.tables {
            self.render_table(table);
        }

        self.parts.push(HTML_TAIL.to_string());
        self.parts.join("\n")
    }

    fn render_paragraph(&mut self, paragraph: &Paragraph) {
        let text = paragraph.trimmed_text();
        if text.is_empty() {
            return;
        }

        let tag = match paragraph.heading_level() {
            Some(1) => "h1",
            Some(2) => "h2",
            Some(3) => "h3",
            _ => "p",
        };
        self.parts
            .push(format!("<{tag}>{}</{tag}>", escape_html(text)));
    }

    fn render_table(&mut self, table: &Table) {
        self.parts.push("<table>".to_string());
        if let Some(header) = table.header() {
            self.render_row(header, "th");
        }
        for row in table.body() {
            self.render_row(row, "td");
        }
        self.parts.push("</table>".to_string());
    }

    fn render_row(&mut self, row: &TableRow, tag: &str) {
        self.parts.push("<tr>".to_string());
        for cell in &row.cells {
            self.parts
                .push(format!("<{tag}>{}</{tag}>", escape_html(&cell.text)));
        }
        self.parts.push("</tr>".to_string());
    }
}
