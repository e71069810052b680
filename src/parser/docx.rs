//! DOCX body parser built on the package reader and quick-xml.

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::NsReader;

use crate::error::Result;
use crate::model::{Paragraph, ParagraphStyle, Table, TableCell, TableRow, WordDocument};

use super::package::{attr_value, is_bound_to, OfficePackage, NS_WORD, REL_STYLES};

const DEFAULT_DOCUMENT_PART: &str = "word/document.xml";
const DEFAULT_STYLES_PART: &str = "word/styles.xml";

/// Paragraph style names keyed by style id.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    names: HashMap<String, String>,
    default_paragraph: Option<String>,
}

impl StyleSheet {
    /// Parse a `styles.xml` part.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut sheet = StyleSheet::default();
        let mut reader = NsReader::from_str(xml);
        reader.trim_text(true);
        let mut buf = Vec::new();

        // (style id, is default paragraph style) of the style being read
        let mut current: Option<(String, bool)> = None;

        loop {
            let (ns, event) = reader.read_resolved_event_into(&mut buf)?;
            let word = is_bound_to(&ns, NS_WORD);
            match event {
                Event::Start(e) if word && e.local_name().as_ref() == b"style" => {
                    let is_paragraph = attr_value(&e, b"type")?.as_deref() == Some("paragraph");
                    if is_paragraph {
                        let id = attr_value(&e, b"styleId")?.unwrap_or_default();
                        let is_default = matches!(
                            attr_value(&e, b"default")?.as_deref(),
                            Some("1") | Some("true")
                        );
                        current = Some((id, is_default));
                    }
                }
                Event::Empty(e) if word && e.local_name().as_ref() == b"name" => {
                    if let (Some((id, is_default)), Some(name)) =
                        (current.as_ref(), attr_value(&e, b"val")?)
                    {
                        if *is_default {
                            sheet.default_paragraph = Some(name.clone());
                        }
                        sheet.names.insert(id.clone(), name);
                    }
                }
                Event::End(e) if word && e.local_name().as_ref() == b"style" => current = None,
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(sheet)
    }

    /// Resolve the style of a paragraph from its `w:pStyle` id.
    ///
    /// Unknown ids fall back to the id itself; paragraphs without a
    /// `w:pStyle` get the default paragraph style.
    pub fn resolve(&self, style_id: Option<&str>) -> ParagraphStyle {
        let name = match style_id {
            Some(id) => Some(self.names.get(id).cloned().unwrap_or_else(|| id.to_string())),
            None => self.default_paragraph.clone(),
        };
        name.map(ParagraphStyle::named).unwrap_or_default()
    }
}

/// DOCX document parser.
pub struct DocxParser<'a> {
    package: OfficePackage<'a>,
}

impl<'a> DocxParser<'a> {
    /// Open a DOCX from bytes.
    pub fn from_bytes(data: &'a [u8]) -> Result<Self> {
        let package = OfficePackage::open(data)?;
        Ok(Self { package })
    }

    /// Parse the document body.
    pub fn parse(mut self) -> Result<WordDocument> {
        let document_part = self.package.main_part(DEFAULT_DOCUMENT_PART)?;
        let styles = self.load_styles(&document_part);
        let xml = self.package.read_part(&document_part)?;
        parse_document_xml(&xml, &styles)
    }

    fn load_styles(&mut self, document_part: &str) -> StyleSheet {
        let styles_part = self
            .package
            .relationships(document_part)
            .ok()
            .and_then(|rels| rels.into_iter().find(|r| r.is_type(REL_STYLES) && !r.external))
            .map(|r| r.target)
            .unwrap_or_else(|| DEFAULT_STYLES_PART.to_string());

        if !self.package.has_part(&styles_part) {
            return StyleSheet::default();
        }

        match self
            .package
            .read_part(&styles_part)
            .and_then(|xml| StyleSheet::parse(&xml))
        {
            Ok(sheet) => sheet,
            Err(e) => {
                log::warn!("Ignoring unreadable styles part {}: {}", styles_part, e);
                StyleSheet::default()
            }
        }
    }
}

/// Parse `word/document.xml` into paragraphs and tables.
///
/// Elements are matched by namespace URI, whatever prefix the part binds it to.
pub fn parse_document_xml(xml: &str, styles: &StyleSheet) -> Result<WordDocument> {
    let mut reader = NsReader::from_str(xml);
    reader.trim_text(false);
    let mut buf = Vec::new();
    let mut state = BodyState::new(styles);

    loop {
        let (ns, event) = reader.read_resolved_event_into(&mut buf)?;
        let word = is_bound_to(&ns, NS_WORD);
        match event {
            Event::Start(e) => {
                let local = e.local_name();
                state.handle_start(&e, word.then_some(local.as_ref()))?
            }
            Event::Empty(e) => {
                let local = e.local_name();
                state.handle_empty(&e, word.then_some(local.as_ref()))?
            }
            Event::Text(e) => {
                if state.in_text() {
                    let text = e.unescape()?;
                    state.push_text(&text);
                }
            }
            Event::End(e) => {
                let local = e.local_name();
                state.handle_end(word.then_some(local.as_ref()))
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(state.document)
}

/// Text collected for one `w:p`.
struct ParagraphBuilder {
    depth: usize,
    style_id: Option<String>,
    text: String,
    run_depth: Option<usize>,
    in_text: bool,
}

impl ParagraphBuilder {
    fn new(depth: usize) -> Self {
        Self {
            depth,
            style_id: None,
            text: String::new(),
            run_depth: None,
            in_text: false,
        }
    }
}

/// Rows collected for one top-level `w:tbl`.
struct TableBuilder {
    depth: usize,
    table: Table,
    row: Option<TableRow>,
    cell: Option<Vec<String>>,
}

/// Depth-tracking walk over the body.
///
/// Only direct children of `w:body` become paragraphs and tables; nested
/// tables and text boxes are skipped wholesale.
struct BodyState<'s> {
    styles: &'s StyleSheet,
    depth: usize,
    body_depth: Option<usize>,
    skip_depth: Option<usize>,
    paragraph: Option<ParagraphBuilder>,
    table: Option<TableBuilder>,
    document: WordDocument,
}

impl<'s> BodyState<'s> {
    fn new(styles: &'s StyleSheet) -> Self {
        Self {
            styles,
            depth: 0,
            body_depth: None,
            skip_depth: None,
            paragraph: None,
            table: None,
            document: WordDocument::new(),
        }
    }

    fn in_text(&self) -> bool {
        self.skip_depth.is_none() && self.paragraph.as_ref().is_some_and(|p| p.in_text)
    }

    fn push_text(&mut self, text: &str) {
        if let Some(p) = self.paragraph.as_mut() {
            p.text.push_str(text);
        }
    }

    fn is_body_child(&self, depth: usize) -> bool {
        self.body_depth.is_some_and(|body| depth == body + 1)
    }

    /// `name` is the local name of a WordprocessingML element, `None` for
    /// elements of other namespaces.
    fn handle_start(&mut self, e: &BytesStart<'_>, name: Option<&[u8]>) -> Result<()> {
        self.depth += 1;
        let depth = self.depth;
        if self.skip_depth.is_some() {
            return Ok(());
        }

        match name {
            Some(b"body") if self.body_depth.is_none() => self.body_depth = Some(depth),
            Some(b"txbxContent") => self.skip_depth = Some(depth),
            Some(b"tbl") => {
                if self.table.is_some() {
                    self.skip_depth = Some(depth);
                } else if self.is_body_child(depth) {
                    self.table = Some(TableBuilder {
                        depth,
                        table: Table::new(),
                        row: None,
                        cell: None,
                    });
                }
            }
            Some(b"tr") => {
                if let Some(t) = self.table.as_mut().filter(|t| depth == t.depth + 1) {
                    t.row = Some(TableRow::default());
                }
            }
            Some(b"tc") => {
                if let Some(t) = self.table.as_mut().filter(|t| depth == t.depth + 2) {
                    if t.row.is_some() {
                        t.cell = Some(Vec::new());
                    }
                }
            }
            Some(b"p") => {
                let in_cell = self
                    .table
                    .as_ref()
                    .is_some_and(|t| t.cell.is_some() && depth == t.depth + 3);
                let top_level = self.table.is_none() && self.is_body_child(depth);
                if in_cell || top_level {
                    self.paragraph = Some(ParagraphBuilder::new(depth));
                }
            }
            Some(b"r") => {
                if let Some(p) = self.paragraph.as_mut() {
                    if p.run_depth.is_none() {
                        p.run_depth = Some(depth);
                    }
                }
            }
            Some(b"t") => {
                if let Some(p) = self.paragraph.as_mut().filter(|p| p.run_depth.is_some()) {
                    p.in_text = true;
                }
            }
            Some(b"pStyle") => self.read_style(e)?,
            _ => {}
        }
        Ok(())
    }

    fn handle_empty(&mut self, e: &BytesStart<'_>, name: Option<&[u8]>) -> Result<()> {
        if self.skip_depth.is_some() {
            return Ok(());
        }
        let depth = self.depth + 1;

        match name {
            Some(b"pStyle") => self.read_style(e)?,
            Some(b"tab") => self.push_run_char('\t'),
            Some(b"cr") => self.push_run_char('\n'),
            Some(b"br") => {
                if attr_value(e, b"type")?.as_deref() != Some("page") {
                    self.push_run_char('\n');
                }
            }
            Some(b"p") => {
                if self.table.is_none() && self.is_body_child(depth) {
                    self.document.add_paragraph(Paragraph::new());
                } else if let Some(cell) = self
                    .table
                    .as_mut()
                    .filter(|t| depth == t.depth + 3)
                    .and_then(|t| t.cell.as_mut())
                {
                    cell.push(String::new());
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_end(&mut self, name: Option<&[u8]>) {
        let depth = self.depth;
        self.depth = self.depth.saturating_sub(1);

        if let Some(skip) = self.skip_depth {
            if skip == depth {
                self.skip_depth = None;
            }
            return;
        }

        match name {
            Some(b"t") => {
                if let Some(p) = self.paragraph.as_mut() {
                    p.in_text = false;
                }
            }
            Some(b"r") => {
                if let Some(p) = self.paragraph.as_mut().filter(|p| p.run_depth == Some(depth)) {
                    p.run_depth = None;
                }
            }
            Some(b"p") => {
                if self.paragraph.as_ref().is_some_and(|p| p.depth == depth) {
                    if let Some(p) = self.paragraph.take() {
                        self.finish_paragraph(p);
                    }
                }
            }
            Some(b"tc") => {
                if let Some(t) = self.table.as_mut().filter(|t| depth == t.depth + 2) {
                    if let (Some(row), Some(cell)) = (t.row.as_mut(), t.cell.take()) {
                        row.cells.push(TableCell::text(cell.join("\n")));
                    }
                }
            }
            Some(b"tr") => {
                if let Some(t) = self.table.as_mut().filter(|t| depth == t.depth + 1) {
                    if let Some(row) = t.row.take() {
                        t.table.add_row(row);
                    }
                }
            }
            Some(b"tbl") => {
                if self.table.as_ref().is_some_and(|t| t.depth == depth) {
                    if let Some(t) = self.table.take() {
                        self.document.add_table(t.table);
                    }
                }
            }
            _ => {}
        }
    }

    fn read_style(&mut self, e: &BytesStart<'_>) -> Result<()> {
        if let Some(p) = self.paragraph.as_mut() {
            if p.style_id.is_none() && p.run_depth.is_none() {
                p.style_id = attr_value(e, b"val")?;
            }
        }
        Ok(())
    }

    fn push_run_char(&mut self, c: char) {
        if let Some(p) = self.paragraph.as_mut().filter(|p| p.run_depth.is_some()) {
            p.text.push(c);
        }
    }

    fn finish_paragraph(&mut self, builder: ParagraphBuilder) {
        if let Some(cell) = self.table.as_mut().and_then(|t| t.cell.as_mut()) {
            cell.push(builder.text);
            return;
        }

        let style = self.styles.resolve(builder.style_id.as_deref());
        self.document.add_paragraph(Paragraph {
            text: builder.text,
            style,
        });
    }
}
