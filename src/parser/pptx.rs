//! PPTX parser: slide order from the presentation part, shape text from each slide.

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;

use crate::error::{Error, Result};
use crate::model::{Shape, Slide};

use super::package::{
    attr_value, is_bound_to, ns_attr_value, OfficePackage, NS_DRAWING, NS_PRESENTATION,
    NS_RELATIONSHIPS,
};

const DEFAULT_PRESENTATION_PART: &str = "ppt/presentation.xml";

/// Line break inside a text frame paragraph.
const LINE_BREAK: char = '\u{b}';

/// PPTX presentation parser.
pub struct PptxParser<'a> {
    package: OfficePackage<'a>,
    slide_parts: Vec<String>,
}

impl<'a> PptxParser<'a> {
    /// Open a presentation from bytes and resolve its slide list.
    pub fn from_bytes(data: &'a [u8]) -> Result<Self> {
        let mut package = OfficePackage::open(data)?;
        let presentation_part = package.main_part(DEFAULT_PRESENTATION_PART)?;
        let xml = package.read_part(&presentation_part)?;
        let slide_ids = parse_slide_id_list(&xml)?;

        let targets: HashMap<String, String> = package
            .relationships(&presentation_part)?
            .into_iter()
            .filter(|rel| !rel.external)
            .map(|rel| (rel.id, rel.target))
            .collect();

        let slide_parts = slide_ids
            .iter()
            .map(|id| {
                targets
                    .get(id)
                    .cloned()
                    .ok_or_else(|| Error::Corrupted(format!("slide relationship {} not found", id)))
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!("Presentation {} lists {} slides", presentation_part, slide_parts.len());
        Ok(Self {
            package,
            slide_parts,
        })
    }

    /// Number of slides in the presentation.
    pub fn slide_count(&self) -> usize {
        self.slide_parts.len()
    }

    /// Parse a single slide by 0-based index.
    pub fn parse_slide(&mut self, index: usize) -> Result<Slide> {
        let part = self.slide_parts.get(index).ok_or_else(|| {
            Error::Other(format!(
                "slide index {} out of range ({} slides)",
                index,
                self.slide_parts.len()
            ))
        })?;
        let xml = self.package.read_part(part)?;
        parse_slide_xml(&xml)
    }
}

/// Relationship ids from `p:sldIdLst`, in display order.
pub fn parse_slide_id_list(xml: &str) -> Result<Vec<String>> {
    let mut reader = NsReader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut ids = Vec::new();

    loop {
        let (ns, event) = reader.read_resolved_event_into(&mut buf)?;
        let presentation = is_bound_to(&ns, NS_PRESENTATION);
        match event {
            Event::Empty(e) | Event::Start(e)
                if presentation && e.local_name().as_ref() == b"sldId" =>
            {
                let rel_id = ns_attr_value(&reader, &e, NS_RELATIONSHIPS, b"id")?
                    .ok_or_else(|| Error::Corrupted("p:sldId without r:id".into()))?;
                ids.push(rel_id);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(ids)
}

/// Extract the top-level shapes of a slide part.
pub fn parse_slide_xml(xml: &str) -> Result<Slide> {
    let mut reader = NsReader::from_str(xml);
    reader.trim_text(false);
    let mut buf = Vec::new();
    let mut state = SlideState::default();

    loop {
        let (ns, event) = reader.read_resolved_event_into(&mut buf)?;
        let vocab = Vocab::of(&ns);
        match event {
            Event::Start(e) => {
                let local = e.local_name();
                state.handle_start(&e, (vocab, local.as_ref()))?
            }
            Event::Empty(e) => {
                let local = e.local_name();
                state.handle_empty(&e, (vocab, local.as_ref()))?
            }
            Event::Text(e) => {
                if state.in_text() {
                    let text = e.unescape()?;
                    state.push_text(&text);
                }
            }
            Event::End(e) => {
                let local = e.local_name();
                state.handle_end((vocab, local.as_ref()))
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(Slide::new(state.shapes))
}

/// Namespace of a slide element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Vocab {
    Presentation,
    Drawing,
    Other,
}

impl Vocab {
    fn of(resolved: &ResolveResult<'_>) -> Self {
        if is_bound_to(resolved, NS_PRESENTATION) {
            Vocab::Presentation
        } else if is_bound_to(resolved, NS_DRAWING) {
            Vocab::Drawing
        } else {
            Vocab::Other
        }
    }
}

/// Local name of a slide element with its namespace.
type ElementName<'n> = (Vocab, &'n [u8]);

/// Text frame content of the `p:sp` being read.
struct ShapeBuilder {
    depth: usize,
    name: Option<String>,
    paragraphs: Option<Vec<String>>,
    paragraph: Option<String>,
    in_text: bool,
}

impl ShapeBuilder {
    fn finish(self) -> Shape {
        Shape {
            name: self.name,
            text: self.paragraphs.map(|p| p.join("\n")),
        }
    }
}

#[derive(Default)]
struct SlideState {
    depth: usize,
    tree_depth: Option<usize>,
    shape: Option<ShapeBuilder>,
    shapes: Vec<Shape>,
}

impl SlideState {
    fn in_text(&self) -> bool {
        self.shape.as_ref().is_some_and(|s| s.in_text)
    }

    fn push_text(&mut self, text: &str) {
        if let Some(paragraph) = self.shape.as_mut().and_then(|s| s.paragraph.as_mut()) {
            paragraph.push_str(text);
        }
    }

    fn is_tree_child(&self, depth: usize) -> bool {
        self.tree_depth.is_some_and(|tree| depth == tree + 1)
    }

    fn handle_start(&mut self, e: &BytesStart<'_>, name: ElementName<'_>) -> Result<()> {
        self.depth += 1;
        let depth = self.depth;

        match name {
            (Vocab::Presentation, b"spTree") if self.tree_depth.is_none() => {
                self.tree_depth = Some(depth)
            }
            (Vocab::Presentation, b"sp") if self.shape.is_none() && self.is_tree_child(depth) => {
                self.shape = Some(ShapeBuilder {
                    depth,
                    name: None,
                    paragraphs: None,
                    paragraph: None,
                    in_text: false,
                });
            }
            (Vocab::Presentation, b"cNvPr") => self.read_name(e)?,
            (Vocab::Presentation, b"txBody") => {
                if let Some(shape) = self.shape.as_mut() {
                    shape.paragraphs.get_or_insert_with(Vec::new);
                }
            }
            (Vocab::Drawing, b"p") => {
                if let Some(shape) = self.shape.as_mut().filter(|s| s.paragraphs.is_some()) {
                    shape.paragraph = Some(String::new());
                }
            }
            (Vocab::Drawing, b"t") => {
                if let Some(shape) = self.shape.as_mut().filter(|s| s.paragraph.is_some()) {
                    shape.in_text = true;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_empty(&mut self, e: &BytesStart<'_>, name: ElementName<'_>) -> Result<()> {
        match name {
            (Vocab::Presentation, b"cNvPr") => self.read_name(e)?,
            (Vocab::Drawing, b"br") => {
                if let Some(paragraph) = self.shape.as_mut().and_then(|s| s.paragraph.as_mut()) {
                    paragraph.push(LINE_BREAK);
                }
            }
            (Vocab::Drawing, b"p") => {
                if let Some(paragraphs) = self.shape.as_mut().and_then(|s| s.paragraphs.as_mut()) {
                    paragraphs.push(String::new());
                }
            }
            (Vocab::Presentation, b"txBody") => {
                if let Some(shape) = self.shape.as_mut() {
                    shape.paragraphs.get_or_insert_with(Vec::new);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_end(&mut self, name: ElementName<'_>) {
        let depth = self.depth;
        self.depth = self.depth.saturating_sub(1);

        match name {
            (Vocab::Drawing, b"t") => {
                if let Some(shape) = self.shape.as_mut() {
                    shape.in_text = false;
                }
            }
            (Vocab::Drawing, b"p") => {
                if let Some(shape) = self.shape.as_mut() {
                    if let (Some(paragraphs), Some(paragraph)) =
                        (shape.paragraphs.as_mut(), shape.paragraph.take())
                    {
                        paragraphs.push(paragraph);
                    }
                }
            }
            (Vocab::Presentation, b"sp") => {
                if self.shape.as_ref().is_some_and(|s| s.depth == depth) {
                    if let Some(shape) = self.shape.take() {
                        self.shapes.push(shape.finish());
                    }
                }
            }
            (Vocab::Presentation, b"spTree") => {
                if self.tree_depth == Some(depth) {
                    self.tree_depth = None;
                }
            }
            _ => {}
        }
    }

    fn read_name(&mut self, e: &BytesStart<'_>) -> Result<()> {
        if let Some(shape) = self.shape.as_mut().filter(|s| s.name.is_none()) {
            shape.name = attr_value(e, b"name")?;
        }
        Ok(())
    }
}
