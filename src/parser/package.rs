//! Office Open XML package access (the zip container behind DOCX and PPTX).

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::{NsReader, Reader};
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// WordprocessingML main namespace.
pub const NS_WORD: &[u8] = b"http://schemas.openxmlformats.org/wordprocessingml/2006/main";
/// PresentationML main namespace.
pub const NS_PRESENTATION: &[u8] = b"http://schemas.openxmlformats.org/presentationml/2006/main";
/// DrawingML main namespace.
pub const NS_DRAWING: &[u8] = b"http://schemas.openxmlformats.org/drawingml/2006/main";
/// Namespace of `r:id` style relationship references.
pub const NS_RELATIONSHIPS: &[u8] =
    b"http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Relationship type suffix of the package's main part.
pub const REL_OFFICE_DOCUMENT: &str = "officeDocument";
/// Relationship type suffix of a styles part.
pub const REL_STYLES: &str = "styles";
/// Relationship type suffix of a slide part.
pub const REL_SLIDE: &str = "slide";

/// A relationship from one part to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship id (`rId1`, ...)
    pub id: String,
    /// Full relationship type URI
    pub rel_type: String,
    /// Target part name, resolved to an absolute path inside the package
    pub target: String,
    /// Whether the target points outside the package
    pub external: bool,
}

impl Relationship {
    /// Check the last path segment of the relationship type.
    pub fn is_type(&self, suffix: &str) -> bool {
        self.rel_type.rsplit('/').next() == Some(suffix)
    }
}

/// An opened office package backed by an in-memory buffer.
pub struct OfficePackage<'a> {
    archive: ZipArchive<Cursor<&'a [u8]>>,
}

impl<'a> OfficePackage<'a> {
    /// Open a package from bytes.
    pub fn open(data: &'a [u8]) -> Result<Self> {
        let archive = ZipArchive::new(Cursor::new(data))?;
        Ok(Self { archive })
    }

    /// Check whether a part exists.
    pub fn has_part(&self, name: &str) -> bool {
        self.archive.index_for_name(name).is_some()
    }

    /// Read a part as UTF-8 text.
    pub fn read_part(&mut self, name: &str) -> Result<String> {
        let mut file = self.archive.by_name(name).map_err(|e| match e {
            zip::result::ZipError::FileNotFound => Error::MissingPart(name.to_string()),
            other => Error::from(other),
        })?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::Corrupted(format!("{}: {}", name, e)))?;
        Ok(content)
    }

    /// Relationships of a part (`""` for the package root).
    ///
    /// A missing relationships part yields an empty list.
    pub fn relationships(&mut self, part: &str) -> Result<Vec<Relationship>> {
        let rels_path = rels_path_for(part);
        if !self.has_part(&rels_path) {
            return Ok(Vec::new());
        }
        let xml = self.read_part(&rels_path)?;
        parse_relationships(&xml, part)
    }

    /// Locate the main document part via the root relationships.
    pub fn main_part(&mut self, fallback: &str) -> Result<String> {
        let found = self
            .relationships("")?
            .into_iter()
            .find(|rel| rel.is_type(REL_OFFICE_DOCUMENT) && !rel.external)
            .map(|rel| rel.target);

        match found {
            Some(target) if self.has_part(&target) => Ok(target),
            _ => {
                log::debug!("No officeDocument relationship, using {}", fallback);
                Ok(fallback.to_string())
            }
        }
    }
}

/// Parse a `.rels` part, resolving targets against `source_part`.
pub fn parse_relationships(xml: &str, source_part: &str) -> Result<Vec<Relationship>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut relationships = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Empty(e) | Event::Start(e) if e.local_name().as_ref() == b"Relationship" => {
                let id = attr_value(&e, b"Id")?.unwrap_or_default();
                let rel_type = attr_value(&e, b"Type")?.unwrap_or_default();
                let raw_target = attr_value(&e, b"Target")?.unwrap_or_default();
                let external = attr_value(&e, b"TargetMode")?.as_deref() == Some("External");

                let target = if external {
                    raw_target
                } else {
                    resolve_target(source_part, &raw_target)
                };

                relationships.push(Relationship {
                    id,
                    rel_type,
                    target,
                    external,
                });
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(relationships)
}

/// Path of the relationships part for `part`.
///
/// `word/document.xml` maps to `word/_rels/document.xml.rels`; the package
/// root (`""`) maps to `_rels/.rels`.
pub fn rels_path_for(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part),
    }
}

/// Resolve a relationship target relative to the directory of `source_part`.
pub fn resolve_target(source_part: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut segments: Vec<&str> = match source_part.rsplit_once('/') {
        Some((dir, _)) => dir.split('/').collect(),
        None => Vec::new(),
    };

    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    segments.join("/")
}

/// Check whether a resolved element or attribute name is bound to `namespace`.
///
/// Prefixes are arbitrary: `w:p`, `ns0:p` and an unprefixed `p` under a
/// default `xmlns` are the same element when they resolve to one URI.
pub(crate) fn is_bound_to(resolved: &ResolveResult<'_>, namespace: &[u8]) -> bool {
    matches!(resolved, ResolveResult::Bound(Namespace(ns)) if *ns == namespace)
}

/// Read an attribute by its local name, ignoring any prefix.
pub(crate) fn attr_value(element: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>> {
    for attr in element.attributes().with_checks(false) {
        let attr = attr.map_err(|e| Error::Xml(e.to_string()))?;
        if attr.key.local_name().as_ref() == name {
            let value = attr.unescape_value()?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Read an attribute whose name resolves to `namespace` and `local`.
///
/// Must be called right after `reader` produced `element`, while its
/// namespace declarations are in scope.
pub(crate) fn ns_attr_value<R>(
    reader: &NsReader<R>,
    element: &BytesStart<'_>,
    namespace: &[u8],
    local: &[u8],
) -> Result<Option<String>> {
    for attr in element.attributes().with_checks(false) {
        let attr = attr.map_err(|e| Error::Xml(e.to_string()))?;
        let (resolved, name) = reader.resolve_attribute(attr.key);
        if name.as_ref() == local && is_bound_to(&resolved, namespace) {
            let value = attr.unescape_value()?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}
