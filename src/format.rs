//! Declared file types and preview content types.
//!
//! The preview pipeline trusts the file type recorded at upload time; it
//! never sniffs bytes. Everything here is a pure lookup over that tag.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported declared file type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// Portable Document Format
    Pdf,
    /// Word document (Office Open XML)
    Docx,
    /// PowerPoint presentation (Office Open XML)
    Pptx,
    /// Legacy PowerPoint presentation
    Ppt,
}

impl FileKind {
    /// Every supported kind, in declaration order.
    pub const ALL: [FileKind; 4] = [FileKind::Pdf, FileKind::Docx, FileKind::Pptx, FileKind::Ppt];

    /// Resolve a declared extension (case-insensitive, leading dot allowed).
    pub fn from_extension(ext: &str) -> Result<Self> {
        let normalized = normalize_extension(ext);
        match normalized.as_str() {
            "pdf" => Ok(FileKind::Pdf),
            "docx" => Ok(FileKind::Docx),
            "pptx" => Ok(FileKind::Pptx),
            "ppt" => Ok(FileKind::Ppt),
            _ => Err(Error::UnsupportedFormat(ext.to_string())),
        }
    }

    /// Canonical lowercase extension.
    pub fn extension(&self) -> &'static str {
        match self {
            FileKind::Pdf => "pdf",
            FileKind::Docx => "docx",
            FileKind::Pptx => "pptx",
            FileKind::Ppt => "ppt",
        }
    }

    /// Content type of the preview artifact produced for this kind.
    pub fn content_type(&self) -> ContentType {
        match self {
            FileKind::Pdf => ContentType::Pdf,
            FileKind::Docx => ContentType::Html,
            FileKind::Pptx | FileKind::Ppt => ContentType::Png,
        }
    }

    /// Whether previews of this kind are rendered one slide at a time.
    pub fn is_presentation(&self) -> bool {
        matches!(self, FileKind::Pptx | FileKind::Ppt)
    }

    /// Whether this kind carries a page or slide count.
    pub fn is_paginated(&self) -> bool {
        !matches!(self, FileKind::Docx)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for FileKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_extension(s)
    }
}

/// Content type tag of a preview artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    /// `application/pdf`
    #[serde(rename = "application/pdf")]
    Pdf,
    /// `text/html`
    #[serde(rename = "text/html")]
    Html,
    /// `image/png`
    #[serde(rename = "image/png")]
    Png,
    /// `application/octet-stream`
    #[serde(rename = "application/octet-stream")]
    OctetStream,
}

impl ContentType {
    /// MIME string for HTTP headers.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Pdf => "application/pdf",
            ContentType::Html => "text/html",
            ContentType::Png => "image/png",
            ContentType::OctetStream => "application/octet-stream",
        }
    }

    /// File extension for saving an artifact of this type.
    pub fn file_extension(&self) -> &'static str {
        match self {
            ContentType::Pdf => "pdf",
            ContentType::Html => "html",
            ContentType::Png => "png",
            ContentType::OctetStream => "bin",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Look up the preview content type for a declared extension.
///
/// Unknown extensions map to `application/octet-stream` instead of failing.
pub fn resolve_content_type(ext: &str) -> ContentType {
    FileKind::from_extension(ext)
        .map(|kind| kind.content_type())
        .unwrap_or(ContentType::OctetStream)
}

/// Lowercase an extension and drop a leading dot.
pub(crate) fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}
