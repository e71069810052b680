//! Error types for docpeek library.

use std::io;
use thiserror::Error;

/// Result type alias for docpeek operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while producing previews.
///
/// Only [`Error::UnsupportedFormat`] escapes the in-memory preview entry
/// points (the file-based ones add [`Error::Io`]); everything else is caught
/// by the format handlers and turned into degraded output.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The declared file type is not one of the supported kinds.
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    /// The rendering capability for a format is not installed.
    #[error("{format} preview is not available: {reason}")]
    RendererUnavailable {
        /// Format name (e.g. "docx")
        format: &'static str,
        /// Why the capability is missing
        reason: String,
    },

    /// The office package (zip container) could not be read.
    #[error("Archive error: {0}")]
    Archive(String),

    /// Malformed XML inside an office package.
    #[error("XML parsing error: {0}")]
    Xml(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// A required part is missing from the package.
    #[error("Missing package part: {0}")]
    MissingPart(String),

    /// The document structure is corrupted or unexpected.
    #[error("Corrupted document: {0}")]
    Corrupted(String),

    /// Error encoding the output image.
    #[error("Image encoding error: {0}")]
    Image(String),

    /// Error during rendering.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error is the caller's fault (maps to a 4xx response).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::UnsupportedFormat(_))
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            zip::result::ZipError::FileNotFound => Error::MissingPart(err.to_string()),
            _ => Error::Archive(err.to_string()),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnsupportedFormat("txt".into());
        assert_eq!(err.to_string(), "Unsupported file type: txt");

        let err = Error::RendererUnavailable {
            format: "DOCX",
            reason: "disabled".into(),
        };
        assert_eq!(err.to_string(), "DOCX preview is not available: disabled");
    }

    #[test]
    fn test_client_error_classification() {
        assert!(Error::UnsupportedFormat("exe".into()).is_client_error());
        assert!(!Error::Corrupted("bad".into()).is_client_error());
        assert!(!Error::Io(io::Error::new(io::ErrorKind::NotFound, "x")).is_client_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_zip_error_conversion() {
        let err: Error = zip::result::ZipError::InvalidArchive("bad header".into()).into();
        assert!(matches!(err, Error::Archive(_)));

        let err: Error = zip::result::ZipError::FileNotFound.into();
        assert!(matches!(err, Error::MissingPart(_)));
    }
}
