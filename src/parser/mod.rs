//! Source document parsing: office packages and PDF structure.

pub mod docx;
pub mod package;
pub mod pdf;
pub mod pptx;

pub use docx::{DocxParser, StyleSheet};
pub use package::{OfficePackage, Relationship};
pub use pptx::PptxParser;
