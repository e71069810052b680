//! PDF structure access using lopdf.

use lopdf::Document as LopdfDocument;

use crate::error::{Error, Result};

/// Count the pages of a PDF held in memory.
pub fn page_count(data: &[u8]) -> Result<u32> {
    let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
        lopdf::Error::Decryption(_) => Error::PdfParse("document is encrypted".into()),
        _ => Error::from(e),
    })?;

    let pages = doc.get_pages().len();
    u32::try_from(pages).map_err(|_| Error::Corrupted(format!("implausible page count {}", pages)))
}
