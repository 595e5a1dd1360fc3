//! PDF text extraction
//!
//! Text is pulled page by page with `lopdf`. The file is read once when the
//! document is loaded and released as soon as the loaded document drops.

use crate::error::{PdfChatError, Result};
use lopdf::Document;
use std::path::Path;

/// PDF text extractor
pub struct PdfProcessor;

impl PdfProcessor {
    /// Extract the whole document as one string, each page followed by a newline
    pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
        let pages = Self::extract_pages(path)?;
        Ok(Self::join_pages(&pages))
    }

    /// Extract the text of every page, in page order
    ///
    /// Pages without text produce an empty entry so that the result always has
    /// one entry per page.
    pub fn extract_pages<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
        let path = path.as_ref();
        let doc = Self::load(path)?;

        let page_numbers: Vec<u32> = doc.get_pages().into_keys().collect();
        log::debug!("Extracting {} pages from {}", page_numbers.len(), path.display());

        let mut pages = Vec::with_capacity(page_numbers.len());
        for page_num in page_numbers {
            let text = doc.extract_text(&[page_num]).map_err(|e| {
                PdfChatError::Pdf(format!(
                    "Failed to extract page {} of {}: {}",
                    page_num,
                    path.display(),
                    e
                ))
            })?;
            pages.push(text);
        }

        Ok(pages)
    }

    /// Concatenate page texts, terminating each page with a newline
    pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
        let capacity = pages.iter().map(|p| p.as_ref().len() + 1).sum();
        let mut text = String::with_capacity(capacity);
        for page in pages {
            text.push_str(page.as_ref());
            text.push('\n');
        }
        text
    }

    /// Number of pages in the document
    pub fn page_count<P: AsRef<Path>>(path: P) -> Result<usize> {
        let doc = Self::load(path.as_ref())?;
        Ok(doc.get_pages().len())
    }

    fn load(path: &Path) -> Result<Document> {
        if !path.exists() {
            return Err(PdfChatError::Pdf(format!(
                "PDF file not found: {}",
                path.display()
            )));
        }

        Document::load(path).map_err(|e| {
            PdfChatError::Pdf(format!("Failed to load {}: {}", path.display(), e))
        })
    }
}
