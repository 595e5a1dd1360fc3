//! PDF ingestion into the document store

use crate::error::Result;
use crate::storage::DocumentStore;
use crate::text::PdfProcessor;
use std::path::Path;

/// Extracts PDFs and stores each one as a new document
#[derive(Debug, Clone)]
pub struct DocumentIngestor {
    store: DocumentStore,
}

impl DocumentIngestor {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    /// Extract `path` and insert its text, returning the new document id
    ///
    /// The file is stored even if an identical document already exists.
    pub fn ingest_file<P: AsRef<Path>>(&self, path: P) -> Result<i64> {
        let path = path.as_ref();
        let text = PdfProcessor::extract_text(path)?;
        let id = self.store.insert(&text)?;
        log::info!("Ingested {} as document {}", path.display(), id);
        Ok(id)
    }

    /// Ingest every path in order, stopping at the first failure
    pub fn ingest_all<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<i64>> {
        paths.iter().map(|path| self.ingest_file(path)).collect()
    }
}
