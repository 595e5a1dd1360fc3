//! Context assembly over the document store

use crate::error::Result;
use crate::storage::DocumentStore;

/// Separator placed between documents in the context blob
pub const DOCUMENT_SEPARATOR: &str = "\n\n";

/// Join every non-empty document with a blank line, in the given order
pub fn assemble_context<I, S>(contents: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut context = String::new();
    for content in contents {
        let content = content.as_ref();
        if content.is_empty() {
            continue;
        }
        if !context.is_empty() {
            context.push_str(DOCUMENT_SEPARATOR);
        }
        context.push_str(content);
    }
    context
}

/// Reads the full store and turns it into a context blob
#[derive(Debug, Clone)]
pub struct DocumentRetriever {
    store: DocumentStore,
}

impl DocumentRetriever {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    /// Context built from every document currently stored
    pub fn context(&self) -> Result<String> {
        let contents = self.store.list_contents()?;
        let context = assemble_context(&contents);
        log::debug!(
            "Assembled context from {} documents ({} bytes)",
            contents.len(),
            context.len()
        );
        Ok(context)
    }
}
