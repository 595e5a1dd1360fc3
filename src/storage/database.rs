//! SQLite document store for pdfchat-rs
//!
//! Every operation opens its own connection and closes it before returning,
//! so no connection outlives a single insert or query.

use crate::error::{PdfChatError, Result};
use crate::storage::schema::*;
use rusqlite::{Connection, Row, params};
use std::path::{Path, PathBuf};

/// One stored document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Auto-incremented primary key
    pub id: i64,

    /// Extracted text; the column is nullable
    pub content: Option<String>,
}

/// Document store statistics
#[derive(Debug, Clone)]
pub struct StoreStats {
    pub schema_version: u32,
    pub document_count: usize,
    pub content_bytes: usize,
    pub file_size_bytes: usize,
}

/// Handle to the documents table
#[derive(Debug, Clone)]
pub struct DocumentStore {
    path: PathBuf,
}

impl DocumentStore {
    /// Open (creating if needed) the store at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
        };
        store.initialize()?;
        Ok(store)
    }

    /// Path of the underlying database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        Connection::open(&self.path).map_err(|e| {
            PdfChatError::Storage(format!(
                "Failed to open database {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Initialize database schema
    fn initialize(&self) -> Result<()> {
        let conn = self.connect()?;

        let _: String = conn
            .query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))
            .map_err(|e| PdfChatError::Storage(format!("Failed to enable WAL mode: {}", e)))?;

        conn.execute(CREATE_DOCUMENTS_TABLE, []).map_err(|e| {
            PdfChatError::Storage(format!("Failed to create documents table: {}", e))
        })?;

        conn.execute(CREATE_METADATA_TABLE, []).map_err(|e| {
            PdfChatError::Storage(format!("Failed to create metadata table: {}", e))
        })?;

        conn.execute(
            "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)",
            params![SCHEMA_VERSION.to_string()],
        )
        .map_err(|e| PdfChatError::Storage(format!("Failed to set schema version: {}", e)))?;

        log::info!(
            "Document store {} initialized with schema version {}",
            self.path.display(),
            SCHEMA_VERSION
        );
        Ok(())
    }

    /// Append one document and return its id
    ///
    /// The row is committed before this returns. Identical content is stored
    /// again as a new row.
    pub fn insert(&self, content: &str) -> Result<i64> {
        let conn = self.connect()?;

        conn.execute("INSERT INTO documents (content) VALUES (?)", params![content])
            .map_err(|e| PdfChatError::Storage(format!("Failed to insert document: {}", e)))?;

        let id = conn.last_insert_rowid();
        log::info!("Stored document {} ({} bytes)", id, content.len());
        Ok(id)
    }

    /// Every document in insertion (primary key) order
    pub fn list_all(&self) -> Result<Vec<Document>> {
        let conn = self.connect()?;

        let mut stmt = conn
            .prepare("SELECT id, content FROM documents ORDER BY id")
            .map_err(|e| PdfChatError::Storage(format!("Failed to prepare query: {}", e)))?;

        let rows = stmt
            .query_map([], row_to_document)
            .map_err(|e| PdfChatError::Storage(format!("Failed to query documents: {}", e)))?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row.map_err(|e| {
                PdfChatError::Storage(format!("Failed to process document row: {}", e))
            })?);
        }

        Ok(result)
    }

    /// Contents of every document in insertion order, skipping absent content
    pub fn list_contents(&self) -> Result<Vec<String>> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter_map(|doc| doc.content)
            .collect())
    }

    /// Get total document count
    pub fn count(&self) -> Result<usize> {
        let conn = self.connect()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))
            .map_err(|e| PdfChatError::Storage(format!("Failed to count documents: {}", e)))?;

        Ok(count as usize)
    }

    /// Get store statistics
    pub fn stats(&self) -> Result<StoreStats> {
        let document_count = self.count()?;
        let conn = self.connect()?;

        let content_bytes: i64 = conn
            .query_row(
                "SELECT COALESCE(SUM(LENGTH(CAST(content AS BLOB))), 0) FROM documents",
                [],
                |row| row.get(0),
            )
            .map_err(|e| PdfChatError::Storage(format!("Failed to sum content size: {}", e)))?;

        let file_size: i64 = conn
            .query_row(
                "SELECT page_count * page_size FROM pragma_page_count(), pragma_page_size()",
                [],
                |row| row.get(0),
            )
            .map_err(|e| PdfChatError::Storage(format!("Failed to get database size: {}", e)))?;

        let schema_version: String = conn
            .query_row(
                "SELECT value FROM metadata WHERE key = 'schema_version'",
                [],
                |row| row.get(0),
            )
            .map_err(|e| PdfChatError::Storage(format!("Failed to read schema version: {}", e)))?;
        let schema_version = schema_version.parse::<u32>().map_err(|e| {
            PdfChatError::Storage(format!("Invalid schema version {:?}: {}", schema_version, e))
        })?;

        Ok(StoreStats {
            schema_version,
            document_count,
            content_bytes: content_bytes as usize,
            file_size_bytes: file_size as usize,
        })
    }
}

fn row_to_document(row: &Row) -> rusqlite::Result<Document> {
    Ok(Document {
        id: row.get(0)?,
        content: row.get(1)?,
    })
}
