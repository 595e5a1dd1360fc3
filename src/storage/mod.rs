//! Storage functionality for pdfchat-rs
//!
//! This module provides the document table using embedded SQLite.

pub mod database;
pub mod schema;

// Re-export main types
pub use database::{Document, DocumentStore, StoreStats};
