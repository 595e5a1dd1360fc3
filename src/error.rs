//! Error types for pdfchat-rs
//!
//! This module provides error handling for the extraction, storage, prompt and
//! generation steps of the chatbot.

use thiserror::Error;

/// Main error type for pdfchat operations
#[derive(Error, Debug)]
pub enum PdfChatError {
    /// PDF processing errors
    #[error("PDF processing error: {0}")]
    Pdf(String),

    /// Database/storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Prompt template errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Language model errors
    #[error("Generation error: {0}")]
    Generation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// SQLite database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Result type alias for pdfchat operations
pub type Result<T> = std::result::Result<T, PdfChatError>;

impl From<async_openai::error::OpenAIError> for PdfChatError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        PdfChatError::Generation(err.to_string())
    }
}
