//! # pdfchat-rs
//!
//! A command-line chatbot that answers questions about PDF documents. Text is
//! extracted from each PDF, stored in an SQLite table, and every question is
//! answered by sending all stored text to a hosted language model.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdfchat_rs::{
//!     AnswerGenerator, Config, DocumentIngestor, DocumentRetriever, DocumentStore,
//!     OpenAiGenerator,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(None)?;
//!     let store = DocumentStore::new(&config.database.path)?;
//!
//!     // Store the text of a PDF
//!     DocumentIngestor::new(store.clone()).ingest_file("model.pdf")?;
//!
//!     // Ask a question against everything stored so far
//!     let generator = OpenAiGenerator::new(&config.llm)?;
//!     let answerer = AnswerGenerator::new(DocumentRetriever::new(store), generator);
//!     println!("{}", answerer.ask("What is this document about?").await?);
//!
//!     Ok(())
//! }
//! ```

// Core modules
pub mod api;
pub mod config;
pub mod error;
pub mod storage;
pub mod text;

// Re-export main API types
pub use api::{
    AnswerGenerator, ChatInput, ChatSession, DocumentIngestor, DocumentRetriever,
    NO_DOCUMENT_MESSAGE, OpenAiGenerator, PromptTemplate, TextGenerator, assemble_context,
};
pub use config::Config;
pub use error::{PdfChatError, Result};

// Re-export commonly used types
pub use storage::{Document, DocumentStore, StoreStats};
pub use text::PdfProcessor;
