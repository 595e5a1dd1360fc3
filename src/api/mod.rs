//! API layer for pdfchat-rs
//!
//! This module ties extraction, storage, prompting and generation together
//! into the ingestion step and the chat loop.

pub mod chat;
pub mod generator;
pub mod ingest;
pub mod prompt;
pub mod retriever;

// Re-export main API types
pub use chat::{ChatInput, ChatSession};
pub use generator::{AnswerGenerator, NO_DOCUMENT_MESSAGE, OpenAiGenerator, TextGenerator};
pub use ingest::DocumentIngestor;
pub use prompt::PromptTemplate;
pub use retriever::{DocumentRetriever, assemble_context};
