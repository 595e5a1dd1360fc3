//! Text extraction for pdfchat-rs

pub mod pdf;

pub use pdf::PdfProcessor;
