//! Configuration for pdfchat-rs
//!
//! Settings are layered: built-in defaults, then an optional JSON file, then
//! environment variables. Command-line flags are applied last by the binary.

use crate::error::{PdfChatError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding the LLM provider API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Environment variable overriding the LLM base URL
pub const BASE_URL_ENV: &str = "LLM_BASE_URL";

/// Environment variable overriding the model name
pub const MODEL_ENV: &str = "LLM_MODEL";

/// Environment variable overriding the SQLite database path
pub const DATABASE_ENV: &str = "PDFCHAT_DATABASE";

/// Gemini's OpenAI-compatible endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// Default generation model
pub const DEFAULT_MODEL: &str = "gemini-pro";

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Document store settings
    pub database: DatabaseConfig,

    /// Language model settings
    pub llm: LlmConfig,

    /// PDF files ingested at startup
    pub pdf_files: Vec<PathBuf>,
}

/// Document store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: PathBuf,
}

/// Language model settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider API key; never defaulted
    pub api_key: Option<String>,

    /// Base URL of an OpenAI-compatible chat completions API
    pub base_url: String,

    /// Model name
    pub model: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            llm: LlmConfig::default(),
            pdf_files: vec![PathBuf::from("model.pdf")],
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("documents.db"),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file; missing fields take defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PdfChatError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = serde_json::from_str(&content)?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Defaults (or `file`, if given) overlaid with the process environment
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Overlay values found through `lookup`; empty values are ignored
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(key) = lookup(API_KEY_ENV) {
            self.llm.api_key = Some(key);
        }
        if let Some(url) = lookup(BASE_URL_ENV) {
            self.llm.base_url = url;
        }
        if let Some(model) = lookup(MODEL_ENV) {
            self.llm.model = model;
        }
        if let Some(path) = lookup(DATABASE_ENV) {
            self.database.path = PathBuf::from(path);
        }
    }
}

impl LlmConfig {
    /// The configured API key, or a configuration error when none is set
    pub fn api_key(&self) -> Result<&str> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(PdfChatError::Config(format!(
                "{} is not set; export it or add llm.api_key to the config file",
                API_KEY_ENV
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.database.path, PathBuf::from("documents.db"));
        assert_eq!(config.pdf_files, vec![PathBuf::from("model.pdf")]);
        assert_eq!(config.llm.model, DEFAULT_MODEL);
        assert!(config.llm.api_key.is_none());
    }

    #[test]
    fn test_missing_api_key_fails_fast() {
        let config = Config::default();
        match config.llm.api_key() {
            Err(PdfChatError::Config(msg)) => assert!(msg.contains(API_KEY_ENV)),
            other => panic!("Expected config error, got {:?}", other),
        }

        let blank = LlmConfig {
            api_key: Some("   ".to_string()),
            ..LlmConfig::default()
        };
        assert!(blank.api_key().is_err());
    }

    #[test]
    fn test_env_overlay() {
        let vars: HashMap<&str, &str> = [
            (API_KEY_ENV, "secret"),
            (MODEL_ENV, "gemini-1.5-flash"),
            (DATABASE_ENV, "/tmp/docs.db"),
            (BASE_URL_ENV, ""),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.llm.api_key().unwrap(), "secret");
        assert_eq!(config.llm.model, "gemini-1.5-flash");
        assert_eq!(config.database.path, PathBuf::from("/tmp/docs.db"));
        // Empty values leave the default in place
        assert_eq!(config.llm.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"pdf_files": ["a.pdf", "b.pdf"], "llm": {{"model": "local"}}}}"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(
            config.pdf_files,
            vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")]
        );
        assert_eq!(config.llm.model, "local");
        assert_eq!(config.llm.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.database.path, PathBuf::from("documents.db"));
    }

    #[test]
    fn test_from_file_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            Config::from_file(file.path()),
            Err(PdfChatError::Json(_))
        ));
    }
}
