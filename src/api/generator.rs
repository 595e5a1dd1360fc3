//! Answer generation through a hosted language model
//!
//! [`TextGenerator`] is the seam between prompt assembly and the provider.
//! [`OpenAiGenerator`] talks to any OpenAI-compatible chat completions API,
//! which includes Gemini's compatibility endpoint.

use crate::api::prompt::PromptTemplate;
use crate::api::retriever::DocumentRetriever;
use crate::config::LlmConfig;
use crate::error::{PdfChatError, Result};
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequestArgs,
};
use async_openai::{Client, config::OpenAIConfig};
use async_trait::async_trait;

/// Reply given instead of calling the model when the store is empty
pub const NO_DOCUMENT_MESSAGE: &str = "No document found in the database.";

/// Produces a completion for a fully rendered prompt
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Return the model's reply to `prompt` unmodified
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Generator backed by an OpenAI-compatible chat completions endpoint
pub struct OpenAiGenerator {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiGenerator {
    /// Build a client from `config`; fails when no API key is configured
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_key = config.api_key()?;
        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(config.base_url.trim_end_matches('/'));

        log::info!("LLM: {} via {}", config.model, config.base_url);

        Ok(Self {
            client: Client::with_config(openai_config),
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let messages = vec![ChatCompletionRequestMessage::User(
            ChatCompletionRequestUserMessage {
                content: ChatCompletionRequestUserMessageContent::Text(prompt.to_string()),
                name: None,
            },
        )];

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages(messages)
            .build()?;

        log::debug!("Sending {} byte prompt to {}", prompt.len(), self.model);
        let response = self.client.chat().create(request).await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                PdfChatError::Generation(format!("{} returned no content", self.model))
            })?;

        Ok(content)
    }
}

/// Answers questions against the whole document store
pub struct AnswerGenerator<G> {
    retriever: DocumentRetriever,
    template: PromptTemplate,
    generator: G,
}

impl<G: TextGenerator> AnswerGenerator<G> {
    pub fn new(retriever: DocumentRetriever, generator: G) -> Self {
        Self::with_template(retriever, PromptTemplate::answer_template(), generator)
    }

    pub fn with_template(
        retriever: DocumentRetriever,
        template: PromptTemplate,
        generator: G,
    ) -> Self {
        Self {
            retriever,
            template,
            generator,
        }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Answer `question` from every stored document
    ///
    /// Returns [`NO_DOCUMENT_MESSAGE`] without calling the model when the
    /// store holds no text.
    pub async fn ask(&self, question: &str) -> Result<String> {
        let document_text = self.retriever.context()?;
        if document_text.is_empty() {
            log::warn!("Document store is empty; skipping model call");
            return Ok(NO_DOCUMENT_MESSAGE.to_string());
        }

        let prompt = self.template.render(&document_text, question)?;
        log::info!("Generating answer ({} byte prompt)", prompt.len());
        self.generator.generate(&prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::storage::DocumentStore;
    use std::sync::Mutex;
    use tempfile::tempdir;

    #[derive(Default)]
    struct RecordingGenerator {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TextGenerator for RecordingGenerator {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok("model reply".to_string())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Err(PdfChatError::Generation("invalid API key".to_string()))
        }
    }

    #[tokio::test]
    async fn test_empty_store_skips_model() {
        let dir = tempdir().unwrap();
        let store = DocumentStore::new(dir.path().join("docs.db")).unwrap();
        let answerer = AnswerGenerator::new(
            DocumentRetriever::new(store),
            RecordingGenerator::default(),
        );

        let reply = answerer.ask("anything?").await.unwrap();
        assert_eq!(reply, NO_DOCUMENT_MESSAGE);
        assert!(answerer.generator().prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ask_sends_rendered_prompt() {
        let dir = tempdir().unwrap();
        let store = DocumentStore::new(dir.path().join("docs.db")).unwrap();
        store.insert("Alpha").unwrap();
        store.insert("Beta").unwrap();

        let answerer = AnswerGenerator::new(
            DocumentRetriever::new(store),
            RecordingGenerator::default(),
        );

        let reply = answerer.ask("What?").await.unwrap();
        assert_eq!(reply, "model reply");

        let prompts = answerer.generator().prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(
            prompts[0],
            "Answer the following question based on these documents:\n\n\
             Alpha\n\nBeta\n\nQuestion: What?"
        );
    }

    #[tokio::test]
    async fn test_custom_template() {
        let dir = tempdir().unwrap();
        let store = DocumentStore::new(dir.path().join("docs.db")).unwrap();
        store.insert("Alpha").unwrap();

        let template = PromptTemplate::new("Q: {question}\nDocs: {document_text}").unwrap();
        let answerer = AnswerGenerator::with_template(
            DocumentRetriever::new(store),
            template,
            RecordingGenerator::default(),
        );

        answerer.ask("Why?").await.unwrap();

        let prompts = answerer.generator().prompts.lock().unwrap();
        assert_eq!(prompts.as_slice(), ["Q: Why?\nDocs: Alpha"]);
    }

    #[tokio::test]
    async fn test_generation_error_propagates() {
        let dir = tempdir().unwrap();
        let store = DocumentStore::new(dir.path().join("docs.db")).unwrap();
        store.insert("Alpha").unwrap();

        let answerer = AnswerGenerator::new(DocumentRetriever::new(store), FailingGenerator);
        assert!(matches!(
            answerer.ask("What?").await,
            Err(PdfChatError::Generation(_))
        ));
    }

    #[test]
    fn test_openai_generator_requires_key() {
        let config = Config::default();
        assert!(matches!(
            OpenAiGenerator::new(&config.llm),
            Err(PdfChatError::Config(_))
        ));

        let mut llm = config.llm.clone();
        llm.api_key = Some("test-key".to_string());
        let generator = OpenAiGenerator::new(&llm).unwrap();
        assert_eq!(generator.model(), "gemini-pro");
    }
}
