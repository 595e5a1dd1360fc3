//! Prompt templates with named `{slot}` placeholders

use crate::error::{PdfChatError, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Template used to answer a question from the stored documents
pub const ANSWER_TEMPLATE: &str = concat!(
    "Answer the following question based on these documents:\n\n",
    "{document_text}\n\nQuestion: {question}"
);

static SLOT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("slot pattern is a valid regex")
});

/// A fixed instruction string with named substitution slots
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
    input_variables: Vec<String>,
}

impl PromptTemplate {
    /// Parse `template`, collecting its slot names in order of first use
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();

        let mut input_variables: Vec<String> = Vec::new();
        for caps in SLOT_PATTERN.captures_iter(&template) {
            let name = &caps[1];
            if !input_variables.iter().any(|v| v == name) {
                input_variables.push(name.to_string());
            }
        }

        if input_variables.is_empty() {
            return Err(PdfChatError::Prompt(
                "Template has no {slot} placeholders".to_string(),
            ));
        }

        Ok(Self {
            template,
            input_variables,
        })
    }

    /// The question-answering template with `document_text` and `question` slots
    pub fn answer_template() -> Self {
        Self {
            template: ANSWER_TEMPLATE.to_string(),
            input_variables: vec!["document_text".to_string(), "question".to_string()],
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn input_variables(&self) -> &[String] {
        &self.input_variables
    }

    /// Substitute every slot with its value
    ///
    /// Values are inserted verbatim and are not scanned for further slots.
    pub fn format(&self, values: &[(&str, &str)]) -> Result<String> {
        let mut output = String::with_capacity(
            self.template.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>(),
        );
        let mut last = 0;

        for caps in SLOT_PATTERN.captures_iter(&self.template) {
            let Some(slot) = caps.get(0) else { continue };
            let name = &caps[1];
            let value = values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| *value)
                .ok_or_else(|| PdfChatError::Prompt(format!("Missing value for {{{}}}", name)))?;

            output.push_str(&self.template[last..slot.start()]);
            output.push_str(value);
            last = slot.end();
        }
        output.push_str(&self.template[last..]);

        Ok(output)
    }

    /// Fill the `document_text` and `question` slots
    pub fn render(&self, document_text: &str, question: &str) -> Result<String> {
        self.format(&[("document_text", document_text), ("question", question)])
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::answer_template()
    }
}
