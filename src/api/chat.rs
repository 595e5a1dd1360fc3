//! Interactive chat loop
//!
//! Reads one question per line and answers each one independently against
//! the current document store. There is no conversation history.

use crate::api::generator::{AnswerGenerator, TextGenerator};
use crate::error::Result;
use std::io::{BufRead, Write};

/// Banner printed when the session starts
pub const READY_MESSAGE: &str = "Chatbot is ready! Type 'exit' to quit.";

/// Line printed when the user leaves
pub const FAREWELL_MESSAGE: &str = "Chatbot: Goodbye!";

/// Prompt shown before each line of input
pub const INPUT_PROMPT: &str = "You: ";

const EXIT_COMMANDS: [&str; 3] = ["exit", "quit", "bye"];

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput<'a> {
    /// Leave the session
    Exit,
    /// Anything else is sent to the model as-is
    Question(&'a str),
}

impl<'a> ChatInput<'a> {
    /// Classify a raw input line; only the line terminator is stripped
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim_end_matches(['\n', '\r']);
        let lowered = line.to_lowercase();
        if EXIT_COMMANDS.contains(&lowered.as_str()) {
            ChatInput::Exit
        } else {
            ChatInput::Question(line)
        }
    }
}

/// A question/answer session over an [`AnswerGenerator`]
pub struct ChatSession<'a, G> {
    answerer: &'a AnswerGenerator<G>,
}

impl<'a, G: TextGenerator> ChatSession<'a, G> {
    pub fn new(answerer: &'a AnswerGenerator<G>) -> Self {
        Self { answerer }
    }

    /// Run until an exit command or end of input
    ///
    /// Returns the number of questions answered. A failed generation ends the
    /// session with that error.
    pub async fn run<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> Result<usize> {
        writeln!(output, "{}", READY_MESSAGE)?;

        let mut answered = 0;
        loop {
            write!(output, "{}", INPUT_PROMPT)?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                log::info!("Input closed after {} questions", answered);
                writeln!(output)?;
                break;
            }

            match ChatInput::parse(&line) {
                ChatInput::Exit => {
                    writeln!(output, "{}", FAREWELL_MESSAGE)?;
                    break;
                }
                ChatInput::Question(question) => {
                    let response = self.answerer.ask(question).await?;
                    writeln!(output, "Chatbot: {}", response)?;
                    answered += 1;
                }
            }
        }

        Ok(answered)
    }
}
