//! Operator prompts.
//!
//! Every question the tool asks goes through [`Prompter`] so that a scripted
//! double can stand in for the console.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Input closed")]
    Closed,

    #[error("Failed to read input: {0}")]
    Io(#[from] io::Error),
}

/// Ask the operator a question and return the trimmed answer
pub trait Prompter {
    fn ask(&mut self, question: &str) -> Result<String, PromptError>;
}

/// Prompter reading answers from a line-based input
pub struct ConsolePrompter {
    input: Box<dyn BufRead>,
    output: Box<dyn Write>,
}

impl ConsolePrompter {
    /// Prompt on stdout and read from stdin
    pub fn new() -> Self {
        Self {
            input: Box::new(io::BufReader::new(io::stdin())),
            output: Box::new(io::stdout()),
        }
    }

    /// Create with custom streams (for testing)
    pub fn with_streams(input: Box<dyn BufRead>, output: Box<dyn Write>) -> Self {
        Self { input, output }
    }
}

impl Default for ConsolePrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for ConsolePrompter {
    fn ask(&mut self, question: &str) -> Result<String, PromptError> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed);
        }

        Ok(line.trim().to_string())
    }
}

/// Prompter answering from a fixed script; reports `Closed` once exhausted
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    questions: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            questions: Vec::new(),
        }
    }

    /// Questions asked so far, in order
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, question: &str) -> Result<String, PromptError> {
        self.questions.push(question.to_string());
        self.answers
            .pop_front()
            .map(|a| a.trim().to_string())
            .ok_or(PromptError::Closed)
    }
}

/// Remove surrounding quotes and expand a leading `~`
pub fn clean_path_input(input: &str) -> std::path::PathBuf {
    let trimmed = input.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| trimmed.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(trimmed)
        .trim();

    if unquoted == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }

    if let Some(rest) = unquoted.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }

    std::path::PathBuf::from(unquoted)
}
