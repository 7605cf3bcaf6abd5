//! Interactive prompting
//!
//! Every question the workflows ask goes through the [`Prompter`] trait, so
//! control flow never touches stdin directly and tests can substitute a
//! scripted answer source. Answers are always trimmed; interpretation
//! (yes/no, menu digit, free text) stays with the caller.

use anyhow::{bail, Context, Result};
use std::collections::VecDeque;
use std::io::{stdin, stdout, Write};

pub trait Prompter {
    /// Ask one question and return the trimmed answer, which may be empty.
    fn line(&mut self, prompt: &str) -> Result<String>;

    /// `[y/N]` confirmation; anything but y/yes counts as no.
    fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.line(&format!("{question} [y/N]: "))?;
        Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
    }

    /// Re-ask in place until the answer is non-empty.
    fn required_line(&mut self, prompt: &str, what: &str) -> Result<String> {
        loop {
            let answer = self.line(prompt)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            println!("{what} cannot be empty.");
        }
    }
}

/// Reads answers from the terminal.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn line(&mut self, prompt: &str) -> Result<String> {
        print!("{prompt}");
        stdout().flush().context("Failed to flush stdout")?;

        let mut input = String::new();
        let read = stdin()
            .read_line(&mut input)
            .context("Failed to read from stdin")?;
        if read == 0 {
            bail!("Input closed before the prompt was answered");
        }
        Ok(input.trim().to_string())
    }
}

/// Replays a fixed list of answers. Errors once the list runs out, so a
/// scripted run can never loop forever on a re-prompt.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }

    /// Answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn line(&mut self, prompt: &str) -> Result<String> {
        match self.answers.pop_front() {
            Some(answer) => Ok(answer.trim().to_string()),
            None => bail!("Scripted answers exhausted at prompt: {prompt}"),
        }
    }
}
