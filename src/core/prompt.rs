//! Interactive questions, behind a trait so the shutdown flow can be scripted.

use crate::constants;
use anyhow::{Context, Result};
use dialoguer::console::Term;
use dialoguer::{Input, Password};
use std::io::{self, BufRead, Write};

pub trait Prompter {
    /// Ask a question and return the trimmed answer (possibly empty).
    fn ask(&self, prompt: &str) -> Result<String>;

    /// Ask for a secret. Terminal implementations hide the input.
    fn ask_secret(&self, prompt: &str) -> Result<String> {
        self.ask(prompt)
    }

    /// Yes/no question. Anything other than `y`/`yes` is a no.
    fn confirm(&self, prompt: &str) -> Result<bool> {
        Ok(is_affirmative(&self.ask(prompt)?))
    }
}

pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    constants::AFFIRMATIVE_ANSWERS.contains(&answer.as_str())
}

/// Prompts on the controlling terminal, or plain stdin lines when not a TTY.
pub struct TerminalPrompter {
    term: Term,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    fn read_plain(&self, prompt: &str) -> Result<String> {
        let mut stderr = io::stderr();
        write!(stderr, "{}: ", prompt).context("write prompt")?;
        stderr.flush().context("flush prompt")?;

        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .context("read answer from stdin")?;
        Ok(line.trim().to_string())
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn ask(&self, prompt: &str) -> Result<String> {
        if !self.term.is_term() {
            return self.read_plain(prompt);
        }
        let answer: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text_on(&self.term)
            .context("read answer from prompt")?;
        Ok(answer.trim().to_string())
    }

    fn ask_secret(&self, prompt: &str) -> Result<String> {
        if !self.term.is_term() {
            return self.read_plain(prompt);
        }
        let answer = Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact_on(&self.term)
            .context("read API key from prompt")?;
        Ok(answer.trim().to_string())
    }
}
