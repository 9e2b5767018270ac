//! Line input sources and field validation
//!
//! A [`Prompter`] asks one question and returns one line. The
//! [`InputValidator`] drives a prompter until each field is acceptable,
//! following an explicit [`RetryPolicy`].

use console::Term;
use dialoguer::{theme::ColorfulTheme, Input};
use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};
use thiserror::Error;

use crate::core::notice::{Notice, Reporter};

/// A source of answers, one line per prompt
pub trait Prompter {
    /// Show `prompt` and read a line. `Ok(None)` means the source is exhausted.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        (**self).ask(prompt)
    }
}

/// Plain prompt writer / line reader over any reader and writer
///
/// Used for piped stdin and wherever no interactive terminal is attached.
pub struct LinePrompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.writer, "{}: ", prompt)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}

/// Interactive prompter backed by dialoguer
pub struct TermPrompter {
    term: Term,
    theme: ColorfulTheme,
}

impl TermPrompter {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
            theme: ColorfulTheme::default(),
        }
    }

    /// Whether stdin and the prompt terminal are both interactive
    pub fn is_available() -> bool {
        io::stdin().is_terminal() && Term::stderr().is_term()
    }
}

impl Default for TermPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TermPrompter {
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let answer = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text_on(&self.term);

        match answer {
            Ok(line) => Ok(Some(line)),
            Err(dialoguer::Error::IO(e))
                if matches!(
                    e.kind(),
                    io::ErrorKind::UnexpectedEof | io::ErrorKind::Interrupted
                ) =>
            {
                Ok(None)
            }
            Err(e) => Err(io::Error::other(e)),
        }
    }
}

/// Prompter that replays a fixed list of answers, then reports exhaustion
#[derive(Debug, Default, Clone)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    /// Every prompt shown so far
    pub prompts: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.answers.pop_front())
    }
}

/// How many times a field may be asked before giving up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryPolicy {
    /// None = ask forever
    pub max_attempts: Option<u32>,
}

impl RetryPolicy {
    pub fn unbounded() -> Self {
        Self { max_attempts: None }
    }

    pub fn bounded(max_attempts: u32) -> Self {
        Self {
            max_attempts: Some(max_attempts),
        }
    }

    /// True once `attempts` failed tries use up the budget
    pub fn is_spent(&self, attempts: u32) -> bool {
        self.max_attempts.is_some_and(|max| attempts >= max)
    }
}

/// The fields an operator is asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Age,
    Email,
    Modality,
    Continue,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Name => write!(f, "name"),
            Field::Age => write!(f, "age"),
            Field::Email => write!(f, "email"),
            Field::Modality => write!(f, "modality"),
            Field::Continue => write!(f, "continue"),
        }
    }
}

/// Why a field could not be read
#[derive(Debug, Error)]
pub enum InputError {
    #[error("input ended while reading {0}")]
    Exhausted(Field),

    #[error("gave up on {field} after {attempts} invalid attempts")]
    RetriesExceeded { field: Field, attempts: u32 },

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Asks for attendee fields until they are acceptable
pub struct InputValidator<P> {
    prompter: P,
    policy: RetryPolicy,
}

impl<P: Prompter> InputValidator<P> {
    pub fn new(prompter: P, policy: RetryPolicy) -> Self {
        Self { prompter, policy }
    }

    pub fn into_inner(self) -> P {
        self.prompter
    }

    fn ask(&mut self, field: Field, prompt: &str) -> Result<String, InputError> {
        self.prompter
            .ask(prompt)?
            .ok_or(InputError::Exhausted(field))
    }

    /// Non-blank name, returned trimmed
    pub fn read_name(&mut self, reporter: &mut dyn Reporter) -> Result<String, InputError> {
        let mut attempts = 0;
        loop {
            let line = self.ask(Field::Name, "Nombre")?;
            let name = line.trim();
            if !name.is_empty() {
                return Ok(name.to_string());
            }

            attempts += 1;
            tracing::debug!(attempts, "rejected blank name");
            reporter.notify(Notice::InvalidName);
            if self.policy.is_spent(attempts) {
                return Err(InputError::RetriesExceeded {
                    field: Field::Name,
                    attempts,
                });
            }
        }
    }

    /// Positive whole number
    pub fn read_age(&mut self, reporter: &mut dyn Reporter) -> Result<u32, InputError> {
        let mut attempts = 0;
        loop {
            let line = self.ask(Field::Age, "Edad")?;
            if let Some(age) = parse_age(&line) {
                return Ok(age);
            }

            attempts += 1;
            tracing::debug!(attempts, input = %line, "rejected age");
            reporter.notify(Notice::InvalidAge { input: line });
            if self.policy.is_spent(attempts) {
                return Err(InputError::RetriesExceeded {
                    field: Field::Age,
                    attempts,
                });
            }
        }
    }

    /// Optional email, asked once; blank means none
    pub fn read_email(&mut self) -> Result<Option<String>, InputError> {
        let line = self.ask(Field::Email, "Email (opcional)")?;
        Ok(Some(line).filter(|e| !e.trim().is_empty()))
    }

    /// Raw modality answer, asked once; membership is up to the caller
    pub fn read_modality(&mut self, choices: &str) -> Result<String, InputError> {
        let prompt = format!("Modalidad ({})", choices);
        self.ask(Field::Modality, &prompt)
    }

    /// "s" (any case) continues; anything else, including no input, stops
    pub fn confirm_continue(&mut self) -> Result<bool, InputError> {
        match self.prompter.ask("¿Deseas registrar otra inscripción? (s/n)")? {
            Some(answer) => Ok(answer.trim().eq_ignore_ascii_case("s")),
            None => {
                tracing::debug!(field = %Field::Continue, "no answer, treating as no");
                Ok(false)
            }
        }
    }
}

/// Parse an age answer; unparsable and non-positive values are both rejected
///
/// Surrounding whitespace is ignored. Ages must fit a signed 32-bit integer.
pub fn parse_age(input: &str) -> Option<u32> {
    input
        .trim()
        .parse::<i32>()
        .ok()
        .filter(|age| *age > 0)
        .and_then(|age| u32::try_from(age).ok())
}
