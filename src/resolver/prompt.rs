//! Asking the operator for a variable's value.
//!
//! [`Prompter`] is the seam between the interactive decorator and the terminal.
//! [`LinePrompter`] reads one line per question from any buffered reader, which is
//! stdin in the CLI; [`AcceptDefaults`] answers every question with the proposed
//! default so a run can complete unattended.

use anyhow::Result;
use std::io::{self, BufRead, Write};

use crate::core::PipegenError;

/// Prefix [`AcceptDefaults`] uses when a variable has no default.
pub const UNANSWERED_PREFIX: &str = "CHANGE_ME_";

/// Something that can ask for a variable's value.
pub trait Prompter {
    /// Ask for `name`, showing `default` when there is one.
    ///
    /// Returns the raw answer; an empty string means "keep the default".
    ///
    /// # Errors
    ///
    /// [`PipegenError::PromptFailed`] when no answer can be read.
    fn ask(&mut self, name: &str, default: Option<&str>) -> Result<String>;
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn ask(&mut self, name: &str, default: Option<&str>) -> Result<String> {
        (**self).ask(name, default)
    }
}

/// Format the question shown for `name`.
#[must_use]
pub fn question(name: &str, default: Option<&str>) -> String {
    match default {
        Some(default) => format!("Enter '{name}' default is [{default}] : "),
        None => format!("Enter '{name}' : "),
    }
}

/// Line-oriented prompter: writes the question, reads one line back.
#[derive(Debug)]
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    /// Prompt on `output`, read answers from `input`.
    pub const fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
        }
    }
}

/// A [`LinePrompter`] on the process's stdin and stdout.
pub type StdinPrompter = LinePrompter<io::StdinLock<'static>, io::Stdout>;

impl StdinPrompter {
    /// Prompt on the terminal.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, name: &str, default: Option<&str>) -> Result<String> {
        let failed = |reason: String| PipegenError::PromptFailed {
            name: name.to_string(),
            reason,
        };

        write!(self.output, "{}", question(name, default)).map_err(|e| failed(e.to_string()))?;
        self.output.flush().map_err(|e| failed(e.to_string()))?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(|e| failed(e.to_string()))?;
        if read == 0 {
            return Err(failed("end of input".to_string()).into());
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Non-interactive prompter that accepts every proposed default.
///
/// A variable with no default is answered `CHANGE_ME_<name>` so it stays easy to
/// find in the generated files.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptDefaults;

impl Prompter for AcceptDefaults {
    fn ask(&mut self, name: &str, default: Option<&str>) -> Result<String> {
        Ok(match default {
            Some(default) if !default.is_empty() => default.to_string(),
            _ => format!("{UNANSWERED_PREFIX}{name}"),
        })
    }
}
