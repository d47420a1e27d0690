//! Line input and field parsing.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use thiserror::Error;

use bookstore_core::DomainError;
use bookstore_infra::CatalogError;

/// Failure of one menu action.
///
/// Everything except `Io` and `EndOfInput` is reported to the user and the
/// loop continues.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("{field} must be {expected} (got {value:?})")]
    InvalidNumber {
        field: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("input closed")]
    EndOfInput,

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl ShellError {
    /// Whether the menu loop must stop.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ShellError::EndOfInput | ShellError::Io(_))
    }
}

/// Reads answers to prompts from `input`, echoing the prompts to `output`.
#[derive(Debug)]
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R, W> Prompter<R, W>
where
    R: BufRead,
    W: Write,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Print `prompt` and read one line, without its line ending.
    pub fn line(&mut self, prompt: &str) -> Result<String, ShellError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(ShellError::EndOfInput);
        }
        Ok(buf.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Read a line; blank means `None`.
    pub fn optional(&mut self, prompt: &str) -> Result<Option<String>, ShellError> {
        let value = self.line(prompt)?;
        let trimmed = value.trim();
        Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
    }

    /// Read and parse a number.
    pub fn number<T: FromStr>(
        &mut self,
        prompt: &str,
        field: &'static str,
        expected: &'static str,
    ) -> Result<T, ShellError> {
        let value = self.line(prompt)?;
        value.trim().parse().map_err(|_| ShellError::InvalidNumber {
            field,
            expected,
            value,
        })
    }
}
