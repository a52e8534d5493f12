//! # Terminal Console
//!
//! [`Console`] backed by `dialoguer`, used when a person is typing at a
//! terminal. Prompts get line editing, and the quantity prompt refuses bad
//! answers in place instead of printing an error and asking again.
//!
//! Piped input never comes here; `run` hands it to [`crate::input::Prompter`].

use std::fmt::Display;
use std::io;

use dialoguer::console::Term;
use dialoguer::Input;

use quill_core::validation::parse_quantity;

use crate::error::{AppError, AppResult};
use crate::input::Console;

/// Prompts and output on the process's terminal.
#[derive(Debug)]
pub struct TermConsole {
    term: Term,
}

impl TermConsole {
    pub fn new() -> Self {
        TermConsole {
            term: Term::stdout(),
        }
    }
}

impl Default for TermConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TermConsole {
    fn say(&mut self, text: impl Display) -> AppResult<()> {
        self.term.write_line(&text.to_string())?;
        Ok(())
    }

    fn blank(&mut self) -> AppResult<()> {
        self.term.write_line("")?;
        Ok(())
    }

    fn prompt(&mut self, label: &str) -> AppResult<String> {
        Input::<String>::new()
            .with_prompt(prompt_text(label))
            .allow_empty(true)
            .interact_text_on(&self.term)
            .map_err(from_dialoguer)
    }

    fn prompt_quantity(&mut self, label: &str) -> AppResult<i64> {
        let raw = Input::<String>::new()
            .with_prompt(prompt_text(label))
            .validate_with(|input: &String| -> Result<(), String> {
                parse_quantity(input).map(|_| ()).map_err(|err| err.to_string())
            })
            .interact_text_on(&self.term)
            .map_err(from_dialoguer)?;

        Ok(parse_quantity(&raw)?)
    }
}

/// Menu labels end in `": "`, which the dialoguer theme adds itself.
fn prompt_text(label: &str) -> &str {
    label.trim_end().trim_end_matches(':')
}

/// Ctrl-C and a closed terminal end the session like end of input.
fn from_dialoguer(err: dialoguer::Error) -> AppError {
    match err {
        dialoguer::Error::IO(err) => match err.kind() {
            io::ErrorKind::UnexpectedEof | io::ErrorKind::Interrupted => AppError::end_of_input(),
            _ => AppError::from(err),
        },
    }
}
