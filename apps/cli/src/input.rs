//! # Prompts
//!
//! The [`Console`] trait is everything a command needs from the user's
//! side of the session. Two backends implement it:
//!
//! - [`Prompter`]: line-oriented over any `BufRead`/`Write` pair. Used for
//!   piped input and by every test.
//! - [`crate::terminal::TermConsole`]: `dialoguer` prompts with line
//!   editing, picked when stdin and stdout are a terminal.
//!
//! ## Prompt Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Prompt           Bad Input                  Behavior                   │
//! │  ──────           ─────────                  ────────                   │
//! │  text             -                          taken as typed             │
//! │  quantity         "abc", "-2", "2000000"     "Error: ..." then ask again│
//! │  price            "abc", "-2", "1.234"       error aborts the command   │
//! │  order id         "abc"                      error aborts the command   │
//! │                                                                         │
//! │  Any prompt at end of input ──► AppError::end_of_input()               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Display;
use std::io::{BufRead, Write};

use quill_core::validation::{parse_quantity, validate_price};
use quill_core::{Money, OrderId};

use crate::error::{AppError, AppResult};

/// Output lines and typed answers for one session.
pub trait Console {
    /// Writes one line of output.
    fn say(&mut self, text: impl Display) -> AppResult<()>;

    /// Writes an empty line.
    fn blank(&mut self) -> AppResult<()>;

    /// Shows `label` and reads one answer, without its line terminator.
    fn prompt(&mut self, label: &str) -> AppResult<String>;

    /// Asks until the answer is a whole number from zero to
    /// `MAX_STOCK_QUANTITY`.
    fn prompt_quantity(&mut self, label: &str) -> AppResult<i64> {
        loop {
            let raw = self.prompt(label)?;
            match parse_quantity(&raw) {
                Ok(quantity) => return Ok(quantity),
                Err(err) => self.say(format_args!("Error: {err}"))?,
            }
        }
    }

    /// Reads a catalog price. Anything unparsable or over `MAX_PRICE_CENTS`
    /// is an error for the caller.
    fn prompt_price(&mut self, label: &str) -> AppResult<Money> {
        let raw = self.prompt(label)?;
        let price = raw.trim().parse::<Money>()?;
        validate_price(price)?;
        Ok(price)
    }

    fn prompt_order_id(&mut self, label: &str) -> AppResult<OrderId> {
        let raw = self.prompt(label)?;
        Ok(raw.trim().parse::<OrderId>()?)
    }
}

/// Reads answers from `R` and writes prompts and output to `W`.
#[derive(Debug)]
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// Gives back the reader and writer, e.g. to inspect captured output.
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<R: BufRead, W: Write> Console for Prompter<R, W> {
    fn say(&mut self, text: impl Display) -> AppResult<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    fn blank(&mut self) -> AppResult<()> {
        writeln!(self.output)?;
        Ok(())
    }

    fn prompt(&mut self, label: &str) -> AppResult<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(AppError::end_of_input());
        }

        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }
}
