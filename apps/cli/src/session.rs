//! # Menu Session
//!
//! The interactive loop: banner, menu, one command per iteration.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  print banner                                                           │
//! │  loop                                                                   │
//! │    print menu, "Enter your choice: "                                   │
//! │    ├── end of input ──────────────► stop                               │
//! │    ├── not 1..=12 ────────────────► "Invalid choice..."                │
//! │    ├── 12 ────────────────────────► "Thank you for using ...", stop    │
//! │    └── 1..=11 ──► dispatch                                             │
//! │                     ├── Ok ────────► next iteration                    │
//! │                     ├── recoverable ► "Error: {message}", next         │
//! │                     └── fatal ─────► stop (EOF) / return Err (I/O)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{info, warn};

use crate::commands::{self, Flow, MenuChoice};
use crate::error::{AppError, AppResult, ErrorCode};
use crate::input::Console;
use crate::state::StoreState;

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ended {
    /// The user picked Exit.
    Exit,
    /// The input stream closed.
    EndOfInput,
}

/// One interactive run against a store.
#[derive(Debug)]
pub struct Session<C> {
    store_name: String,
    state: StoreState,
    io: C,
}

impl<C: Console> Session<C> {
    pub fn new(store_name: impl Into<String>, state: StoreState, io: C) -> Self {
        Session {
            store_name: store_name.into(),
            state,
            io,
        }
    }

    /// Runs until Exit or end of input.
    ///
    /// ## Errors
    /// Only failures to read input or write output. Everything a user can
    /// type is reported on the output and the loop goes on.
    pub fn run(&mut self) -> AppResult<Ended> {
        info!(store = %self.store_name, "Session started");
        self.io.blank()?;
        self.io
            .say(format_args!("=== Welcome to the {} ===", self.store_name))?;

        loop {
            match self.step() {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => {
                    self.io
                        .say(format_args!("Thank you for using the {}!", self.store_name))?;
                    info!("Session ended by user");
                    return Ok(Ended::Exit);
                }
                Err(err) if err.code == ErrorCode::EndOfInput => {
                    info!("Input closed, ending session");
                    return Ok(Ended::EndOfInput);
                }
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => self.report(&err)?,
            }
        }
    }

    /// Gives back the console, e.g. to inspect captured output.
    pub fn into_inner(self) -> C {
        self.io
    }

    fn step(&mut self) -> AppResult<Flow> {
        self.print_menu()?;
        let typed = self.io.prompt("Enter your choice: ")?;

        match typed.parse::<MenuChoice>() {
            Ok(choice) => commands::dispatch(choice, &self.state, &mut self.io),
            Err(invalid) => {
                self.io.say(invalid)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn print_menu(&mut self) -> AppResult<()> {
        self.io.blank()?;
        for choice in MenuChoice::ALL {
            self.io.say(choice)?;
        }
        self.io.blank()
    }

    fn report(&mut self, err: &AppError) -> AppResult<()> {
        warn!(code = ?err.code, message = %err.message, "Command failed");
        self.io.say(format_args!("Error: {}", err.message))
    }
}
