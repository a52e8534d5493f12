//! # Quill CLI Library
//!
//! Everything behind the `quill` binary: configuration, seeding, the menu
//! session and its commands. `main.rs` only parses flags and calls [`run`].
//!
//! ## Module Organization
//! ```text
//! quill_cli/
//! ├── lib.rs          ◄─── You are here (flags, logging, startup)
//! ├── session.rs      ◄─── Menu loop
//! ├── input.rs        ◄─── Console trait, prompts over BufRead/Write
//! ├── terminal.rs     ◄─── dialoguer console for a real terminal
//! ├── seed.rs         ◄─── Starting catalog
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── store.rs    ◄─── Bookstore behind Arc<Mutex>
//! │   └── config.rs   ◄─── Env configuration
//! ├── commands/
//! │   ├── mod.rs      ◄─── Menu choices and dispatch
//! │   ├── inventory.rs◄─── Catalog commands
//! │   ├── cart.rs     ◄─── Cart commands and checkout
//! │   └── order.rs    ◄─── Order history commands
//! └── error.rs        ◄─── AppError for commands
//! ```

pub mod commands;
pub mod error;
pub mod input;
pub mod seed;
pub mod session;
pub mod state;
pub mod terminal;

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use input::{Console, Prompter};
use quill_core::StockPolicy;
use session::{Ended, Session};
use state::{AppConfig, SeedSource, StoreState};
use terminal::TermConsole;

/// Interactive bookstore: inventory, shopping cart and order history.
#[derive(Debug, Default, Parser)]
#[command(name = "quill")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Load the starting catalog from a JSON file
    #[arg(long, value_name = "PATH", conflicts_with = "no_seed")]
    pub seed: Option<PathBuf>,

    /// Start with an empty catalog
    #[arg(long)]
    pub no_seed: bool,

    /// Consume stock on checkout and refuse carts that exceed it
    #[arg(long)]
    pub deduct_stock: bool,

    /// Name shown in the banner and goodbye line
    #[arg(long, value_name = "NAME")]
    pub store_name: Option<String>,
}

impl Cli {
    /// Applies flags on top of the environment configuration.
    pub fn apply_overrides(&self, mut config: AppConfig) -> AppConfig {
        if let Some(path) = &self.seed {
            config.seed = SeedSource::File(path.clone());
        }
        if self.no_seed {
            config.seed = SeedSource::None;
        }
        if self.deduct_stock {
            config.stock_policy = StockPolicy::Deduct;
        }
        if let Some(name) = &self.store_name {
            config.store_name = name.clone();
        }
        config
    }
}

/// Runs the menu on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • QUILL_* environment variables, then command line flags            │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber on stderr                                      │
/// │     • RUST_LOG, else QUILL_LOG, else warn,quill=info                    │
/// │                                                                         │
/// │  3. Seed Catalog ─────────────────────────────────────────────────────► │
/// │     • built-in books, a JSON file, or nothing                           │
/// │                                                                         │
/// │  4. Run Session ──────────────────────────────────────────────────────► │
/// │     • dialoguer prompts on a terminal, plain lines when piped           │
/// │     • until Exit or end of input                                        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Invalid QUILL_* environment configuration")?;
    let config = cli.apply_overrides(config);

    init_tracing(&config);
    info!(
        store = %config.store_name,
        seed = ?config.seed,
        policy = ?config.stock_policy,
        "Starting Quill"
    );

    let books = seed::load(&config.seed)
        .with_context(|| format!("Failed to load the starting catalog from {:?}", config.seed))?;
    let state = StoreState::with_catalog(books, config.stock_policy);

    let interactive = io::stdin().is_terminal() && io::stdout().is_terminal();
    let ended = if interactive {
        run_session(config.store_name, state, TermConsole::new())?
    } else {
        let stdin = io::stdin();
        run_session(config.store_name, state, Prompter::new(stdin.lock(), io::stdout()))?
    };

    info!(?ended, "Quill stopped");
    Ok(())
}

fn run_session<C: Console>(store_name: String, state: StoreState, io: C) -> anyhow::Result<Ended> {
    let mut session = Session::new(store_name, state, io);
    session.run().context("Terminal I/O failed")
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every command dispatch
/// - `QUILL_LOG=quill=debug` - Same, when `RUST_LOG` is unset
/// - Default: `warn,quill=info`
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new(state::DEFAULT_LOG_FILTER));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_parse() {
        let cli = Cli::try_parse_from([
            "quill",
            "--seed",
            "books.json",
            "--deduct-stock",
            "--store-name",
            "Corner Books",
        ])
        .unwrap();

        assert_eq!(cli.seed, Some(PathBuf::from("books.json")));
        assert!(cli.deduct_stock);
        assert!(!cli.no_seed);
        assert_eq!(cli.store_name.as_deref(), Some("Corner Books"));
    }

    #[test]
    fn test_seed_conflicts_with_no_seed() {
        assert!(Cli::try_parse_from(["quill", "--seed", "a.json", "--no-seed"]).is_err());
    }

    #[test]
    fn test_flags_override_env() {
        let env = AppConfig {
            store_name: "Env Books".to_string(),
            seed: SeedSource::File(PathBuf::from("env.json")),
            ..AppConfig::default()
        };

        let cli = Cli {
            no_seed: true,
            deduct_stock: true,
            ..Cli::default()
        };
        let config = cli.apply_overrides(env.clone());
        assert_eq!(config.seed, SeedSource::None);
        assert_eq!(config.stock_policy, StockPolicy::Deduct);
        assert_eq!(config.store_name, "Env Books");

        assert_eq!(Cli::default().apply_overrides(env.clone()), env);
    }
}
