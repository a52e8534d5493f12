//! # Quill Entry Point
//!
//! ```bash
//! quill                          # built-in catalog
//! quill --seed books.json        # catalog from a file
//! quill --no-seed --deduct-stock # empty catalog, checkout consumes stock
//! ```
//!
//! Setup lives in the library (`quill_cli::run`) so it can be tested.

use clap::Parser;

fn main() -> anyhow::Result<()> {
    quill_cli::run(quill_cli::Cli::parse())
}
