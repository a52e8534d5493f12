//! # State Module
//!
//! Manages application state for the menu loop.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │          ┌──────────────────┬──────────────────┐                        │
//! │          ▼                                     ▼                        │
//! │  ┌──────────────────┐                 ┌──────────────────┐              │
//! │  │   StoreState     │                 │    AppConfig     │              │
//! │  │                  │                 │                  │              │
//! │  │  Arc<Mutex<      │                 │  store_name      │              │
//! │  │    Bookstore     │                 │  seed source     │              │
//! │  │  >>              │                 │  stock policy    │              │
//! │  └──────────────────┘                 └──────────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • StoreState: Protected by Arc<Mutex<T>> for exclusive access         │
//! │  • AppConfig: Read-only after initialization                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod store;

pub use config::{AppConfig, ConfigError, SeedSource, DEFAULT_LOG_FILTER};
pub use store::StoreState;
