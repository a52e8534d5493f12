//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command line flags (`--seed`, `--no-seed`, `--deduct-stock`, `--store-name`)
//! 2. Environment variables (`QUILL_*`)
//! 3. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use quill_core::StockPolicy;

/// Default tracing filter when neither `RUST_LOG` nor `QUILL_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "warn,quill=info";

/// Where the starting catalog comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "path")]
pub enum SeedSource {
    /// The four built-in books.
    #[default]
    Builtin,
    /// A JSON array of book records.
    File(PathBuf),
    /// Start with an empty catalog.
    None,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Shown in the welcome banner and the goodbye line
    pub store_name: String,

    /// Starting catalog
    pub seed: SeedSource,

    /// Whether checkout consumes stock
    pub stock_policy: StockPolicy,

    /// tracing-subscriber filter directive
    pub log_filter: String,
}

impl Default for AppConfig {
    /// ## Default Values
    /// - Store: "Student Bookstore Management System"
    /// - Seed: built-in catalog
    /// - Stock: advisory (checkout never consumes stock)
    fn default() -> Self {
        AppConfig {
            store_name: "Student Bookstore Management System".to_string(),
            seed: SeedSource::Builtin,
            stock_policy: StockPolicy::Advisory,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Creates an AppConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `QUILL_STORE_NAME`: Override store name
    /// - `QUILL_SEED_PATH`: Load the catalog from a JSON file
    /// - `QUILL_SKIP_SEED`: `true` to start with an empty catalog
    /// - `QUILL_DEDUCT_STOCK`: `true` to consume stock on checkout
    /// - `QUILL_LOG`: tracing filter
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(store_name) = lookup("QUILL_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(path) = lookup("QUILL_SEED_PATH") {
            config.seed = SeedSource::File(PathBuf::from(path));
        }

        if let Some(raw) = lookup("QUILL_SKIP_SEED") {
            if parse_flag("QUILL_SKIP_SEED", &raw)? {
                config.seed = SeedSource::None;
            }
        }

        if let Some(raw) = lookup("QUILL_DEDUCT_STOCK") {
            if parse_flag("QUILL_DEDUCT_STOCK", &raw)? {
                config.stock_policy = StockPolicy::Deduct;
            }
        }

        if let Some(filter) = lookup("QUILL_LOG") {
            config.log_filter = filter;
        }

        Ok(config)
    }
}

fn parse_flag(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue(var.to_string())),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
