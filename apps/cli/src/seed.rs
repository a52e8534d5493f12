//! # Seed Catalog
//!
//! Builds the starting catalog.
//!
//! ## Sources
//! ```bash
//! # Four built-in books (default)
//! quill
//!
//! # A JSON file
//! quill --seed ./books.json
//!
//! # Nothing at all
//! quill --no-seed
//! ```
//!
//! ## File Format
//! ```json
//! [
//!   { "title": "Dune", "author": "Frank Herbert", "price": "9.99", "quantity": 4, "category": "Science Fiction" }
//! ]
//! ```
//! Prices are decimal strings so they are parsed exactly, never through a
//! float.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use quill_core::{Book, CoreError, Money};

use crate::state::SeedSource;

/// Built-in catalog: (title, author, price in cents, quantity, category)
const BUILTIN_BOOKS: &[(&str, &str, i64, i64, &str)] = &[
    ("Python Programming", "Guido van Rossum", 2999, 10, "Programming"),
    ("Data Structures and Algorithms", "John Doe", 3999, 5, "Programming"),
    ("To Kill a Mockingbird", "Harper Lee", 1500, 20, "Fiction"),
    ("1984", "George Orwell", 1299, 15, "Fiction"),
];

/// One entry of a seed file.
#[derive(Debug, Clone, Deserialize)]
pub struct BookRecord {
    pub title: String,
    pub author: String,
    pub price: String,
    pub quantity: i64,
    pub category: String,
}

impl TryFrom<BookRecord> for Book {
    type Error = CoreError;

    fn try_from(record: BookRecord) -> Result<Self, Self::Error> {
        let price: Money = record.price.parse()?;
        Ok(Book::new(
            record.title,
            record.author,
            price,
            record.quantity,
            record.category,
        )?)
    }
}

/// Seed loading failures.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("cannot read seed file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("seed file is not a JSON array of books: {0}")]
    Json(#[from] serde_json::Error),

    #[error("seed entry #{index} is invalid: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: CoreError,
    },
}

/// The four built-in books.
///
/// Entries go through the same validation as typed books; a bad entry is
/// reported with its position instead of being skipped.
pub fn builtin_catalog() -> Result<Vec<Book>, SeedError> {
    BUILTIN_BOOKS
        .iter()
        .enumerate()
        .map(|(i, &(title, author, cents, quantity, category))| {
            Book::new(title, author, Money::from_cents(cents), quantity, category).map_err(|err| {
                SeedError::InvalidRecord {
                    index: i + 1,
                    source: err.into(),
                }
            })
        })
        .collect()
}

/// Parses a JSON seed document. Entries are numbered from 1 in errors.
pub fn parse_catalog(json: &str) -> Result<Vec<Book>, SeedError> {
    let records: Vec<BookRecord> = serde_json::from_str(json)?;
    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            Book::try_from(record).map_err(|source| SeedError::InvalidRecord {
                index: i + 1,
                source,
            })
        })
        .collect()
}

/// Reads and parses a seed file.
pub fn load_file(path: &Path) -> Result<Vec<Book>, SeedError> {
    let json = fs::read_to_string(path).map_err(|source| SeedError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_catalog(&json)
}

/// Resolves the configured source into a list of books.
pub fn load(source: &SeedSource) -> Result<Vec<Book>, SeedError> {
    let books = match source {
        SeedSource::Builtin => builtin_catalog()?,
        SeedSource::File(path) => load_file(path)?,
        SeedSource::None => Vec::new(),
    };
    info!(count = books.len(), ?source, "Catalog seeded");
    Ok(books)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let books = builtin_catalog().unwrap();
        assert_eq!(books.len(), BUILTIN_BOOKS.len());
        assert_eq!(books.len(), 4);
        assert_eq!(books[0].title(), "Python Programming");
        assert_eq!(books[0].price().cents(), 2999);
        assert_eq!(books[2].quantity(), 20);
        assert_eq!(books[3].category(), "Fiction");
    }

    #[test]
    fn test_parse_catalog() {
        let books = parse_catalog(
            r#"[
                {"title": "Dune", "author": "Frank Herbert", "price": "9.99", "quantity": 4, "category": "SF"},
                {"title": "Emma", "author": "Jane Austen", "price": "5", "quantity": 0, "category": "Classics"}
            ]"#,
        )
        .unwrap();

        assert_eq!(books.len(), 2);
        assert_eq!(books[0].price().cents(), 999);
        assert_eq!(books[1].price().cents(), 500);
        assert_eq!(books[1].quantity(), 0);
    }

    #[test]
    fn test_parse_catalog_rejects_bad_json() {
        assert!(matches!(parse_catalog("{}"), Err(SeedError::Json(_))));
        assert!(matches!(parse_catalog("not json"), Err(SeedError::Json(_))));
    }

    #[test]
    fn test_parse_catalog_reports_bad_entry() {
        let err = parse_catalog(
            r#"[
                {"title": "Dune", "author": "Frank Herbert", "price": "9.99", "quantity": 4, "category": "SF"},
                {"title": "Emma", "author": "Jane Austen", "price": "cheap", "quantity": 1, "category": "Classics"}
            ]"#,
        )
        .unwrap_err();

        match err {
            SeedError::InvalidRecord { index, source } => {
                assert_eq!(index, 2);
                assert!(matches!(source, CoreError::MalformedInput { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_builtin_keeps_every_entry() {
        let books = load(&SeedSource::Builtin).unwrap();
        let titles: Vec<&str> = books.iter().map(Book::title).collect();
        let expected: Vec<&str> = BUILTIN_BOOKS.iter().map(|entry| entry.0).collect();
        assert_eq!(titles, expected);
    }

    #[test]
    fn test_load_none_and_missing_file() {
        assert!(load(&SeedSource::None).unwrap().is_empty());
        assert!(matches!(
            load(&SeedSource::File(PathBuf::from("/nonexistent/quill/books.json"))),
            Err(SeedError::Read { .. })
        ));
    }

    #[test]
    fn test_load_file_roundtrip_from_disk() {
        let path = std::env::temp_dir().join(format!("quill-seed-{}.json", std::process::id()));
        fs::write(
            &path,
            r#"[{"title": "Dune", "author": "Frank Herbert", "price": "9.99", "quantity": 4, "category": "SF"}]"#,
        )
        .unwrap();

        let books = load(&SeedSource::File(path.clone())).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title(), "Dune");
    }
}
