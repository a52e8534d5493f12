//! # Book
//!
//! The catalog record. Owned by [`Inventory`](crate::inventory::Inventory);
//! carts and orders refer to a book through its [`BookId`].
//!
//! ## Dual-Key Identity Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  id (UUID)   - immutable, what CartLine and Order store                 │
//! │  title       - human-readable, NOT unique (duplicates are allowed)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::money::Money;
use crate::validation::{validate_price, validate_required, validate_stock_quantity, ValidationResult};

// =============================================================================
// Book Id
// =============================================================================

/// Opaque handle to a book in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(Uuid);

impl BookId {
    /// Generates a fresh random id.
    pub fn new() -> Self {
        BookId(Uuid::new_v4())
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// =============================================================================
// Book
// =============================================================================

/// A book in the catalog.
///
/// ## Invariants
/// - title is not blank
/// - price ≥ 0
/// - quantity ≥ 0 (only [`Inventory::deduct_stock`](crate::inventory::Inventory::deduct_stock) lowers it)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    id: BookId,
    title: String,
    author: String,
    price: Money,
    quantity: i64,
    category: String,
}

impl Book {
    /// Creates a validated book with a fresh id.
    ///
    /// ## Example
    /// ```rust
    /// use quill_core::{Book, Money};
    ///
    /// let book = Book::new("1984", "George Orwell", Money::from_cents(1299), 15, "Fiction").unwrap();
    /// assert_eq!(book.quantity(), 15);
    ///
    /// assert!(Book::new("1984", "George Orwell", Money::from_cents(1299), -1, "Fiction").is_err());
    /// ```
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        price: Money,
        quantity: i64,
        category: impl Into<String>,
    ) -> ValidationResult<Self> {
        let title = title.into();
        validate_required("title", &title)?;
        validate_price(price)?;
        validate_stock_quantity(quantity)?;

        Ok(Book {
            id: BookId::new(),
            title,
            author: author.into(),
            price,
            quantity,
            category: category.into(),
        })
    }

    #[inline]
    pub fn id(&self) -> BookId {
        self.id
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    pub fn author(&self) -> &str {
        &self.author
    }

    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }

    /// Copies on hand, as recorded in the catalog.
    #[inline]
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    #[inline]
    pub fn category(&self) -> &str {
        &self.category
    }

    pub(crate) fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
    }
}

/// Renders all five catalog fields, one per line.
impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "Author: {}", self.author)?;
        writeln!(f, "Price: {}", self.price)?;
        writeln!(f, "Quantity: {}", self.quantity)?;
        write!(f, "Category: {}", self.category)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
