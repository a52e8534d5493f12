//! # Inventory
//!
//! The catalog: the single owner of every [`Book`] for the life of the
//! process.
//!
//! ## Lookup Rules
//! ```text
//! ┌──────────────────────┬──────────────────────────────┬────────────────────┐
//! │ Operation            │ Match                        │ Case               │
//! ├──────────────────────┼──────────────────────────────┼────────────────────┤
//! │ search_by_title      │ substring of title           │ insensitive        │
//! │ search_by_category   │ whole category               │ insensitive        │
//! │ find_by_title        │ whole title, first in order  │ SENSITIVE          │
//! └──────────────────────┴──────────────────────────────┴────────────────────┘
//! ```
//! All results come back in catalog (insertion) order.

use std::fmt;

use crate::book::{Book, BookId};
use crate::error::{CoreError, CoreResult};
use crate::validation::validate_cart_quantity;

// =============================================================================
// Catalog Trait
// =============================================================================

/// Read access to books by id.
///
/// Carts and orders only hold [`BookId`]s; anything that needs a title or
/// a price resolves it through a `Catalog`.
pub trait Catalog {
    fn book(&self, id: BookId) -> Option<&Book>;
}

// =============================================================================
// Views
// =============================================================================

/// Result of listing the whole catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing<'a> {
    Empty,
    Books(&'a [Book]),
}

impl fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listing::Empty => write!(f, "Inventory is empty."),
            Listing::Books(books) => {
                write!(f, "Inventory:")?;
                for book in books.iter() {
                    write!(f, "\n{book}\n")?;
                }
                Ok(())
            }
        }
    }
}

/// Result of a catalog search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Search<'a> {
    /// The catalog has no books at all.
    CatalogEmpty,
    NoMatches,
    Matches(Vec<&'a Book>),
}

impl<'a> Search<'a> {
    fn from_matches(matches: Vec<&'a Book>) -> Self {
        if matches.is_empty() {
            Search::NoMatches
        } else {
            Search::Matches(matches)
        }
    }

    /// The matching books, empty for the two no-result variants.
    pub fn books(&self) -> &[&'a Book] {
        match self {
            Search::Matches(books) => books,
            Search::CatalogEmpty | Search::NoMatches => &[],
        }
    }
}

// =============================================================================
// Inventory
// =============================================================================

/// The book catalog, in insertion order. Duplicate titles are allowed.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    books: Vec<Book>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a book and returns its id. Always succeeds.
    pub fn add_book(&mut self, book: Book) -> BookId {
        let id = book.id();
        self.books.push(book);
        id
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id() == id)
    }

    /// Every book, in insertion order.
    pub fn list_inventory(&self) -> Listing<'_> {
        if self.books.is_empty() {
            Listing::Empty
        } else {
            Listing::Books(&self.books)
        }
    }

    /// Case-insensitive substring search on titles.
    ///
    /// ## Example
    /// ```rust
    /// use quill_core::{Book, Inventory, Money};
    ///
    /// let mut inventory = Inventory::new();
    /// inventory.add_book(Book::new("To Kill a Mockingbird", "Harper Lee", Money::from_cents(1500), 20, "Fiction").unwrap());
    ///
    /// assert_eq!(inventory.search_by_title("mock").books().len(), 1);
    /// assert!(inventory.search_by_title("zzz").books().is_empty());
    /// ```
    pub fn search_by_title(&self, substring: &str) -> Search<'_> {
        if self.books.is_empty() {
            return Search::CatalogEmpty;
        }

        let needle = substring.to_lowercase();
        Search::from_matches(
            self.books
                .iter()
                .filter(|book| book.title().to_lowercase().contains(&needle))
                .collect(),
        )
    }

    /// Case-insensitive exact match on category.
    ///
    /// An empty catalog reports `NoMatches` rather than `CatalogEmpty`.
    pub fn search_by_category(&self, name: &str) -> Search<'_> {
        let wanted = name.to_lowercase();
        Search::from_matches(
            self.books
                .iter()
                .filter(|book| book.category().to_lowercase() == wanted)
                .collect(),
        )
    }

    /// First book whose title is exactly `title` (case-sensitive).
    pub fn find_by_title(&self, title: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.title() == title)
    }

    pub(crate) fn get_mut(&mut self, id: BookId) -> Option<&mut Book> {
        self.books.iter_mut().find(|book| book.id() == id)
    }

    /// Removes `quantity` copies from the recorded stock.
    ///
    /// Leaves stock unchanged and returns `InvalidQuantity` for a zero or
    /// negative amount, or `InsufficientStock` if the result would go
    /// negative.
    pub fn deduct_stock(&mut self, id: BookId, quantity: i64) -> CoreResult<()> {
        validate_cart_quantity(quantity)?;

        let book = self
            .get_mut(id)
            .ok_or_else(|| CoreError::BookNotFound(id.to_string()))?;

        if quantity > book.quantity() {
            return Err(CoreError::InsufficientStock {
                title: book.title().to_string(),
                available: book.quantity(),
                requested: quantity,
            });
        }

        book.set_quantity(book.quantity() - quantity);
        Ok(())
    }
}

impl Catalog for Inventory {
    fn book(&self, id: BookId) -> Option<&Book> {
        self.get(id)
    }
}

impl FromIterator<Book> for Inventory {
    fn from_iter<I: IntoIterator<Item = Book>>(iter: I) -> Self {
        Inventory {
            books: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
