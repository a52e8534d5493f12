//! # Inventory Commands
//!
//! Catalog listing, adding books, and the two searches.
//!
//! ## Search Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Menu   Match                          Empty catalog                    │
//! │  ────   ─────                          ─────────────                    │
//! │  8      title contains text, any case  "Inventory is empty."           │
//! │  9, 10  category equals text, any case "No books found in this ..."    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use quill_core::{Book, Search};

use crate::error::AppResult;
use crate::input::Console;
use crate::state::StoreState;

/// Menu 1: every book with its details.
pub fn view_inventory<C: Console>(state: &StoreState, io: &mut C) -> AppResult<()> {
    let listing = state.with_store(|s| s.inventory().list_inventory().to_string());
    io.say(listing)
}

/// Menu 2: reads a new book field by field and adds it.
///
/// A bad price aborts the command; a bad quantity is asked again.
pub fn add_book<C: Console>(state: &StoreState, io: &mut C) -> AppResult<()> {
    let title = io.prompt("Enter the title of the book: ")?;
    let author = io.prompt("Enter the author of the book: ")?;
    let price = io.prompt_price("Enter the price of the book: ")?;
    let quantity = io.prompt_quantity("Enter the quantity of the book: ")?;
    let category = io.prompt("Enter the category of the book: ")?;

    let book = Book::new(title, author, price, quantity, category)?;
    debug!(title = %book.title(), price = %book.price(), quantity, "add_book command");

    let (id, count) = state.with_store_mut(|s| {
        let id = s.add_book(book);
        (id, s.inventory().len())
    });
    info!(book_id = %id, catalog_size = count, "Book added to inventory");

    io.say("Book added to inventory.")
}

/// Menu 8: case-insensitive title substring search.
pub fn search_by_title<C: Console>(state: &StoreState, io: &mut C) -> AppResult<()> {
    let needle = io.prompt("Enter the title of the book you want to search for: ")?;
    debug!(needle = %needle, "search_by_title command");

    let lines = state.with_store(|s| match s.inventory().search_by_title(&needle) {
        Search::CatalogEmpty => vec!["Inventory is empty.".to_string()],
        Search::NoMatches => vec!["No matching books found.".to_string()],
        Search::Matches(books) => {
            with_heading("Matching Books in Inventory:".to_string(), &books)
        }
    });

    say_all(io, lines)
}

/// Menus 9 and 10: case-insensitive exact category match.
pub fn search_by_category<C: Console>(state: &StoreState, io: &mut C) -> AppResult<()> {
    let name = io.prompt("Enter the category name: ")?;
    debug!(category = %name, "search_by_category command");

    let lines = state.with_store(|s| match s.inventory().search_by_category(&name) {
        Search::CatalogEmpty | Search::NoMatches => {
            vec!["No books found in this category.".to_string()]
        }
        Search::Matches(books) => with_heading(format!("Books in Category '{name}':"), &books),
    });

    say_all(io, lines)
}

fn with_heading(heading: String, books: &[&Book]) -> Vec<String> {
    std::iter::once(heading)
        .chain(books.iter().map(|book| format!("{book}\n")))
        .collect()
}

fn say_all<C: Console>(io: &mut C, lines: Vec<String>) -> AppResult<()> {
    lines.into_iter().try_for_each(|line| io.say(line))
}
