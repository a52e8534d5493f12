//! # Bookstore
//!
//! Ties one [`Inventory`] to one [`ShoppingCart`] and decides what checkout
//! does to stock.
//!
//! ## Stock Policies
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Advisory (default)                                                     │
//! │    add_to_cart checks qty ≤ stock, checkout leaves stock untouched.     │
//! │    The same copies can be bought over and over.                         │
//! │                                                                         │
//! │  Deduct                                                                 │
//! │    checkout sums the cart per book, refuses if any book is short,       │
//! │    otherwise records the order and lowers stock.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::book::{Book, BookId};
use crate::cart::{Removal, ShoppingCart};
use crate::error::{CoreError, CoreResult};
use crate::inventory::Inventory;
use crate::order::Order;

/// What checkout does to recorded stock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockPolicy {
    /// Stock is checked when adding to the cart and never consumed.
    #[default]
    Advisory,
    /// Checkout consumes stock.
    Deduct,
}

/// The store: catalog, cart and order history.
#[derive(Debug, Default)]
pub struct Bookstore {
    inventory: Inventory,
    cart: ShoppingCart,
    policy: StockPolicy,
}

impl Bookstore {
    pub fn new(policy: StockPolicy) -> Self {
        Bookstore {
            inventory: Inventory::new(),
            cart: ShoppingCart::new(),
            policy,
        }
    }

    /// A store whose catalog starts with `books`.
    pub fn with_catalog(books: impl IntoIterator<Item = Book>, policy: StockPolicy) -> Self {
        Bookstore {
            inventory: books.into_iter().collect(),
            cart: ShoppingCart::new(),
            policy,
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn cart(&self) -> &ShoppingCart {
        &self.cart
    }

    pub fn add_book(&mut self, book: Book) -> BookId {
        self.inventory.add_book(book)
    }

    /// Looks the title up exactly (case-sensitive) and adds it to the cart.
    ///
    /// ## Errors
    /// - `BookNotFound` if no catalog entry has this title
    /// - anything [`ShoppingCart::add_to_cart`] returns
    pub fn add_to_cart_by_title(&mut self, title: &str, quantity: i64) -> CoreResult<&Book> {
        let book = self
            .inventory
            .find_by_title(title)
            .ok_or_else(|| CoreError::BookNotFound(title.to_string()))?;

        self.cart.add_to_cart(book, quantity)?;
        Ok(book)
    }

    /// Removes the first cart line whose title matches, ignoring case.
    pub fn remove_from_cart(&mut self, title: &str) -> Removal {
        self.cart.remove_by_title(title, &self.inventory)
    }

    /// Checks out the cart under the configured [`StockPolicy`].
    ///
    /// `Ok(None)` means the cart was empty. Under `Deduct`, a shortfall
    /// fails the whole checkout and leaves cart, history and stock as they
    /// were.
    pub fn checkout(&mut self) -> CoreResult<Option<&Order>> {
        if self.policy == StockPolicy::Deduct {
            let demand = self.demand_per_book()?;
            self.ensure_stock_covers(&demand)?;

            for (id, quantity) in demand {
                self.inventory.deduct_stock(id, quantity)?;
            }
        }

        Ok(self.cart.checkout())
    }

    /// Total requested quantity per book, over all cart lines.
    ///
    /// A sum that overflows `i64` is more than any stock can cover, so it is
    /// reported as `InsufficientStock`.
    fn demand_per_book(&self) -> CoreResult<Vec<(BookId, i64)>> {
        let mut totals: HashMap<BookId, i64> = HashMap::new();
        let mut order = Vec::new();
        for line in self.cart.lines() {
            let entry = totals.entry(line.book_id).or_insert_with(|| {
                order.push(line.book_id);
                0
            });
            *entry = entry
                .checked_add(line.quantity)
                .ok_or_else(|| self.shortfall(line.book_id, i64::MAX))?;
        }

        Ok(order.into_iter().map(|id| (id, totals[&id])).collect())
    }

    fn shortfall(&self, id: BookId, requested: i64) -> CoreError {
        match self.inventory.get(id) {
            Some(book) => CoreError::InsufficientStock {
                title: book.title().to_string(),
                available: book.quantity(),
                requested,
            },
            None => CoreError::BookNotFound(id.to_string()),
        }
    }

    fn ensure_stock_covers(&self, demand: &[(BookId, i64)]) -> CoreResult<()> {
        for &(id, requested) in demand {
            let book = self
                .inventory
                .get(id)
                .ok_or_else(|| CoreError::BookNotFound(id.to_string()))?;
            if requested > book.quantity() {
                return Err(CoreError::InsufficientStock {
                    title: book.title().to_string(),
                    available: book.quantity(),
                    requested,
                });
            }
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
