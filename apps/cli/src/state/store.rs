//! # Store State
//!
//! Shared handle to the one [`Bookstore`] of the process.
//!
//! ## Thread Safety
//! The store is wrapped in `Arc<Mutex<T>>` because:
//! 1. Checkout must clear the cart in the same critical section that creates
//!    the order, so no concurrent add can be both purchased and left behind
//! 2. Order ids must be handed out in creation order
//! 3. A future non-interactive front end could run commands concurrently
//!
//! ## Store Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Menu Action              Command                  Store Access          │
//! │  ───────────              ───────                  ────────────          │
//! │                                                                         │
//! │  1 / 8 / 9 / 10 ─────────► inventory::* ─────────► with_store (read)    │
//! │  2 ──────────────────────► add_book ─────────────► with_store_mut       │
//! │  4 / 7 ──────────────────► cart::* ──────────────► with_store_mut       │
//! │  5 ──────────────────────► checkout ─────────────► with_store_mut       │
//! │  3 / 6 / 11 ─────────────► view / find ──────────► with_store (read)    │
//! │                                                                         │
//! │  NOTE: Reads take the same lock; the critical sections are tiny.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use quill_core::{Book, Bookstore, StockPolicy};

/// Cloneable, thread-safe store handle.
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    store: Arc<Mutex<Bookstore>>,
}

impl StoreState {
    /// Creates a store with an empty catalog.
    pub fn new(policy: StockPolicy) -> Self {
        Self::from_store(Bookstore::new(policy))
    }

    /// Creates a store seeded with `books`.
    pub fn with_catalog(books: Vec<Book>, policy: StockPolicy) -> Self {
        Self::from_store(Bookstore::with_catalog(books, policy))
    }

    pub fn from_store(store: Bookstore) -> Self {
        StoreState {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Executes a function with read access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let count = state.with_store(|s| s.inventory().len());
    /// ```
    pub fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Bookstore) -> R,
    {
        f(&self.lock())
    }

    /// Executes a function with write access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// state.with_store_mut(|s| s.add_to_cart_by_title("1984", 1).map(|_| ()))?;
    /// ```
    pub fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Bookstore) -> R,
    {
        f(&mut self.lock())
    }

    /// A command that panicked mid-update cannot leave a half-applied
    /// checkout (checkout is a single `&mut` call), so the data is still
    /// usable after poisoning.
    fn lock(&self) -> MutexGuard<'_, Bookstore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::Money;

    fn book(title: &str, stock: i64) -> Book {
        Book::new(title, "Author", Money::from_cents(1000), stock, "General").unwrap()
    }

    #[test]
    fn test_with_store_reads_catalog() {
        let state = StoreState::with_catalog(vec![book("A", 5), book("B", 1)], StockPolicy::Advisory);
        assert_eq!(state.with_store(|s| s.inventory().len()), 2);
    }

    #[test]
    fn test_clones_share_the_same_store() {
        let state = StoreState::with_catalog(vec![book("A", 5)], StockPolicy::Advisory);
        let other = state.clone();

        other
            .with_store_mut(|s| s.add_to_cart_by_title("A", 2).map(|_| ()))
            .unwrap();

        assert_eq!(state.with_store(|s| s.cart().len()), 1);
    }

    #[test]
    fn test_survives_poisoned_lock() {
        let state = StoreState::with_catalog(vec![book("A", 5)], StockPolicy::Advisory);
        let poisoner = state.clone();

        let result = std::thread::spawn(move || {
            poisoner.with_store_mut(|_| panic!("command blew up"));
        })
        .join();
        assert!(result.is_err());

        assert_eq!(state.with_store(|s| s.inventory().len()), 1);
    }
}
