//! # quill-core: Pure Business Logic for the Quill Bookstore
//!
//! This crate is the **heart** of the bookstore. It contains the catalog,
//! cart and order rules as plain data and functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Quill Bookstore Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    quill-cli (menu loop)                        │   │
//! │  │    prompts, parsing, config, seed catalog, logging              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ quill-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ inventory │  │   cart    │  │   order   │  │   store   │  │   │
//! │  │   │   Book    │  │ CartLine  │  │  OrderId  │  │ Bookstore │  │   │
//! │  │   │  search   │  │ checkout  │  │  Receipt  │  │StockPolicy│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STDIN • NO FILES • NO LOGGING SUBSCRIBERS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`book`] - The catalog record and its id
//! - [`inventory`] - The catalog and its searches
//! - [`cart`] - Cart lines, checkout, order history
//! - [`order`] - Orders, order numbering, receipts
//! - [`store`] - Catalog + cart facade with the stock policy
//! - [`money`] - Integer-cent money type
//! - [`validation`] - Input rules and cart preconditions
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use quill_core::{Book, Bookstore, Money, StockPolicy};
//!
//! let mut store = Bookstore::new(StockPolicy::Advisory);
//! store.add_book(Book::new("A", "Author", Money::from_cents(1000), 5, "General").unwrap());
//!
//! store.add_to_cart_by_title("A", 3).unwrap();
//! assert_eq!(store.cart().total(store.inventory()).cents(), 3000);
//!
//! let order_id = store.checkout().unwrap().map(|order| order.id().value());
//! assert_eq!(order_id, Some(1));
//! assert!(store.cart().is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod book;
pub mod cart;
pub mod error;
pub mod inventory;
pub mod money;
pub mod order;
pub mod store;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use quill_core::Money` instead of
// `use quill_core::money::Money`

pub use book::{Book, BookId};
pub use cart::{CartView, CartViewLine, Removal, ShoppingCart};
pub use error::{CoreError, CoreResult, ValidationError};
pub use inventory::{Catalog, Inventory, Listing, Search};
pub use money::Money;
pub use order::{AtomicOrderSequence, CartLine, Order, OrderId, OrderSequence, Receipt, ReceiptItem};
pub use store::{Bookstore, StockPolicy};

// =============================================================================
// Constants
// =============================================================================

/// Largest stock level a book can record, and so the largest quantity a
/// prompt accepts.
///
/// ## Business Reason
/// Keeps price × quantity far inside `i64` cents and catches typos like
/// `10000000` for `10`.
pub const MAX_STOCK_QUANTITY: i64 = 1_000_000;

/// Largest catalog price, in cents ($1,000,000.00).
pub const MAX_PRICE_CENTS: i64 = 100_000_000;
