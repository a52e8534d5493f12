//! # Orders
//!
//! Completed purchases and the sequence that numbers them.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ShoppingCart.lines ──checkout──► Order { id: next_id(), lines, now }  │
//! │                                      │                                  │
//! │                                      ▼                                  │
//! │                              order history (append-only)                │
//! │                                                                         │
//! │  Orders are never mutated after creation. Totals are NOT stored:        │
//! │  they are recomputed from the catalog every time they are asked for.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::book::BookId;
use crate::error::{CoreError, CoreResult};
use crate::inventory::Catalog;
use crate::money::Money;

// =============================================================================
// Order Id
// =============================================================================

/// Sequential order number, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    #[inline]
    pub const fn new(id: u64) -> Self {
        OrderId(id)
    }

    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses an order number typed at the menu.
impl FromStr for OrderId {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let raw = s.trim();
        raw.parse::<u64>()
            .map(OrderId)
            .map_err(|_| CoreError::MalformedInput {
                field: "order id".to_string(),
                input: raw.to_string(),
            })
    }
}

// =============================================================================
// Order Sequence
// =============================================================================

/// Hands out order ids.
///
/// Implementations must never repeat an id and must hand them out in
/// strictly increasing order, even when called from several threads.
pub trait OrderSequence: fmt::Debug + Send + Sync {
    /// Claims the next id.
    fn next_id(&self) -> OrderId;

    /// The id the next call to [`next_id`](OrderSequence::next_id) would return.
    fn peek(&self) -> OrderId;
}

/// Lock-free counter starting at 1.
#[derive(Debug)]
pub struct AtomicOrderSequence {
    next: AtomicU64,
}

impl AtomicOrderSequence {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Starts numbering at `first` (used when an order history is restored).
    pub fn starting_at(first: u64) -> Self {
        AtomicOrderSequence {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for AtomicOrderSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderSequence for AtomicOrderSequence {
    fn next_id(&self) -> OrderId {
        OrderId(self.next.fetch_add(1, Ordering::SeqCst))
    }

    fn peek(&self) -> OrderId {
        OrderId(self.next.load(Ordering::SeqCst))
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// A (book, requested quantity) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub book_id: BookId,
    pub quantity: i64,
}

impl CartLine {
    /// price × quantity at the catalog's current price.
    pub fn line_total(&self, catalog: &impl Catalog) -> Money {
        catalog
            .book(self.book_id)
            .map(|book| book.price().multiply_quantity(self.quantity))
            .unwrap_or_default()
    }
}

// =============================================================================
// Order
// =============================================================================

/// An immutable snapshot of a completed purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    lines: Vec<CartLine>,
    purchased_at: DateTime<Utc>,
}

impl Order {
    /// Only the cart creates orders.
    pub(crate) fn new(id: OrderId, lines: Vec<CartLine>, purchased_at: DateTime<Utc>) -> Self {
        Order {
            id,
            lines,
            purchased_at,
        }
    }

    #[inline]
    pub fn id(&self) -> OrderId {
        self.id
    }

    #[inline]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[inline]
    pub fn purchased_at(&self) -> DateTime<Utc> {
        self.purchased_at
    }

    /// Σ price × quantity, recomputed from the catalog on every call.
    pub fn total(&self, catalog: &impl Catalog) -> Money {
        self.lines.iter().map(|line| line.line_total(catalog)).sum()
    }

    /// Builds a printable receipt against the catalog.
    pub fn receipt(&self, catalog: &impl Catalog) -> Receipt {
        let items = self
            .lines
            .iter()
            .map(|line| ReceiptItem {
                title: catalog
                    .book(line.book_id)
                    .map(|book| book.title().to_string())
                    .unwrap_or_else(|| format!("<unknown book {}>", line.book_id)),
                quantity: line.quantity,
            })
            .collect();

        Receipt {
            order_id: self.id,
            items,
            total: self.total(catalog),
            purchased_at: self.purchased_at,
        }
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// Rendered view of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub order_id: OrderId,
    pub items: Vec<ReceiptItem>,
    pub total: Money,
    pub purchased_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptItem {
    pub title: String,
    pub quantity: i64,
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Order ID: {}", self.order_id)?;
        writeln!(f, "Items Purchased:")?;
        for item in &self.items {
            writeln!(f, "{} - Quantity: {}", item.title, item.quantity)?;
        }
        writeln!(f, "Order Total: {}", self.total)?;
        write!(
            f,
            "Purchase Date: {}",
            self.purchased_at.format("%Y-%m-%d %H:%M:%S UTC")
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::Book;
    use crate::inventory::Inventory;
    use chrono::TimeZone;
    use std::sync::Arc;
    use std::thread;

    fn catalog() -> (Inventory, BookId, BookId) {
        let mut inventory = Inventory::new();
        let a = inventory.add_book(
            Book::new("Python Programming", "Guido van Rossum", Money::from_cents(2999), 10, "Programming")
                .unwrap(),
        );
        let b = inventory.add_book(
            Book::new("1984", "George Orwell", Money::from_cents(1299), 15, "Fiction").unwrap(),
        );
        (inventory, a, b)
    }

    #[test]
    fn test_sequence_starts_at_one() {
        let seq = AtomicOrderSequence::new();
        assert_eq!(seq.peek(), OrderId::new(1));
        assert_eq!(seq.next_id(), OrderId::new(1));
        assert_eq!(seq.next_id(), OrderId::new(2));
        assert_eq!(seq.peek(), OrderId::new(3));
    }

    #[test]
    fn test_sequence_is_unique_across_threads() {
        let seq = Arc::new(AtomicOrderSequence::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let seq = Arc::clone(&seq);
                thread::spawn(move || (0..100).map(|_| seq.next_id().value()).collect::<Vec<_>>())
            })
            .collect();

        let mut ids: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 800);
        assert_eq!(ids.first(), Some(&1));
        assert_eq!(ids.last(), Some(&800));
    }

    #[test]
    fn test_order_id_parse() {
        assert_eq!("7".parse::<OrderId>().unwrap(), OrderId::new(7));
        assert_eq!(" 12 ".parse::<OrderId>().unwrap(), OrderId::new(12));
        assert!(matches!(
            "seven".parse::<OrderId>(),
            Err(CoreError::MalformedInput { .. })
        ));
        assert!("-1".parse::<OrderId>().is_err());
    }

    #[test]
    fn test_total_is_recomputed_from_catalog() {
        let (mut inventory, a, b) = catalog();
        let order = Order::new(
            OrderId::new(1),
            vec![
                CartLine { book_id: a, quantity: 2 },
                CartLine { book_id: b, quantity: 1 },
            ],
            Utc::now(),
        );

        // 2 × $29.99 + 1 × $12.99
        assert_eq!(order.total(&inventory).cents(), 7297);

        // Stock changes do not matter, only prices do.
        inventory.deduct_stock(a, 2).unwrap();
        assert_eq!(order.total(&inventory).cents(), 7297);
    }

    #[test]
    fn test_receipt_display() {
        let (inventory, a, b) = catalog();
        let purchased_at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let order = Order::new(
            OrderId::new(4),
            vec![
                CartLine { book_id: a, quantity: 1 },
                CartLine { book_id: b, quantity: 3 },
            ],
            purchased_at,
        );

        assert_eq!(
            order.receipt(&inventory).to_string(),
            "Order ID: 4\n\
             Items Purchased:\n\
             Python Programming - Quantity: 1\n\
             1984 - Quantity: 3\n\
             Order Total: $68.96\n\
             Purchase Date: 2024-03-01 09:30:00 UTC"
        );
    }

    #[test]
    fn test_receipt_for_unknown_book() {
        let inventory = Inventory::new();
        let stray = BookId::new();
        let order = Order::new(
            OrderId::new(1),
            vec![CartLine { book_id: stray, quantity: 1 }],
            Utc::now(),
        );

        let receipt = order.receipt(&inventory);
        assert!(receipt.items[0].title.starts_with("<unknown book"));
        assert!(receipt.total.is_zero());
    }
}
