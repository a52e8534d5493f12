//! # Shopping Cart
//!
//! The working list of cart lines plus the history of completed orders.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  add_to_cart(book, qty) ─────► validate qty > 0                        │
//! │                                validate qty ≤ book.quantity             │
//! │                                lines.push((book.id, qty))               │
//! │                                                                         │
//! │  remove_by_title(title) ─────► first line whose title matches           │
//! │                                (case-insensitive), removed alone        │
//! │                                                                         │
//! │  checkout() ─────────────────► Order { next_id, lines, now }            │
//! │                                orders.push(order); lines.clear()        │
//! │                                                                         │
//! │  NOTE: Nothing here touches stock. The stock check is advisory.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::book::Book;
use crate::error::CoreResult;
use crate::inventory::Catalog;
use crate::money::Money;
use crate::order::{AtomicOrderSequence, CartLine, Order, OrderId, OrderSequence};
use crate::validation::{validate_cart_quantity, validate_in_stock};

// =============================================================================
// Views
// =============================================================================

/// One rendered cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartViewLine {
    /// 1-based position in the cart.
    pub ordinal: usize,
    pub title: String,
    pub quantity: i64,
    pub unit_price: Money,
}

/// The cart as shown to the user, with a running total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub lines: Vec<CartViewLine>,
    pub total: Money,
}

impl CartView {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for CartView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lines.is_empty() {
            return write!(f, "Shopping Cart is empty.");
        }

        writeln!(f, "Shopping Cart:")?;
        for line in &self.lines {
            writeln!(
                f,
                "{}. {} - Quantity: {}, Price: {}",
                line.ordinal, line.title, line.quantity, line.unit_price
            )?;
        }
        write!(f, "Total Price: {}", self.total)
    }
}

/// Outcome of removing a line by title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The cart had no lines to begin with.
    CartEmpty,
    NotFound,
    Removed(CartLine),
}

// =============================================================================
// Shopping Cart
// =============================================================================

/// Cart lines and order history for one shopper.
///
/// ## Invariants
/// - every line has quantity > 0
/// - order ids in `orders` are strictly increasing
/// - `checkout` is the only way an [`Order`] comes into existence
#[derive(Debug)]
pub struct ShoppingCart {
    lines: Vec<CartLine>,
    orders: Vec<Order>,
    sequence: Box<dyn OrderSequence>,
}

impl ShoppingCart {
    /// Creates an empty cart whose orders are numbered from 1.
    pub fn new() -> Self {
        Self::with_sequence(Box::new(AtomicOrderSequence::new()))
    }

    /// Creates an empty cart that draws order ids from `sequence`.
    pub fn with_sequence(sequence: Box<dyn OrderSequence>) -> Self {
        ShoppingCart {
            lines: Vec::new(),
            orders: Vec::new(),
            sequence,
        }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The id the next checkout will receive.
    pub fn next_order_id(&self) -> OrderId {
        self.sequence.peek()
    }

    /// Adds `quantity` copies of `book` as a new line.
    ///
    /// ## Errors
    /// - `InvalidQuantity` if `quantity <= 0`
    /// - `InsufficientStock` if `quantity > book.quantity()`
    ///
    /// The cart is unchanged on error. Adding the same book twice yields two
    /// lines.
    pub fn add_to_cart(&mut self, book: &Book, quantity: i64) -> CoreResult<()> {
        validate_cart_quantity(quantity)?;
        validate_in_stock(book, quantity)?;

        self.lines.push(CartLine {
            book_id: book.id(),
            quantity,
        });
        Ok(())
    }

    /// Σ price × quantity over the current lines.
    pub fn total(&self, catalog: &impl Catalog) -> Money {
        self.lines.iter().map(|line| line.line_total(catalog)).sum()
    }

    /// Renders the cart against the catalog.
    pub fn view_cart(&self, catalog: &impl Catalog) -> CartView {
        let lines = self
            .lines
            .iter()
            .enumerate()
            .filter_map(|(index, line)| {
                catalog.book(line.book_id).map(|book| CartViewLine {
                    ordinal: index + 1,
                    title: book.title().to_string(),
                    quantity: line.quantity,
                    unit_price: book.price(),
                })
            })
            .collect();

        CartView {
            lines,
            total: self.total(catalog),
        }
    }

    /// Removes the first line whose book title equals `title`, ignoring case.
    pub fn remove_by_title(&mut self, title: &str, catalog: &impl Catalog) -> Removal {
        if self.lines.is_empty() {
            return Removal::CartEmpty;
        }

        let wanted = title.to_lowercase();
        let position = self.lines.iter().position(|line| {
            catalog
                .book(line.book_id)
                .is_some_and(|book| book.title().to_lowercase() == wanted)
        });

        match position {
            Some(index) => Removal::Removed(self.lines.remove(index)),
            None => Removal::NotFound,
        }
    }

    /// Turns the whole cart into an order stamped with the current time.
    ///
    /// Returns `None` and records nothing if the cart is empty.
    pub fn checkout(&mut self) -> Option<&Order> {
        self.checkout_at(Utc::now())
    }

    /// [`checkout`](Self::checkout) with an explicit timestamp.
    pub fn checkout_at(&mut self, purchased_at: DateTime<Utc>) -> Option<&Order> {
        if self.lines.is_empty() {
            return None;
        }

        let lines = std::mem::take(&mut self.lines);
        let order = Order::new(self.sequence.next_id(), lines, purchased_at);
        self.orders.push(order);
        self.orders.last()
    }

    /// Order history, oldest first.
    pub fn view_orders(&self) -> &[Order] {
        &self.orders
    }

    /// First order in history with this id.
    pub fn find_order(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| order.id() == id)
    }
}

impl Default for ShoppingCart {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::BookId;
    use crate::error::CoreError;
    use crate::inventory::Inventory;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn add(inventory: &mut Inventory, title: &str, price_cents: i64, stock: i64) -> BookId {
        inventory.add_book(
            Book::new(title, "Author", Money::from_cents(price_cents), stock, "General").unwrap(),
        )
    }

    fn book(inventory: &Inventory, id: BookId) -> Book {
        inventory.get(id).unwrap().clone()
    }

    #[test]
    fn test_add_to_cart() {
        let mut inventory = Inventory::new();
        let a = add(&mut inventory, "A", 1000, 5);
        let mut cart = ShoppingCart::new();

        cart.add_to_cart(&book(&inventory, a), 3).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0], CartLine { book_id: a, quantity: 3 });
        assert_eq!(cart.total(&inventory).cents(), 3000);
    }

    #[test]
    fn test_add_same_book_twice_keeps_separate_lines() {
        let mut inventory = Inventory::new();
        let a = add(&mut inventory, "A", 1000, 5);
        let mut cart = ShoppingCart::new();

        cart.add_to_cart(&book(&inventory, a), 4).unwrap();
        cart.add_to_cart(&book(&inventory, a), 4).unwrap();

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total(&inventory).cents(), 8000);
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let mut inventory = Inventory::new();
        let a = add(&mut inventory, "A", 1000, 5);
        let mut cart = ShoppingCart::new();

        for qty in [0, -1, -100] {
            assert_eq!(
                cart.add_to_cart(&book(&inventory, a), qty),
                Err(CoreError::InvalidQuantity { requested: qty })
            );
        }
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_rejects_more_than_stock() {
        let mut inventory = Inventory::new();
        let a = add(&mut inventory, "A", 1000, 5);
        let mut cart = ShoppingCart::new();

        let err = cart.add_to_cart(&book(&inventory, a), 6).unwrap_err();
        assert_eq!(
            err,
            CoreError::InsufficientStock {
                title: "A".to_string(),
                available: 5,
                requested: 6,
            }
        );
        assert_eq!(err.to_string(), "Insufficient stock. Only 5 A(s) available.");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_view_cart() {
        let mut inventory = Inventory::new();
        let a = add(&mut inventory, "Python Programming", 2999, 10);
        let b = add(&mut inventory, "1984", 1299, 15);
        let mut cart = ShoppingCart::new();

        let empty = cart.view_cart(&inventory);
        assert!(empty.is_empty());
        assert_eq!(empty.to_string(), "Shopping Cart is empty.");

        cart.add_to_cart(&book(&inventory, a), 2).unwrap();
        cart.add_to_cart(&book(&inventory, b), 1).unwrap();

        let view = cart.view_cart(&inventory);
        assert_eq!(view.total.cents(), 7297);
        assert_eq!(
            view.to_string(),
            "Shopping Cart:\n\
             1. Python Programming - Quantity: 2, Price: $29.99\n\
             2. 1984 - Quantity: 1, Price: $12.99\n\
             Total Price: $72.97"
        );
    }

    #[test]
    fn test_checkout_empty_cart() {
        let mut cart = ShoppingCart::new();
        assert!(cart.checkout().is_none());
        assert!(cart.view_orders().is_empty());
        assert_eq!(cart.next_order_id(), OrderId::new(1));
    }

    #[test]
    fn test_checkout_creates_order_and_clears_cart() {
        let mut inventory = Inventory::new();
        let a = add(&mut inventory, "A", 1000, 5);
        let b = add(&mut inventory, "B", 250, 5);
        let mut cart = ShoppingCart::new();
        cart.add_to_cart(&book(&inventory, a), 3).unwrap();
        cart.add_to_cart(&book(&inventory, b), 2).unwrap();
        let expected_lines = cart.lines().to_vec();
        let when = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

        let order = cart.checkout_at(when).unwrap().clone();

        assert_eq!(order.id(), OrderId::new(1));
        assert_eq!(order.lines(), expected_lines.as_slice());
        assert_eq!(order.purchased_at(), when);
        assert_eq!(order.total(&inventory).cents(), 3500);
        assert!(cart.is_empty());
        assert_eq!(cart.view_orders().len(), 1);
    }

    #[test]
    fn test_order_ids_increase_per_checkout() {
        let mut inventory = Inventory::new();
        let a = add(&mut inventory, "A", 1000, 5);
        let mut cart = ShoppingCart::new();

        for expected in 1..=5 {
            cart.add_to_cart(&book(&inventory, a), 1).unwrap();
            assert_eq!(cart.checkout().unwrap().id(), OrderId::new(expected));
        }
        // An empty checkout does not burn an id.
        assert!(cart.checkout().is_none());
        cart.add_to_cart(&book(&inventory, a), 1).unwrap();
        assert_eq!(cart.checkout().unwrap().id(), OrderId::new(6));
    }

    #[test]
    fn test_each_cart_numbers_independently() {
        let mut inventory = Inventory::new();
        let a = add(&mut inventory, "A", 1000, 5);
        let mut first = ShoppingCart::new();
        let mut second = ShoppingCart::new();

        first.add_to_cart(&book(&inventory, a), 1).unwrap();
        first.checkout();
        second.add_to_cart(&book(&inventory, a), 1).unwrap();

        assert_eq!(second.checkout().unwrap().id(), OrderId::new(1));
    }

    #[test]
    fn test_injected_sequence() {
        let mut inventory = Inventory::new();
        let a = add(&mut inventory, "A", 1000, 5);
        let mut cart = ShoppingCart::with_sequence(Box::new(AtomicOrderSequence::starting_at(41)));

        cart.add_to_cart(&book(&inventory, a), 1).unwrap();
        assert_eq!(cart.checkout().unwrap().id(), OrderId::new(41));
        assert_eq!(cart.next_order_id(), OrderId::new(42));
    }

    #[test]
    fn test_find_order() {
        let mut inventory = Inventory::new();
        let a = add(&mut inventory, "A", 1000, 5);
        let mut cart = ShoppingCart::new();
        cart.add_to_cart(&book(&inventory, a), 1).unwrap();
        cart.checkout();
        cart.add_to_cart(&book(&inventory, a), 2).unwrap();
        cart.checkout();

        let second = cart.find_order(OrderId::new(2)).unwrap();
        assert_eq!(second.lines()[0].quantity, 2);
        assert!(cart.find_order(OrderId::new(3)).is_none());
        assert!(cart.find_order(OrderId::new(0)).is_none());
    }

    #[test]
    fn test_remove_by_title() {
        let mut inventory = Inventory::new();
        let a = add(&mut inventory, "Dune", 1000, 5);
        let b = add(&mut inventory, "Emma", 1000, 5);
        let mut cart = ShoppingCart::new();

        assert_eq!(cart.remove_by_title("Dune", &inventory), Removal::CartEmpty);

        cart.add_to_cart(&book(&inventory, a), 1).unwrap();
        cart.add_to_cart(&book(&inventory, b), 2).unwrap();

        assert_eq!(cart.remove_by_title("Ulysses", &inventory), Removal::NotFound);
        assert_eq!(
            cart.remove_by_title("eMMA", &inventory),
            Removal::Removed(CartLine { book_id: b, quantity: 2 })
        );
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].book_id, a);
    }

    #[test]
    fn test_remove_by_title_removes_only_first_match() {
        let mut inventory = Inventory::new();
        // Two distinct catalog entries with the same title.
        let first = add(&mut inventory, "1984", 1299, 5);
        let second = add(&mut inventory, "1984", 999, 5);
        let mut cart = ShoppingCart::new();
        cart.add_to_cart(&book(&inventory, first), 1).unwrap();
        cart.add_to_cart(&book(&inventory, second), 1).unwrap();
        cart.add_to_cart(&book(&inventory, first), 3).unwrap();

        let removed = cart.remove_by_title("1984", &inventory);

        assert_eq!(removed, Removal::Removed(CartLine { book_id: first, quantity: 1 }));
        assert_eq!(
            cart.lines(),
            &[
                CartLine { book_id: second, quantity: 1 },
                CartLine { book_id: first, quantity: 3 },
            ]
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: after any mix of valid adds and title removals, the cart
        /// total equals Σ price × quantity over the lines still present.
        #[test]
        fn cart_total_matches_present_lines(
            books in prop::collection::vec((0i64..10_000, 1i64..50), 1..6),
            adds in prop::collection::vec((0usize..6, 1i64..50), 0..20),
            removals in prop::collection::vec(0usize..6, 0..5),
        ) {
            let mut inventory = Inventory::new();
            let ids: Vec<BookId> = books
                .iter()
                .enumerate()
                .map(|(i, (price, stock))| add(&mut inventory, &format!("Book {i}"), *price, *stock))
                .collect();
            let mut cart = ShoppingCart::new();

            for (pick, qty) in adds {
                let target = book(&inventory, ids[pick % ids.len()]);
                let before = cart.len();
                match cart.add_to_cart(&target, qty) {
                    Ok(()) => prop_assert_eq!(cart.len(), before + 1),
                    Err(CoreError::InsufficientStock { available, .. }) => {
                        prop_assert!(qty > target.quantity());
                        prop_assert_eq!(available, target.quantity());
                        prop_assert_eq!(cart.len(), before);
                    }
                    Err(other) => prop_assert!(false, "unexpected error: {other}"),
                }
            }
            for pick in removals {
                cart.remove_by_title(&format!("Book {}", pick % ids.len()), &inventory);
            }

            let expected: i64 = cart
                .lines()
                .iter()
                .map(|line| inventory.get(line.book_id).unwrap().price().cents() * line.quantity)
                .sum();
            prop_assert_eq!(cart.total(&inventory).cents(), expected);
            prop_assert_eq!(cart.view_cart(&inventory).total.cents(), expected);
        }

        /// Property: however checkouts interleave with adds, ids are unique
        /// and strictly increasing, and history grows by one per non-empty
        /// checkout.
        #[test]
        fn order_ids_strictly_increase(script in prop::collection::vec(prop::bool::ANY, 1..40)) {
            let mut inventory = Inventory::new();
            let a = add(&mut inventory, "A", 100, 1);
            let mut cart = ShoppingCart::new();
            let mut expected_orders = 0;

            for checkout in script {
                if checkout {
                    let had_lines = !cart.is_empty();
                    let created = cart.checkout().is_some();
                    prop_assert_eq!(created, had_lines);
                    if created {
                        expected_orders += 1;
                    }
                    prop_assert!(cart.is_empty());
                } else {
                    cart.add_to_cart(&book(&inventory, a), 1).unwrap();
                }
            }

            let ids: Vec<u64> = cart.view_orders().iter().map(|o| o.id().value()).collect();
            prop_assert_eq!(ids.len(), expected_orders);
            prop_assert!(ids.windows(2).all(|w| w[1] == w[0] + 1));
            if let Some(first) = ids.first() {
                prop_assert_eq!(*first, 1);
            }
        }
    }
}
