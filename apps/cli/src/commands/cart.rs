//! # Cart Commands
//!
//! Menu entries that read or change the shopping cart.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐  add_to_cart   ┌──────────┐   checkout    ┌──────────┐   │
//! │  │  Empty   │───────────────►│ In Cart  │──────────────►│  Order   │   │
//! │  │  Cart    │                │          │               │ #n saved │   │
//! │  └──────────┘◄───────────────└──────────┘               └──────────┘   │
//! │       ▲       remove_from_cart    │                          │          │
//! │       │       (last line)         │                          │          │
//! │       └───────────────────────────┴──────────────────────────┘          │
//! │                       cart is cleared by checkout                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use quill_core::{CoreResult, Receipt, Removal};

use crate::error::AppResult;
use crate::input::Console;
use crate::state::StoreState;

/// Menu 3: lines with unit prices and the running total.
pub fn view_cart<C: Console>(state: &StoreState, io: &mut C) -> AppResult<()> {
    debug!("view_cart command");
    let view = state.with_store(|s| s.cart().view_cart(s.inventory()).to_string());
    io.say(view)
}

/// Menu 4: adds a catalog book to the cart.
///
/// The title must match exactly, including case. An unknown title is
/// reported before the quantity is asked for.
pub fn add_to_cart<C: Console>(state: &StoreState, io: &mut C) -> AppResult<()> {
    let title = io.prompt("Enter the title of the book you want to add to the cart: ")?;

    if !state.with_store(|s| s.inventory().find_by_title(&title).is_some()) {
        debug!(title = %title, "add_to_cart: unknown title");
        return io.say("Book not found in inventory.");
    }

    let quantity = io.prompt_quantity("Enter the quantity: ")?;
    debug!(title = %title, quantity, "add_to_cart command");

    let added = state.with_store_mut(|s| {
        s.add_to_cart_by_title(&title, quantity)
            .map(|book| book.title().to_string())
    })?;

    io.say(format_args!("{quantity} {added}(s) added to cart."))
}

/// Menu 7: drops the first line whose title matches, ignoring case.
pub fn remove_from_cart<C: Console>(state: &StoreState, io: &mut C) -> AppResult<()> {
    let title = io.prompt("Enter the title of the book you want to delete from the cart: ")?;
    debug!(title = %title, "remove_from_cart command");

    match state.with_store_mut(|s| s.remove_from_cart(&title)) {
        Removal::CartEmpty => io.say("Shopping Cart is empty."),
        Removal::NotFound => io.say(format_args!("Book '{title}' not found in the shopping cart.")),
        Removal::Removed(line) => {
            debug!(book_id = %line.book_id, quantity = line.quantity, "Cart line removed");
            io.say(format_args!("Book '{title}' removed from cart."))
        }
    }
}

/// Menu 5: turns the cart into an order.
pub fn checkout<C: Console>(state: &StoreState, io: &mut C) -> AppResult<()> {
    debug!("checkout command");

    let receipt = state.with_store_mut(|s| -> CoreResult<Option<Receipt>> {
        let order = s.checkout()?.cloned();
        Ok(order.map(|order| order.receipt(s.inventory())))
    })?;

    let Some(receipt) = receipt else {
        return io.say("Shopping Cart is empty. No items purchased.");
    };

    info!(
        order_id = %receipt.order_id,
        lines = receipt.items.len(),
        total = %receipt.total,
        "Order placed"
    );

    io.say("Items Purchased:")?;
    for item in &receipt.items {
        io.say(format_args!("{} - Quantity: {}", item.title, item.quantity))?;
    }
    io.say(format_args!("Order Total: {}", receipt.total))?;
    io.say("Purchase successful.")?;
    io.say(format_args!("Your order ID is {}.", receipt.order_id))
}
