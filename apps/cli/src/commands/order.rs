//! # Order Commands
//!
//! Read-only views of the purchase history.

use tracing::debug;

use quill_core::Receipt;

use crate::error::AppResult;
use crate::input::Console;
use crate::state::StoreState;

/// Menu 6: every order, oldest first, each followed by a blank line.
pub fn view_orders<C: Console>(state: &StoreState, io: &mut C) -> AppResult<()> {
    debug!("view_orders command");

    let receipts: Vec<Receipt> = state.with_store(|s| {
        s.cart()
            .view_orders()
            .iter()
            .map(|order| order.receipt(s.inventory()))
            .collect()
    });

    if receipts.is_empty() {
        return io.say("No orders have been made yet.");
    }

    io.say("Purchased Orders:")?;
    for receipt in receipts {
        io.say(receipt)?;
        io.blank()?;
    }
    Ok(())
}

/// Menu 11: one order by id. A non-numeric id aborts the command.
pub fn find_order<C: Console>(state: &StoreState, io: &mut C) -> AppResult<()> {
    let id = io.prompt_order_id("Enter the order ID: ")?;
    debug!(order_id = %id, "find_order command");

    let found = state.with_store(|s| s.cart().find_order(id).map(|order| order.receipt(s.inventory())));

    match found {
        Some(receipt) => {
            io.say("Order found:")?;
            io.say(receipt)
        }
        None => io.say("Order not found."),
    }
}
