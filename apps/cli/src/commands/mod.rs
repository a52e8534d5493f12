//! # Menu Commands
//!
//! One function per menu entry.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (menu, dispatch)
//! ├── inventory.rs  ◄─── List, add, search by title or category
//! ├── cart.rs       ◄─── View, add, remove, checkout
//! └── order.rs      ◄─── Order history and lookup by id
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Menu Command Flow                                    │
//! │                                                                         │
//! │  "4" ──► MenuChoice::AddToCart ──► dispatch()                          │
//! │                                        │                                │
//! │                                        ▼                                │
//! │  cart::add_to_cart(state, prompter)                                    │
//! │      1. prompt for fields     (no lock held while waiting)             │
//! │      2. state.with_store_mut  (short critical section)                 │
//! │      3. prompter.say(result)                                           │
//! │                                        │                                │
//! │                                        ▼                                │
//! │  Ok(Flow::Continue) / Err(AppError) ──► session prints "Error: ..."    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands never hold the store lock across a prompt.

pub mod cart;
pub mod inventory;
pub mod order;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::error::AppResult;
use crate::input::Console;
use crate::state::StoreState;

/// An entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuChoice {
    ViewInventory,
    AddBook,
    ViewCart,
    AddToCart,
    Checkout,
    ViewOrders,
    RemoveFromCart,
    SearchTitle,
    BooksByCategory,
    SearchCategory,
    FindOrder,
    Exit,
}

impl MenuChoice {
    /// All entries in menu order.
    pub const ALL: [MenuChoice; 12] = [
        MenuChoice::ViewInventory,
        MenuChoice::AddBook,
        MenuChoice::ViewCart,
        MenuChoice::AddToCart,
        MenuChoice::Checkout,
        MenuChoice::ViewOrders,
        MenuChoice::RemoveFromCart,
        MenuChoice::SearchTitle,
        MenuChoice::BooksByCategory,
        MenuChoice::SearchCategory,
        MenuChoice::FindOrder,
        MenuChoice::Exit,
    ];

    /// The number typed to select this entry.
    pub fn number(self) -> u8 {
        match self {
            MenuChoice::ViewInventory => 1,
            MenuChoice::AddBook => 2,
            MenuChoice::ViewCart => 3,
            MenuChoice::AddToCart => 4,
            MenuChoice::Checkout => 5,
            MenuChoice::ViewOrders => 6,
            MenuChoice::RemoveFromCart => 7,
            MenuChoice::SearchTitle => 8,
            MenuChoice::BooksByCategory => 9,
            MenuChoice::SearchCategory => 10,
            MenuChoice::FindOrder => 11,
            MenuChoice::Exit => 12,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::ViewInventory => "View Inventory",
            MenuChoice::AddBook => "Add a Book to Inventory",
            MenuChoice::ViewCart => "View Shopping Cart",
            MenuChoice::AddToCart => "Add Book to Shopping Cart",
            MenuChoice::Checkout => "Purchase Books",
            MenuChoice::ViewOrders => "View Purchased Orders",
            MenuChoice::RemoveFromCart => "Delete Book from Shopping Cart",
            MenuChoice::SearchTitle => "Search Inventory",
            MenuChoice::BooksByCategory => "View Books by Category",
            MenuChoice::SearchCategory => "Search by Category",
            MenuChoice::FindOrder => "Search Order by ID",
            MenuChoice::Exit => "Exit",
        }
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}

/// Anything other than a menu number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid choice. Please enter a number between 1 and 12.")]
pub struct InvalidChoice;

impl FromStr for MenuChoice {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number: u8 = s.trim().parse().map_err(|_| InvalidChoice)?;
        MenuChoice::ALL
            .into_iter()
            .find(|choice| choice.number() == number)
            .ok_or(InvalidChoice)
    }
}

/// What the session does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Runs one menu entry.
///
/// `Exit` only reports [`Flow::Exit`]; the goodbye line belongs to the
/// session, which knows the store name.
pub fn dispatch<C: Console>(choice: MenuChoice, state: &StoreState, io: &mut C) -> AppResult<Flow> {
    debug!(choice = choice.number(), command = choice.label(), "dispatch");

    match choice {
        MenuChoice::ViewInventory => inventory::view_inventory(state, io)?,
        MenuChoice::AddBook => inventory::add_book(state, io)?,
        MenuChoice::ViewCart => cart::view_cart(state, io)?,
        MenuChoice::AddToCart => cart::add_to_cart(state, io)?,
        MenuChoice::Checkout => cart::checkout(state, io)?,
        MenuChoice::ViewOrders => order::view_orders(state, io)?,
        MenuChoice::RemoveFromCart => cart::remove_from_cart(state, io)?,
        MenuChoice::SearchTitle => inventory::search_by_title(state, io)?,
        MenuChoice::BooksByCategory | MenuChoice::SearchCategory => {
            inventory::search_by_category(state, io)?
        }
        MenuChoice::FindOrder => order::find_order(state, io)?,
        MenuChoice::Exit => return Ok(Flow::Exit),
    }

    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_every_number() {
        for (i, choice) in MenuChoice::ALL.into_iter().enumerate() {
            let typed = (i + 1).to_string();
            assert_eq!(typed.parse::<MenuChoice>(), Ok(choice));
        }
        assert_eq!(" 12 \n".parse::<MenuChoice>(), Ok(MenuChoice::Exit));
    }

    #[test]
    fn test_parse_rejects_everything_else() {
        for typed in ["", "0", "13", "-1", "abc", "1.0", "4 4"] {
            assert_eq!(typed.parse::<MenuChoice>(), Err(InvalidChoice), "{typed:?}");
        }
        assert_eq!(
            InvalidChoice.to_string(),
            "Invalid choice. Please enter a number between 1 and 12."
        );
    }

    #[test]
    fn test_menu_line() {
        assert_eq!(MenuChoice::Checkout.to_string(), "5. Purchase Books");
        assert_eq!(MenuChoice::SearchCategory.to_string(), "10. Search by Category");
    }

    proptest! {
        #[test]
        fn prop_only_1_to_12_parse(n in any::<i32>()) {
            let parsed = n.to_string().parse::<MenuChoice>();
            if (1..=12).contains(&n) {
                prop_assert_eq!(parsed.map(MenuChoice::number), Ok(n as u8));
            } else {
                prop_assert_eq!(parsed, Err(InvalidChoice));
            }
        }
    }
}
