//! # Validation Module
//!
//! Input validation and the precondition steps for cart operations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Menu prompt (quill-cli)                                      │
//! │  └── parse_quantity: text → integer ≥ 0, re-prompt on failure          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Entity construction (Book::new)                              │
//! │  └── title required, price ≥ 0, stock ≥ 0                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart preconditions (ShoppingCart::add_to_cart)               │
//! │  ├── validate_cart_quantity: quantity > 0                              │
//! │  └── validate_in_stock: quantity ≤ recorded stock                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::book::Book;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::{MAX_PRICE_CENTS, MAX_STOCK_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates that a text field is present.
///
/// ## Example
/// ```rust
/// use quill_core::validation::validate_required;
///
/// assert!(validate_required("title", "1984").is_ok());
/// assert!(validate_required("title", "   ").is_err());
/// ```
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a stock level recorded in the catalog.
///
/// Zero is allowed: a book can be listed while out of stock.
///
/// ## Rules
/// - Must be zero or more
/// - Must not exceed MAX_STOCK_QUANTITY (1,000,000)
pub fn validate_stock_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_STOCK_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: MAX_STOCK_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a catalog price. Zero is allowed (free books).
///
/// The upper bound is MAX_PRICE_CENTS ($1,000,000.00).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    if price.cents() > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price in cents".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Parses a quantity typed at a prompt.
///
/// ## Rules
/// - Must be an integer (`MalformedInput` otherwise)
/// - Must be zero or more (`MustNotBeNegative` otherwise)
/// - Must not exceed MAX_STOCK_QUANTITY (`OutOfRange` otherwise)
///
/// Zero passes here on purpose: the prompt accepts it and the cart then
/// rejects it with `InvalidQuantity`.
///
/// ## Example
/// ```rust
/// use quill_core::validation::parse_quantity;
///
/// assert_eq!(parse_quantity(" 3 ").unwrap(), 3);
/// assert!(parse_quantity("three").is_err());
/// assert!(parse_quantity("-1").is_err());
/// ```
pub fn parse_quantity(input: &str) -> CoreResult<i64> {
    let raw = input.trim();
    let qty: i64 = raw.parse().map_err(|_| CoreError::MalformedInput {
        field: "quantity".to_string(),
        input: raw.to_string(),
    })?;

    validate_stock_quantity(qty)?;
    Ok(qty)
}

// =============================================================================
// Cart Preconditions
// =============================================================================

/// Rejects zero and negative cart quantities.
///
/// ## User Workflow
/// ```text
/// User enters quantity: 0
///      │
///      ▼
/// validate_cart_quantity(0) ← THIS FUNCTION
///      │
///      └── qty <= 0 → InvalidQuantity, cart unchanged
/// ```
pub fn validate_cart_quantity(qty: i64) -> CoreResult<()> {
    if qty <= 0 {
        return Err(CoreError::InvalidQuantity { requested: qty });
    }

    Ok(())
}

/// Checks a requested quantity against the book's recorded stock.
///
/// Advisory only: nothing is reserved, so two carts could both pass.
pub fn validate_in_stock(book: &Book, qty: i64) -> CoreResult<()> {
    if qty > book.quantity() {
        return Err(CoreError::InsufficientStock {
            title: book.title().to_string(),
            available: book.quantity(),
            requested: qty,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn book(stock: i64) -> Book {
        Book::new("1984", "George Orwell", Money::from_cents(1299), stock, "Fiction").unwrap()
    }

    #[test]
    fn test_validate_required() {
        assert!(validate_required("title", "Dune").is_ok());
        assert!(validate_required("title", "").is_err());
        assert!(validate_required("title", " \t ").is_err());
    }

    #[test]
    fn test_validate_stock_quantity() {
        assert!(validate_stock_quantity(0).is_ok());
        assert!(validate_stock_quantity(500).is_ok());
        assert!(validate_stock_quantity(-1).is_err());
        assert!(validate_stock_quantity(MAX_STOCK_QUANTITY).is_ok());
        assert_eq!(
            validate_stock_quantity(MAX_STOCK_QUANTITY + 1),
            Err(ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 0,
                max: MAX_STOCK_QUANTITY,
            })
        );
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_cents(1099)).is_ok());
        assert!(validate_price(Money::from_cents(-1)).is_err());
        assert!(validate_price(Money::from_cents(MAX_PRICE_CENTS)).is_ok());
        assert!(matches!(
            validate_price(Money::from_cents(MAX_PRICE_CENTS + 1)),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(validate_price(Money::from_cents(i64::MAX)).is_err());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("0").unwrap(), 0);
        assert_eq!(parse_quantity("12").unwrap(), 12);
        assert!(matches!(
            parse_quantity("1.5"),
            Err(CoreError::MalformedInput { .. })
        ));
        assert!(matches!(
            parse_quantity(""),
            Err(CoreError::MalformedInput { .. })
        ));
        assert!(matches!(
            parse_quantity("-4"),
            Err(CoreError::Validation(ValidationError::MustNotBeNegative { .. }))
        ));
        assert_eq!(parse_quantity("1000000").unwrap(), MAX_STOCK_QUANTITY);
        assert!(matches!(
            parse_quantity("9223372036854775807"),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn test_validate_cart_quantity() {
        assert!(validate_cart_quantity(1).is_ok());
        assert_eq!(
            validate_cart_quantity(0),
            Err(CoreError::InvalidQuantity { requested: 0 })
        );
        assert_eq!(
            validate_cart_quantity(-3),
            Err(CoreError::InvalidQuantity { requested: -3 })
        );
    }

    #[test]
    fn test_validate_in_stock() {
        let book = book(15);
        assert!(validate_in_stock(&book, 15).is_ok());
        assert_eq!(
            validate_in_stock(&book, 16),
            Err(CoreError::InsufficientStock {
                title: "1984".to_string(),
                available: 15,
                requested: 16,
            })
        );
    }
}
