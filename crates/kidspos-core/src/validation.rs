//! # Validation Module
//!
//! Business rule validation for the sale pipeline.
//!
//! ## Rule Order
//! The orchestrator checks rules fail-fast, first failure wins:
//! ```text
//! 1. store_id positive            validate_store_id
//! 2. staff barcode non-blank      validate_staff_barcode
//!    + resolves via Directory     (orchestrator, lookup miss ->
//!                                  ValidationError::UnknownStaff)
//! 3. line items non-empty         validate_line_items
//! 4. each line item well-formed   validate_line_items
//! 5. deposit covers the total     validate_deposit
//! ```
//!
//! Everything here is pure and deterministic: no clock, no randomness,
//! no lookups. Rule 2's Directory half lives with the orchestrator.

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::types::LineItem;
use crate::MAX_SALE_ITEMS;

/// Validates the store id (rule 1).
pub fn validate_store_id(store_id: i64) -> ValidationResult<()> {
    if store_id <= 0 {
        return Err(ValidationError::MustBePositive { field: "store_id" });
    }
    Ok(())
}

/// Validates the staff barcode is non-blank (rule 2, local half).
///
/// Whether the barcode resolves to a staff member is the Directory's
/// call; the orchestrator maps a miss to
/// [`ValidationError::UnknownStaff`].
pub fn validate_staff_barcode(barcode: &str) -> ValidationResult<()> {
    if barcode.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "staff_barcode",
        });
    }
    Ok(())
}

/// Validates the scanned line items (rules 3 and 4).
///
/// ## Rules
/// - at least one item, at most [`MAX_SALE_ITEMS`]
/// - each item: positive id, non-blank name, non-negative price
pub fn validate_line_items(items: &[LineItem]) -> ValidationResult<()> {
    if items.is_empty() {
        return Err(ValidationError::NoItems);
    }

    for (index, item) in items.iter().enumerate() {
        let position = index + 1;
        if item.item_id <= 0 {
            return Err(ValidationError::InvalidLineItem {
                position,
                problem: "item id must be positive",
            });
        }
        if item.name.trim().is_empty() {
            return Err(ValidationError::InvalidLineItem {
                position,
                problem: "item name is blank",
            });
        }
        if item.price < 0 {
            return Err(ValidationError::InvalidLineItem {
                position,
                problem: "item price is negative",
            });
        }
    }

    if items.len() > MAX_SALE_ITEMS {
        return Err(ValidationError::TooManyItems {
            max: MAX_SALE_ITEMS,
        });
    }

    Ok(())
}

/// Validates deposit sufficiency (rule 5).
///
/// `deposit == total` is acceptable (change 0); anything less is an
/// insufficient-deposit validation error, never a processing error.
pub fn validate_deposit(deposit: Money, total: Money) -> ValidationResult<()> {
    if deposit < total {
        return Err(ValidationError::InsufficientDeposit {
            deposit: deposit.minor(),
            total: total.minor(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
