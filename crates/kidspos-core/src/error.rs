//! # Error Types
//!
//! Domain error types for kidspos-core.
//!
//! ## Design Principles
//! 1. `thiserror` derive macros, never manual impls
//! 2. Errors are enum variants with context, never bare strings
//! 3. Every variant's message is safe to show to the cashier

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// A violated business rule, detected before any write occurs.
///
/// Maps to the `ValidationError` arm of
/// [`crate::types::TransactionResult`]; the variant message is the
/// user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// A numeric field must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: &'static str },

    /// The sale has no scanned items.
    #[error("no items scanned")]
    NoItems,

    /// The sale exceeds the per-transaction item bound.
    #[error("sale cannot contain more than {max} items")]
    TooManyItems { max: usize },

    /// A scanned line item carries invalid data.
    #[error("line item {position}: {problem}")]
    InvalidLineItem {
        /// 1-based position in scan order.
        position: usize,
        problem: &'static str,
    },

    /// The staff barcode did not resolve through the Directory.
    #[error("unknown staff barcode: {barcode}")]
    UnknownStaff { barcode: String },

    /// The cash tendered does not cover the total.
    #[error("insufficient deposit: {deposit} tendered for a total of {total}")]
    InsufficientDeposit { deposit: i64, total: i64 },
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::InsufficientDeposit {
            deposit: 399,
            total: 400,
        };
        assert_eq!(
            err.to_string(),
            "insufficient deposit: 399 tendered for a total of 400"
        );

        let err = ValidationError::MustBePositive { field: "store_id" };
        assert_eq!(err.to_string(), "store_id must be positive");
    }

    #[test]
    fn test_unknown_staff_message_carries_barcode() {
        let err = ValidationError::UnknownStaff {
            barcode: "ST-0042".into(),
        };
        assert!(err.to_string().contains("ST-0042"));
    }
}
