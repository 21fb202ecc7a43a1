//! # Checkout Error Types
//!
//! Errors raised while turning a raw identifier string into line items.
//! All of these are the cashier's fault (bad scan, unknown item) and
//! map onto the `ValidationError` arm of the transaction result.

use thiserror::Error;

/// Request parsing failures. Parsing is all-or-nothing: the first bad
/// token fails the whole request and nothing is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No tokens remained after trimming and dropping empties.
    #[error("no item identifiers given")]
    EmptyInput,

    /// A token is not a usable identifier (embedded whitespace,
    /// numeric overflow).
    #[error("malformed item identifier: {0}")]
    MalformedIdentifier(String),

    /// A token did not resolve through the Catalog.
    #[error("unknown item: {0}")]
    ItemNotFound(String),
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
