//! # kidspos-core: Pure Business Logic for KidsPOS
//!
//! The heart of the sale transaction pipeline: domain types, money
//! arithmetic, validation rules, and the calculator, all as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │                     KidsPOS Sale Pipeline                          │
//! │                                                                    │
//! │  caller ──► RequestParser ──► Validator ──► Persister ──► result   │
//! │                  │                │              │                 │
//! │                  ▼                ▼              ▼                 │
//! │  ┌──────────────────────────────────────────────────────────────┐  │
//! │  │                ★ kidspos-core (THIS CRATE) ★                 │  │
//! │  │                                                              │  │
//! │  │  ┌─────────┐ ┌─────────┐ ┌────────────┐ ┌────────────────┐   │  │
//! │  │  │  types  │ │  money  │ │ calculator │ │   validation   │   │  │
//! │  │  │  Sale   │ │  Money  │ │ totals,    │ │  rule checks   │   │  │
//! │  │  │ LineItem│ │  (i64)  │ │ grouping   │ │  fail-fast     │   │  │
//! │  │  └─────────┘ └─────────┘ └────────────┘ └────────────────┘   │  │
//! │  │                                                              │  │
//! │  │  NO I/O - NO DATABASE - NO NETWORK - PURE FUNCTIONS          │  │
//! │  └──────────────────────────────────────────────────────────────┘  │
//! │                                                                    │
//! │  Catalog / Directory traits declared here, implemented by          │
//! │  kidspos-db; the printer path lives in kidspos-print.              │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, LineItem, Sale, SaleDetail, ...)
//! - [`money`] - Integer money in minor currency units
//! - [`calculator`] - Pure total/change/grouping functions
//! - [`validation`] - Business rule validation
//! - [`lookup`] - Catalog / Directory collaborator traits
//! - [`error`] - Domain error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod error;
pub mod lookup;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{ValidationError, ValidationResult};
pub use lookup::{Catalog, Directory};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum scanned units allowed in a single sale.
///
/// Keeps a runaway scanner (or a child holding the trigger down) from
/// producing an unbounded transaction.
pub const MAX_SALE_ITEMS: usize = 100;

/// Standard raw-socket port for networked thermal printers.
pub const DEFAULT_PRINTER_PORT: u16 = 9100;
