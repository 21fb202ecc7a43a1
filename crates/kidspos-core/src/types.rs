//! # Domain Types
//!
//! Core domain types for the sale transaction pipeline.
//!
//! ## Type Hierarchy
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                               │
//! │                                                                    │
//! │  ┌───────────────┐    ┌───────────────┐    ┌───────────────┐       │
//! │  │     Item      │    │     Sale      │    │  SaleDetail   │       │
//! │  │  ───────────  │    │  ───────────  │    │  ───────────  │       │
//! │  │  id           │    │  id           │    │  sale_id (FK) │       │
//! │  │  barcode      │    │  store_id     │    │  item_id      │       │
//! │  │  name         │    │  quantity     │    │  price        │       │
//! │  │  price        │    │  amount       │    │  quantity     │       │
//! │  └───────────────┘    │  deposit      │    └───────────────┘       │
//! │                       │  change       │                            │
//! │  One LineItem per     └───────────────┘    One SaleDetail per      │
//! │  scanned unit                              distinct item id        │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All monetary fields are integers in minor currency units; see
//! [`crate::money::Money`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::DEFAULT_PRINTER_PORT;

// =============================================================================
// Item
// =============================================================================

/// An item available for sale. Owned by the Catalog collaborator.
///
/// Price is captured into the sale detail at sale time and never re-read,
/// so later catalog edits cannot rewrite sale history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Item {
    /// Unique identifier.
    pub id: i64,

    /// Scannable barcode.
    pub barcode: String,

    /// Display name shown to the cashier and on the receipt.
    pub name: String,

    /// Price in minor currency units.
    pub price: i64,
}

impl Item {
    /// Returns the price as a Money value.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_minor(self.price)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One scanned unit within a sale request (parsing output).
///
/// Duplicates represent multiple units of the same item; they are never
/// pre-merged. Merging happens in the calculator when detail rows are
/// built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub item_id: i64,
    pub barcode: String,
    pub name: String,
    /// Unit price at scan time, in minor currency units.
    pub price: i64,
}

impl LineItem {
    /// Builds a line item from a resolved catalog item.
    pub fn from_item(item: &Item) -> Self {
        LineItem {
            item_id: item.id,
            barcode: item.barcode.clone(),
            name: item.name.clone(),
            price: item.price,
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_minor(self.price)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// One completed checkout transaction.
///
/// Invariants, enforced before the row is written:
/// - `amount == sum(line item prices)`
/// - `quantity == number of scanned units`
/// - `change_amount == deposit - amount`, never negative
///
/// A Sale is created exactly once and never mutated; corrections require
/// a new, compensating sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: i64,
    pub store_id: i64,
    pub staff_id: i64,
    /// Number of scanned units.
    pub quantity: i64,
    /// Total amount owed, in minor currency units.
    pub amount: i64,
    /// Cash tendered, in minor currency units.
    pub deposit: i64,
    /// Change returned, in minor currency units.
    pub change_amount: i64,
    pub created_at: DateTime<Utc>,
}

impl Sale {
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_minor(self.amount)
    }

    #[inline]
    pub fn change(&self) -> Money {
        Money::from_minor(self.change_amount)
    }
}

// =============================================================================
// Sale Detail
// =============================================================================

/// One distinct-item row within a sale, with merged quantity.
///
/// Owned exclusively by its Sale: written alongside it, never mutated
/// independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleDetail {
    pub id: i64,
    pub sale_id: i64,
    pub item_id: i64,
    /// Unit price at sale time, in minor currency units.
    pub price: i64,
    /// Units of this item in this sale.
    pub quantity: i64,
}

/// A detail row before the persister assigns ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleDetailDraft {
    pub item_id: i64,
    pub price: i64,
    pub quantity: i64,
}

// =============================================================================
// Transaction Result
// =============================================================================

/// Per-item quantity entry in a [`TransactionSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemQuantity {
    pub item_id: i64,
    pub quantity: i64,
}

/// Derived figures for a successful transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSummary {
    pub total_amount: i64,
    pub deposit: i64,
    pub change: i64,
    /// Number of scanned units.
    pub item_count: i64,
    /// Number of distinct item ids.
    pub unique_items: i64,
    /// Per-item quantities, ordered by item id.
    pub item_quantities: Vec<ItemQuantity>,
}

/// The terminal outcome of one `process_sale` call.
///
/// The orchestrator returns exactly one of these; callers must match
/// every arm. Expected business failures never surface as panics or
/// raw errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TransactionResult {
    /// Sale persisted; carries the stored row and computed summary.
    Success {
        sale: Sale,
        summary: TransactionSummary,
    },
    /// Bad input; message is safe to show to the cashier.
    ValidationError { message: String },
    /// Storage or infrastructure failure; message is generic.
    ProcessingError { message: String },
}

impl TransactionResult {
    /// True for the `Success` arm.
    pub fn is_success(&self) -> bool {
        matches!(self, TransactionResult::Success { .. })
    }

    /// The persisted sale, when successful.
    pub fn sale(&self) -> Option<&Sale> {
        match self {
            TransactionResult::Success { sale, .. } => Some(sale),
            _ => None,
        }
    }
}

// =============================================================================
// Directory Rows
// =============================================================================

/// A store as the Directory collaborator reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StoreInfo {
    pub id: i64,
    pub name: String,
    /// Receipt printer host; `None` or blank means no printer configured.
    pub printer_host: Option<String>,
    /// Receipt printer port; stored wide for the database, clamped to
    /// the default raw-socket port when out of `u16` range.
    pub printer_port: i64,
}

impl StoreInfo {
    /// The printer endpoint, or `None` when no printer is configured.
    pub fn printer_endpoint(&self) -> Option<(&str, u16)> {
        let host = self.printer_host.as_deref()?.trim();
        if host.is_empty() {
            return None;
        }
        let port = u16::try_from(self.printer_port).unwrap_or(DEFAULT_PRINTER_PORT);
        Some((host, port))
    }
}

/// A staff member as the Directory collaborator reports it.
///
/// Staff identity is resolved here, never parsed out of the barcode
/// text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StaffInfo {
    pub id: i64,
    pub name: String,
    pub barcode: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
