//! # Transaction Calculator
//!
//! Pure functions computing totals, change, and per-item groupings.
//! No I/O, no clock, no randomness: the same line items always produce
//! bit-identical results.
//!
//! Grouping is keyed by item id in a `BTreeMap`, so iteration order is
//! deterministic regardless of scan order.

use std::collections::BTreeMap;

use crate::money::Money;
use crate::types::{ItemQuantity, LineItem, SaleDetailDraft, TransactionSummary};

/// Sums the unit prices of all scanned line items.
pub fn total_amount(items: &[LineItem]) -> Money {
    items.iter().map(LineItem::price).sum()
}

/// Change owed: `deposit - total`.
///
/// Validation guarantees this is non-negative before a sale is
/// persisted; the function itself does not clamp.
pub fn change(total: Money, deposit: Money) -> Money {
    deposit.saturating_sub(total)
}

/// Groups scanned units by item id.
///
/// Each group's entries share the same unit price since they reference
/// the same catalog item captured at the same instant. Input order and
/// multiplicity are preserved within a group.
pub fn group_by_item(items: &[LineItem]) -> BTreeMap<i64, Vec<LineItem>> {
    let mut groups: BTreeMap<i64, Vec<LineItem>> = BTreeMap::new();
    for item in items {
        groups.entry(item.item_id).or_default().push(item.clone());
    }
    groups
}

/// Builds the detail rows for a sale: one draft per distinct item id,
/// `quantity = group size`, `price = unit price of the group`.
pub fn detail_drafts(items: &[LineItem]) -> Vec<SaleDetailDraft> {
    group_by_item(items)
        .into_iter()
        .map(|(item_id, group)| SaleDetailDraft {
            item_id,
            price: group.first().map(|li| li.price).unwrap_or(0),
            quantity: group.len() as i64,
        })
        .collect()
}

/// Derives the summary figures returned with a successful transaction.
pub fn summarize(items: &[LineItem], deposit: Money) -> TransactionSummary {
    let total = total_amount(items);
    let groups = group_by_item(items);

    TransactionSummary {
        total_amount: total.minor(),
        deposit: deposit.minor(),
        change: change(total, deposit).minor(),
        item_count: items.len() as i64,
        unique_items: groups.len() as i64,
        item_quantities: groups
            .iter()
            .map(|(&item_id, group)| ItemQuantity {
                item_id,
                quantity: group.len() as i64,
            })
            .collect(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
