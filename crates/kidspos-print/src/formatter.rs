//! # Receipt Formatter
//!
//! Builds a [`ReceiptPayload`] from a sale's line items and renders it
//! as fixed-width text for a thermal printer.
//!
//! ## Receipt Layout (32 columns)
//! ```text
//! ================================
//!          Central Square
//! ================================
//! Staff: Hanako
//! --------------------------------
//! Origami Crane               ¥100
//! Paper Plane Kit             ¥200
//! Origami Crane               ¥100
//! ================================
//! TOTAL                       ¥400
//! DEPOSIT                     ¥500
//! CHANGE                      ¥100
//! --------------------------------
//! Slip: 9b2f...
//! 2026-08-06 12:34 UTC
//!       Thank you for coming!
//! ```
//!
//! Name lookups fall back to literals on a Directory miss: printing
//! must never fail just because master data is out of date.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kidspos_core::{calculator, Directory, LineItem, Money};

/// Printable receipt width in characters (58 mm paper).
pub const RECEIPT_WIDTH: usize = 32;

/// Store name used when the Directory lookup misses.
const UNKNOWN_STORE: &str = "Unknown Store";

/// Staff name used when the Directory lookup misses.
const UNKNOWN_STAFF: &str = "Unknown Staff";

// =============================================================================
// Receipt Payload
// =============================================================================

/// Everything a receipt shows, resolved and computed. Built per print
/// attempt and discarded afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptPayload {
    pub store_name: String,
    pub staff_name: String,
    pub line_items: Vec<LineItem>,
    /// Cash tendered, in minor currency units.
    pub deposit: i64,
    /// Total owed, in minor currency units.
    pub total: i64,
    /// Change returned, in minor currency units.
    pub change: i64,
    /// Fresh identifier stamped on this receipt.
    pub slip_number: String,
    pub printed_at: DateTime<Utc>,
}

/// Builds the receipt payload for one sale.
///
/// Pure aside from the two read-only Directory lookups; totals come
/// from the calculator, the slip number and timestamp are stamped
/// fresh.
pub async fn format<D>(
    store_id: i64,
    line_items: &[LineItem],
    staff_barcode: &str,
    deposit: Money,
    directory: &D,
) -> ReceiptPayload
where
    D: Directory + ?Sized,
{
    let store_name = match directory.store_by_id(store_id).await {
        Some(store) => store.name,
        None => UNKNOWN_STORE.to_string(),
    };
    let staff_name = match directory.staff_by_barcode(staff_barcode).await {
        Some(staff) => staff.name,
        None => UNKNOWN_STAFF.to_string(),
    };

    let total = calculator::total_amount(line_items);
    let change = calculator::change(total, deposit);

    ReceiptPayload {
        store_name,
        staff_name,
        line_items: line_items.to_vec(),
        deposit: deposit.minor(),
        total: total.minor(),
        change: change.minor(),
        slip_number: Uuid::new_v4().to_string(),
        printed_at: Utc::now(),
    }
}

// =============================================================================
// Text Rendering
// =============================================================================

/// Renders the payload as receipt text, one scanned unit per line.
pub fn render(payload: &ReceiptPayload) -> String {
    let mut out = String::new();

    out.push_str(&separator('='));
    out.push_str(&center(&payload.store_name));
    out.push_str(&separator('='));
    out.push_str(&format!("Staff: {}\n", payload.staff_name));
    out.push_str(&separator('-'));

    for item in &payload.line_items {
        out.push_str(&amount_line(&item.name, item.price()));
    }

    out.push_str(&separator('='));
    out.push_str(&amount_line("TOTAL", Money::from_minor(payload.total)));
    out.push_str(&amount_line("DEPOSIT", Money::from_minor(payload.deposit)));
    out.push_str(&amount_line("CHANGE", Money::from_minor(payload.change)));
    out.push_str(&separator('-'));

    out.push_str(&format!("Slip: {}\n", payload.slip_number));
    out.push_str(&format!("{}\n", payload.printed_at.format("%Y-%m-%d %H:%M UTC")));
    out.push_str(&center("Thank you for coming!"));

    // Feed past the tear bar.
    out.push_str("\n\n\n\n");
    out
}

fn separator(ch: char) -> String {
    let mut line: String = std::iter::repeat(ch).take(RECEIPT_WIDTH).collect();
    line.push('\n');
    line
}

fn center(text: &str) -> String {
    let len = text.chars().count();
    if len >= RECEIPT_WIDTH {
        return format!("{text}\n");
    }
    let pad = (RECEIPT_WIDTH - len) / 2;
    format!("{}{}\n", " ".repeat(pad), text)
}

/// One `label ....... amount` line, amount right-aligned. Long labels
/// are truncated on a character boundary so multibyte names never split.
fn amount_line(label: &str, amount: Money) -> String {
    let amount = amount.to_string();
    let max_label = RECEIPT_WIDTH.saturating_sub(amount.chars().count() + 1);
    let label: String = label.chars().take(max_label).collect();

    let pad = RECEIPT_WIDTH
        .saturating_sub(label.chars().count())
        .saturating_sub(amount.chars().count());
    format!("{}{}{}\n", label, " ".repeat(pad), amount)
}

// =============================================================================
// Unit Tests
// =============================================================================
