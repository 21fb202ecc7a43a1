//! # Transaction Orchestrator
//!
//! Sequences the sale pipeline into one terminal result.
//!
//! ## State Machine
//! ```text
//! Received ──parse/validate──► Validated ──persist──► Persisted
//!     │                            │                      │
//!     │ bad token /                │ storage              │
//!     │ violated rule              │ failure              ▼
//!     ▼                            ▼                   Success
//! ValidationError            ProcessingError
//! ```
//!
//! Every call terminates in exactly one arm of `TransactionResult`;
//! expected business failures never surface as errors or panics.
//! Validation failures return before any write, so no compensation is
//! ever needed; persistence failures roll back inside the repository's
//! transaction, so a sale header can never outlive its details.

use tracing::{error, info, warn};

use crate::parser;
use kidspos_core::{
    calculator, validation, Catalog, Directory, Money, TransactionResult, ValidationError,
};
use kidspos_db::SaleRepository;

/// Message returned for any storage failure; internals go to the log,
/// not to the cashier.
const PROCESSING_ERROR_MESSAGE: &str = "failed to record the sale; please try again";

/// The single entry point external callers use to record a sale.
pub struct CheckoutService<C, D> {
    catalog: C,
    directory: D,
    sales: SaleRepository,
}

impl<C, D> CheckoutService<C, D>
where
    C: Catalog,
    D: Directory,
{
    /// Creates a checkout service over the given collaborators.
    pub fn new(catalog: C, directory: D, sales: SaleRepository) -> Self {
        CheckoutService {
            catalog,
            directory,
            sales,
        }
    }

    /// Processes one sale request end to end.
    ///
    /// ## Arguments
    /// * `store_id` - the selling store
    /// * `staff_barcode` - scanned staff badge
    /// * `item_identifiers` - comma-separated item ids/barcodes
    /// * `deposit` - cash tendered, in minor currency units
    pub async fn process_sale(
        &self,
        store_id: i64,
        staff_barcode: &str,
        item_identifiers: &str,
        deposit: i64,
    ) -> TransactionResult {
        // Received -> Validated. Parsing and rule checks fail fast, in
        // order, before anything is written.
        let line_items = match parser::parse(item_identifiers, &self.catalog).await {
            Ok(items) => items,
            Err(e) => return Self::validation_failure(e.to_string()),
        };

        if let Err(e) = validation::validate_store_id(store_id) {
            return Self::validation_failure(e.to_string());
        }

        if let Err(e) = validation::validate_staff_barcode(staff_barcode) {
            return Self::validation_failure(e.to_string());
        }
        let staff = match self.directory.staff_by_barcode(staff_barcode).await {
            Some(staff) => staff,
            None => {
                let e = ValidationError::UnknownStaff {
                    barcode: staff_barcode.to_string(),
                };
                return Self::validation_failure(e.to_string());
            }
        };

        if let Err(e) = validation::validate_line_items(&line_items) {
            return Self::validation_failure(e.to_string());
        }

        let deposit = Money::from_minor(deposit);
        let total = calculator::total_amount(&line_items);
        if let Err(e) = validation::validate_deposit(deposit, total) {
            return Self::validation_failure(e.to_string());
        }

        // Validated -> Persisted. One transaction writes the header and
        // all detail rows.
        let (sale, details) = match self
            .sales
            .persist(store_id, staff.id, deposit, &line_items)
            .await
        {
            Ok(persisted) => persisted,
            Err(e) => {
                error!(store_id, error = %e, "Sale persistence failed");
                return TransactionResult::ProcessingError {
                    message: PROCESSING_ERROR_MESSAGE.to_string(),
                };
            }
        };

        // Persisted -> Success.
        let summary = calculator::summarize(&line_items, deposit);

        info!(
            sale_id = sale.id,
            store_id,
            staff_id = staff.id,
            amount = sale.amount,
            change = sale.change_amount,
            details = details.len(),
            "Sale recorded"
        );

        TransactionResult::Success { sale, summary }
    }

    /// Secondary status check: does this store have a printer address?
    ///
    /// Print failures never surface through `process_sale`; this is how
    /// a caller finds out receipts cannot print at all.
    pub async fn is_printer_configured(&self, store_id: i64) -> bool {
        match self.directory.store_by_id(store_id).await {
            Some(store) => store.printer_endpoint().is_some(),
            None => false,
        }
    }

    fn validation_failure(message: String) -> TransactionResult {
        warn!(%message, "Sale request rejected");
        TransactionResult::ValidationError { message }
    }
}
