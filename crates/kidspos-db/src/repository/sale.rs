//! # Sale Repository
//!
//! The transaction persister: writes one sale header plus its grouped
//! detail rows in a single database transaction.
//!
//! ## Write Path
//! ```text
//! persist(store_id, staff_id, deposit, line_items)
//!     │
//!     ├── calculator: amount, quantity, change, detail drafts
//!     ├── reserve sale id + detail id block   (mutex-guarded sequence)
//!     │
//!     ├── BEGIN
//!     │     INSERT INTO sales ...
//!     │     INSERT INTO sale_details ...      (one row per distinct item)
//!     └── COMMIT ── both exist, or neither does
//! ```
//!
//! Totals are computed immediately before the write and never read back
//! from storage; a persisted sale is immutable.

use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::DbResult;
use crate::sequence::IdSequence;
use kidspos_core::{calculator, LineItem, Money, Sale, SaleDetail};

/// Repository for sale persistence.
#[derive(Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
    sale_ids: Arc<IdSequence>,
    detail_ids: Arc<IdSequence>,
}

impl SaleRepository {
    /// Creates a new SaleRepository sharing the database-wide sequences.
    pub fn new(pool: SqlitePool, sale_ids: Arc<IdSequence>, detail_ids: Arc<IdSequence>) -> Self {
        SaleRepository {
            pool,
            sale_ids,
            detail_ids,
        }
    }

    /// Persists a sale and its grouped detail rows atomically.
    ///
    /// ## Arguments
    /// * `store_id` - the selling store (validated upstream)
    /// * `staff_id` - the cashier, resolved through the Directory
    /// * `deposit` - cash tendered (validated to cover the total)
    /// * `line_items` - one entry per scanned unit
    ///
    /// ## Returns
    /// The stored sale and its detail rows, exactly as written.
    pub async fn persist(
        &self,
        store_id: i64,
        staff_id: i64,
        deposit: Money,
        line_items: &[LineItem],
    ) -> DbResult<(Sale, Vec<SaleDetail>)> {
        let total = calculator::total_amount(line_items);
        let change = calculator::change(total, deposit);
        let drafts = calculator::detail_drafts(line_items);

        // Ids are reserved before the transaction opens: the in-memory
        // test pool has a single connection, and the seed query must not
        // contend with it.
        let sale_id = self.sale_ids.next(&self.pool).await?;
        let first_detail_id = self.detail_ids.reserve(&self.pool, drafts.len() as i64).await?;

        let sale = Sale {
            id: sale_id,
            store_id,
            staff_id,
            quantity: line_items.len() as i64,
            amount: total.minor(),
            deposit: deposit.minor(),
            change_amount: change.minor(),
            created_at: Utc::now(),
        };

        debug!(sale_id, store_id, staff_id, amount = sale.amount, "Persisting sale");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO sales (id, store_id, staff_id, quantity, amount, deposit, change_amount, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(sale.id)
        .bind(sale.store_id)
        .bind(sale.staff_id)
        .bind(sale.quantity)
        .bind(sale.amount)
        .bind(sale.deposit)
        .bind(sale.change_amount)
        .bind(sale.created_at)
        .execute(&mut *tx)
        .await?;

        let mut details = Vec::with_capacity(drafts.len());
        for (offset, draft) in drafts.into_iter().enumerate() {
            let detail = SaleDetail {
                id: first_detail_id + offset as i64,
                sale_id,
                item_id: draft.item_id,
                price: draft.price,
                quantity: draft.quantity,
            };

            sqlx::query(
                "INSERT INTO sale_details (id, sale_id, item_id, price, quantity)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )
            .bind(detail.id)
            .bind(detail.sale_id)
            .bind(detail.item_id)
            .bind(detail.price)
            .bind(detail.quantity)
            .execute(&mut *tx)
            .await?;

            details.push(detail);
        }

        tx.commit().await?;

        info!(
            sale_id,
            amount = sale.amount,
            quantity = sale.quantity,
            details = details.len(),
            "Sale persisted"
        );

        Ok((sale, details))
    }

    /// Fetches a sale header by id.
    pub async fn find_by_id(&self, id: i64) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            "SELECT id, store_id, staff_id, quantity, amount, deposit, change_amount, created_at
             FROM sales WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Fetches all detail rows for a sale, ordered by item id.
    pub async fn details_for_sale(&self, sale_id: i64) -> DbResult<Vec<SaleDetail>> {
        let details = sqlx::query_as::<_, SaleDetail>(
            "SELECT id, sale_id, item_id, price, quantity
             FROM sale_details WHERE sale_id = ?1 ORDER BY item_id",
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(details)
    }

    /// Counts stored sales.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
