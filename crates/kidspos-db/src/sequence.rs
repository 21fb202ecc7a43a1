//! # Id Sequencing
//!
//! Atomic id assignment for sale and detail rows.
//!
//! The counter is seeded from `MAX(id)` on first use and then advances
//! purely in memory under a mutex, so two concurrent checkouts can
//! never observe the same "max + 1". An empty table seeds the sequence
//! at 1.

use sqlx::SqlitePool;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::DbResult;

/// Mutex-guarded id sequence for one table.
pub struct IdSequence {
    table: &'static str,
    next: Mutex<Option<i64>>,
}

impl IdSequence {
    /// Creates an unseeded sequence for `table`. The table name is a
    /// compile-time constant, never caller input.
    pub fn new(table: &'static str) -> Self {
        IdSequence {
            table,
            next: Mutex::new(None),
        }
    }

    /// Reserves `count` consecutive ids and returns the first.
    ///
    /// Seeds from storage on first call; the lock is held across the
    /// seed query so concurrent callers serialize on initialization.
    pub async fn reserve(&self, pool: &SqlitePool, count: i64) -> DbResult<i64> {
        let mut guard = self.next.lock().await;

        let first = match *guard {
            Some(next) => next,
            None => {
                let query = format!("SELECT MAX(id) FROM {}", self.table);
                let max: Option<i64> = sqlx::query_scalar(&query).fetch_one(pool).await?;
                let seeded = max.unwrap_or(0) + 1;
                debug!(table = self.table, seeded, "Seeded id sequence");
                seeded
            }
        };

        *guard = Some(first + count);
        Ok(first)
    }

    /// Reserves a single id.
    pub async fn next(&self, pool: &SqlitePool) -> DbResult<i64> {
        self.reserve(pool, 1).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
