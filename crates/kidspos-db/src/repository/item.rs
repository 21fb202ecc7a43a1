//! # Item Repository
//!
//! Item master data lookups, read-through cached. This is the
//! `Catalog` implementation the sale pipeline consumes.

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::cache::BoundedCache;
use crate::error::DbResult;
use kidspos_core::{Catalog, Item};

/// Repository for item master data.
#[derive(Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
    by_id: Arc<BoundedCache<i64, Item>>,
    by_barcode: Arc<BoundedCache<String, Item>>,
}

impl ItemRepository {
    /// Creates a new ItemRepository sharing the database-wide caches.
    pub fn new(
        pool: SqlitePool,
        by_id: Arc<BoundedCache<i64, Item>>,
        by_barcode: Arc<BoundedCache<String, Item>>,
    ) -> Self {
        ItemRepository {
            pool,
            by_id,
            by_barcode,
        }
    }

    /// Inserts an item row.
    pub async fn insert(&self, item: &Item) -> DbResult<()> {
        debug!(id = item.id, barcode = %item.barcode, "Inserting item");

        sqlx::query("INSERT INTO items (id, barcode, name, price) VALUES (?1, ?2, ?3, ?4)")
            .bind(item.id)
            .bind(&item.barcode)
            .bind(&item.name)
            .bind(item.price)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Fetches an item by id, bypassing the cache.
    pub async fn find_by_id(&self, id: i64) -> DbResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            "SELECT id, barcode, name, price FROM items WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Fetches an item by barcode, bypassing the cache.
    pub async fn find_by_barcode(&self, barcode: &str) -> DbResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            "SELECT id, barcode, name, price FROM items WHERE barcode = ?1",
        )
        .bind(barcode)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    fn remember(&self, item: &Item) {
        self.by_id.insert(item.id, item.clone());
        self.by_barcode.insert(item.barcode.clone(), item.clone());
    }
}

#[async_trait]
impl Catalog for ItemRepository {
    async fn resolve_by_id(&self, id: i64) -> Option<Item> {
        if let Some(item) = self.by_id.get(&id) {
            return Some(item);
        }

        match self.find_by_id(id).await {
            Ok(Some(item)) => {
                self.remember(&item);
                Some(item)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(id, error = %e, "Item lookup failed");
                None
            }
        }
    }

    async fn resolve_by_barcode(&self, barcode: &str) -> Option<Item> {
        if let Some(item) = self.by_barcode.get(&barcode.to_string()) {
            return Some(item);
        }

        match self.find_by_barcode(barcode).await {
            Ok(Some(item)) => {
                self.remember(&item);
                Some(item)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(barcode, error = %e, "Item lookup failed");
                None
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use kidspos_core::{Catalog, Item};

    fn item(id: i64, price: i64) -> Item {
        Item {
            id,
            barcode: format!("49{id:011}"),
            name: format!("item-{id}"),
            price,
        }
    }

    #[tokio::test]
    async fn test_insert_and_resolve() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.items();

        repo.insert(&item(1, 100)).await.unwrap();

        let by_id = repo.resolve_by_id(1).await.unwrap();
        assert_eq!(by_id.price, 100);

        let by_barcode = repo.resolve_by_barcode(&by_id.barcode).await.unwrap();
        assert_eq!(by_barcode.id, 1);
    }

    #[tokio::test]
    async fn test_resolve_unknown_is_none() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.items();

        assert!(repo.resolve_by_id(99999).await.is_none());
        assert!(repo.resolve_by_barcode("no-such-code").await.is_none());
    }

    #[tokio::test]
    async fn test_resolve_hits_cache_after_first_lookup() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.items();

        repo.insert(&item(7, 150)).await.unwrap();
        assert!(repo.resolve_by_id(7).await.is_some());

        // Remove the row underneath the cache; the cached entry answers.
        sqlx::query("DELETE FROM items WHERE id = 7")
            .execute(db.pool())
            .await
            .unwrap();

        assert!(repo.resolve_by_id(7).await.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_barcode_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.items();

        repo.insert(&item(1, 100)).await.unwrap();
        let mut dupe = item(2, 200);
        dupe.barcode = item(1, 100).barcode;

        assert!(repo.insert(&dupe).await.is_err());
    }
}
