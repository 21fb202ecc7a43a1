//! # Directory Repository
//!
//! Store and staff master data, read-through cached. This is the
//! `Directory` implementation: store id -> name + printer address,
//! staff barcode -> identity.

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::cache::BoundedCache;
use crate::error::DbResult;
use kidspos_core::{Directory, StaffInfo, StoreInfo};

/// Repository for store/staff master data.
#[derive(Clone)]
pub struct DirectoryRepository {
    pool: SqlitePool,
    stores: Arc<BoundedCache<i64, StoreInfo>>,
    staff: Arc<BoundedCache<String, StaffInfo>>,
}

impl DirectoryRepository {
    /// Creates a new DirectoryRepository sharing the database-wide caches.
    pub fn new(
        pool: SqlitePool,
        stores: Arc<BoundedCache<i64, StoreInfo>>,
        staff: Arc<BoundedCache<String, StaffInfo>>,
    ) -> Self {
        DirectoryRepository {
            pool,
            stores,
            staff,
        }
    }

    /// Inserts a store row.
    pub async fn insert_store(&self, store: &StoreInfo) -> DbResult<()> {
        debug!(id = store.id, name = %store.name, "Inserting store");

        sqlx::query(
            "INSERT INTO stores (id, name, printer_host, printer_port) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(store.id)
        .bind(&store.name)
        .bind(&store.printer_host)
        .bind(store.printer_port)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Inserts a staff row.
    pub async fn insert_staff(&self, staff: &StaffInfo) -> DbResult<()> {
        debug!(id = staff.id, barcode = %staff.barcode, "Inserting staff");

        sqlx::query("INSERT INTO staff (id, name, barcode) VALUES (?1, ?2, ?3)")
            .bind(staff.id)
            .bind(&staff.name)
            .bind(&staff.barcode)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Fetches a store by id, bypassing the cache.
    pub async fn find_store(&self, id: i64) -> DbResult<Option<StoreInfo>> {
        let store = sqlx::query_as::<_, StoreInfo>(
            "SELECT id, name, printer_host, printer_port FROM stores WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(store)
    }

    /// Fetches a staff member by barcode, bypassing the cache.
    pub async fn find_staff(&self, barcode: &str) -> DbResult<Option<StaffInfo>> {
        let staff = sqlx::query_as::<_, StaffInfo>(
            "SELECT id, name, barcode FROM staff WHERE barcode = ?1",
        )
        .bind(barcode)
        .fetch_optional(&self.pool)
        .await?;

        Ok(staff)
    }
}

#[async_trait]
impl Directory for DirectoryRepository {
    async fn store_by_id(&self, id: i64) -> Option<StoreInfo> {
        if let Some(store) = self.stores.get(&id) {
            return Some(store);
        }

        match self.find_store(id).await {
            Ok(Some(store)) => {
                self.stores.insert(id, store.clone());
                Some(store)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(store_id = id, error = %e, "Store lookup failed");
                None
            }
        }
    }

    async fn staff_by_barcode(&self, barcode: &str) -> Option<StaffInfo> {
        if let Some(staff) = self.staff.get(&barcode.to_string()) {
            return Some(staff);
        }

        match self.find_staff(barcode).await {
            Ok(Some(staff)) => {
                self.staff.insert(barcode.to_string(), staff.clone());
                Some(staff)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(barcode, error = %e, "Staff lookup failed");
                None
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
