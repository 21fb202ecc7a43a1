//! # Collaborator Lookup Traits
//!
//! The pipeline consumes item and store/staff master data through these
//! traits and never sees a concrete store. kidspos-db provides the
//! SQLite-backed implementations; tests supply in-memory stubs.
//!
//! A lookup miss is an `Option::None`, never an error: absence is a
//! business condition the caller classifies (unknown item, unknown
//! staff), not an infrastructure failure.

use async_trait::async_trait;

use crate::types::{Item, StaffInfo, StoreInfo};

/// Item master data: id/barcode -> name/price.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Resolves an item by its numeric id.
    async fn resolve_by_id(&self, id: i64) -> Option<Item>;

    /// Resolves an item by its barcode.
    async fn resolve_by_barcode(&self, barcode: &str) -> Option<Item>;
}

/// Store and staff master data: store id -> name/printer address,
/// staff barcode -> identity.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Resolves a store by id.
    async fn store_by_id(&self, id: i64) -> Option<StoreInfo>;

    /// Resolves a staff member by barcode.
    async fn staff_by_barcode(&self, barcode: &str) -> Option<StaffInfo>;
}
