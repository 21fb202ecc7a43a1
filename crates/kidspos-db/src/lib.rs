//! # kidspos-db: Database Layer for KidsPOS
//!
//! SQLite persistence for the sale pipeline, plus the concrete
//! `Catalog` / `Directory` implementations the pipeline consumes.
//!
//! ## Architecture Position
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │                         KidsPOS Data Flow                          │
//! │                                                                    │
//! │  kidspos-checkout (process_sale)                                   │
//! │       │                                                            │
//! │       ▼                                                            │
//! │  ┌──────────────────────────────────────────────────────────────┐  │
//! │  │                   kidspos-db (THIS CRATE)                    │  │
//! │  │                                                              │  │
//! │  │  ┌──────────┐  ┌──────────────┐  ┌──────────┐  ┌──────────┐  │  │
//! │  │  │ Database │  │ Repositories │  │ Sequence │  │  Cache   │  │  │
//! │  │  │ (pool)   │◄─│ item / dir / │  │ MAX(id)  │  │ bounded  │  │  │
//! │  │  │ WAL mode │  │ sale         │  │ + mutex  │  │ LRU      │  │  │
//! │  │  └──────────┘  └──────────────┘  └──────────┘  └──────────┘  │  │
//! │  └──────────────────────────────────────────────────────────────┘  │
//! │       │                                                            │
//! │       ▼                                                            │
//! │  SQLite database (embedded migrations)                             │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and the `Database` handle
//! - [`migrations`] - Embedded database migrations
//! - [`sequence`] - Atomic id assignment for sales and details
//! - [`cache`] - Bounded LRU cache behind the lookup traits
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cache;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod sequence;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::directory::DirectoryRepository;
pub use repository::item::ItemRepository;
pub use repository::sale::SaleRepository;
