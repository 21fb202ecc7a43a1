//! # Database Pool Management
//!
//! Connection pool creation and configuration for SQLite.
//!
//! WAL journal mode is enabled so receipt-printing reads never block
//! the sale write path; foreign keys are switched on explicitly because
//! SQLite ships with them off.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::cache::BoundedCache;
use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::directory::DirectoryRepository;
use crate::repository::item::ItemRepository;
use crate::repository::sale::SaleRepository;
use crate::sequence::IdSequence;
use kidspos_core::{Item, StaffInfo, StoreInfo};

/// Capacity of each lookup cache (items, stores, staff).
const LOOKUP_CACHE_CAPACITY: usize = 256;

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/var/lib/kidspos/kidspos.db")
///     .max_connections(5);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    pub min_connections: u32,

    /// Connection acquire timeout.
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    pub idle_timeout: Duration,

    /// Whether to run migrations on connect.
    pub run_migrations: bool,
}

impl DbConfig {
    /// Creates a configuration for the given database path. The file is
    /// created on first connect if it does not exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection acquire timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// In-memory database configuration for tests.
    ///
    /// A single connection keeps the whole test on one in-memory
    /// database instance.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// Cloning is cheap: the pool, the id sequences, and the lookup caches
/// are all shared, so every clone observes the same sequence state.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,

    // Id sequences are process-wide: handing each repository instance
    // its own counter would reintroduce the max+1 read race.
    sale_ids: Arc<IdSequence>,
    detail_ids: Arc<IdSequence>,

    item_by_id: Arc<BoundedCache<i64, Item>>,
    item_by_barcode: Arc<BoundedCache<String, Item>>,
    store_by_id: Arc<BoundedCache<i64, StoreInfo>>,
    staff_by_barcode: Arc<BoundedCache<String, StaffInfo>>,
}

impl Database {
    /// Opens the database, configures SQLite (WAL, NORMAL synchronous,
    /// foreign keys), creates the pool, and runs migrations if enabled.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing database connection"
        );

        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .create_if_missing(true);

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database {
            pool,
            sale_ids: Arc::new(IdSequence::new("sales")),
            detail_ids: Arc::new(IdSequence::new("sale_details")),
            item_by_id: Arc::new(BoundedCache::new(LOOKUP_CACHE_CAPACITY)),
            item_by_barcode: Arc::new(BoundedCache::new(LOOKUP_CACHE_CAPACITY)),
            store_by_id: Arc::new(BoundedCache::new(LOOKUP_CACHE_CAPACITY)),
            staff_by_barcode: Arc::new(BoundedCache::new(LOOKUP_CACHE_CAPACITY)),
        };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Applies all pending migrations. Idempotent.
    pub async fn run_migrations(&self) -> DbResult<()> {
        info!("Running database migrations");
        migrations::run_migrations(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// Returns a reference to the connection pool for queries not
    /// covered by a repository.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the item repository (the Catalog implementation).
    pub fn items(&self) -> ItemRepository {
        ItemRepository::new(
            self.pool.clone(),
            Arc::clone(&self.item_by_id),
            Arc::clone(&self.item_by_barcode),
        )
    }

    /// Returns the store/staff repository (the Directory implementation).
    pub fn directory(&self) -> DirectoryRepository {
        DirectoryRepository::new(
            self.pool.clone(),
            Arc::clone(&self.store_by_id),
            Arc::clone(&self.staff_by_barcode),
        )
    }

    /// Returns the sale repository (the transaction persister).
    pub fn sales(&self) -> SaleRepository {
        SaleRepository::new(
            self.pool.clone(),
            Arc::clone(&self.sale_ids),
            Arc::clone(&self.detail_ids),
        )
    }

    /// Closes the connection pool. Repository calls fail afterwards.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database can execute queries.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.health_check().await);
    }

    #[tokio::test]
    async fn test_clones_share_sequences() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let clone = db.clone();
        assert!(Arc::ptr_eq(&db.sale_ids, &clone.sale_ids));
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/test.db")
            .max_connections(10)
            .min_connections(2);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
    }
}
