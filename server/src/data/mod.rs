//! Data storage layer
//!
//! - `sqlite` - Embedded transactional database (default)
//! - `postgres` - Pooled PostgreSQL backend
//! - `sql` - Query builder and dialects shared by both backends
//! - `predicates` - Filter-to-predicate composition for list queries
//! - `types` - Row types shared across backends
//! - `traits` - Repository trait implemented per backend
//! - `error` - Unified error type for all backends

pub mod error;
pub mod postgres;
pub mod predicates;
pub mod sql;
pub mod sqlite;
pub mod traits;
pub mod types;

pub use error::DataError;
pub use postgres::PostgresService;
pub use sqlite::SqliteService;
pub use traits::TransactionalRepository;

use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::core::config::{PostgresConfig, TransactionalBackend};
use crate::core::storage::AppStorage;

/// Transactional database service enum
///
/// Wraps the backend-specific service. Services are stored as Arc so the
/// repository handle can outlive a borrow of the enum.
pub enum TransactionalService {
    /// SQLite backend (default, embedded)
    Sqlite(Arc<SqliteService>),
    /// PostgreSQL backend
    Postgres(Arc<PostgresService>),
}

impl TransactionalService {
    /// Initialize the transactional service based on configuration
    pub async fn init(
        backend: TransactionalBackend,
        storage: &AppStorage,
        postgres_config: Option<&PostgresConfig>,
    ) -> Result<Self, DataError> {
        match backend {
            TransactionalBackend::Sqlite => {
                let service = SqliteService::init(storage).await?;
                Ok(Self::Sqlite(Arc::new(service)))
            }
            TransactionalBackend::Postgres => {
                let config = postgres_config.ok_or_else(|| {
                    DataError::Config("PostgreSQL configuration required".to_string())
                })?;
                let service = PostgresService::init(config).await?;
                Ok(Self::Postgres(Arc::new(service)))
            }
        }
    }

    /// Run a WAL checkpoint (SQLite). PostgreSQL relies on autovacuum.
    pub async fn checkpoint(&self) -> Result<(), DataError> {
        match self {
            Self::Sqlite(s) => s.checkpoint().await.map_err(Into::into),
            Self::Postgres(_) => Ok(()),
        }
    }

    /// Close the database connection gracefully
    pub async fn close(&self) {
        match self {
            Self::Sqlite(s) => s.close().await,
            Self::Postgres(p) => p.close().await,
        }
    }

    /// Start the background maintenance task
    ///
    /// Periodic WAL checkpoints for SQLite, pool health checks for PostgreSQL.
    pub fn start_checkpoint_task(&self, shutdown_rx: watch::Receiver<bool>) -> JoinHandle<()> {
        match self {
            Self::Sqlite(s) => Arc::clone(s).start_checkpoint_task(shutdown_rx),
            Self::Postgres(p) => Arc::clone(p).start_health_check_task(shutdown_rx),
        }
    }

    pub fn backend(&self) -> TransactionalBackend {
        match self {
            Self::Sqlite(_) => TransactionalBackend::Sqlite,
            Self::Postgres(_) => TransactionalBackend::Postgres,
        }
    }

    /// Fresh in-memory SQLite service with migrations applied
    #[cfg(test)]
    pub async fn sqlite_in_memory() -> Result<Self, DataError> {
        let pool = sqlite::SqlitePool::connect(":memory:")
            .await
            .map_err(DataError::Sqlite)?;
        let service = SqliteService::from_pool(pool).await?;
        Ok(Self::Sqlite(Arc::new(service)))
    }

    /// Get the repository trait object for data operations
    pub fn repository(&self) -> Arc<dyn TransactionalRepository> {
        match self {
            Self::Sqlite(s) => Arc::new(Arc::clone(s)),
            Self::Postgres(p) => Arc::new(Arc::clone(p)),
        }
    }
}
