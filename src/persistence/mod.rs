//! Persistence layer: the append-only `time_log` table.
//!
//! [`TimeRecordStore`] is the only way handlers reach storage. The
//! concrete implementations are [`PostgresTimeLog`] over `sqlx::PgPool`
//! and [`MemoryTimeLog`] for running without a database.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::ServiceError;

pub use memory::MemoryTimeLog;
pub use postgres::PostgresTimeLog;

/// Storage for recorded instants.
///
/// Implementations must be safe for concurrent use; each operation is a
/// single statement and ordering between concurrent writers is left to
/// the backing store.
#[async_trait]
pub trait TimeRecordStore: Send + Sync + std::fmt::Debug {
    /// Appends one instant.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Write`] on any storage fault. No retry.
    async fn record_timestamp(&self, instant: DateTime<Utc>) -> Result<(), ServiceError>;

    /// Number of stored instants.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Query`] on any storage fault.
    async fn count(&self) -> Result<i64, ServiceError>;

    /// All stored instants, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Query`] on a storage fault, or
    /// [`ServiceError::Parse`] if a stored value cannot be decoded.
    async fn list_timestamps(&self) -> Result<Vec<DateTime<Utc>>, ServiceError>;
}
