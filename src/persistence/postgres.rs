//! PostgreSQL implementation of the persistence layer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::TimeRecordStore;
use crate::config::ServiceConfig;
use crate::error::ServiceError;

/// PostgreSQL-backed time log using `sqlx::PgPool`.
///
/// The pool is the single shared database handle for the process; cloning
/// the store clones the handle, not the connections.
#[derive(Debug, Clone)]
pub struct PostgresTimeLog {
    pool: PgPool,
}

impl PostgresTimeLog {
    /// Creates a new store over the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool from the service configuration.
    ///
    /// Connects eagerly so that an unreachable database is reported
    /// before the server starts listening.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] if the connection options are invalid or
    /// the first connection cannot be established.
    pub async fn connect(config: &ServiceConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(config.connect_timeout())
            .connect_with(config.connect_options()?)
            .await?;
        Ok(Self::new(pool))
    }

    /// Applies the bundled migrations in `migrations/`.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::migrate::MigrateError`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

#[async_trait]
impl TimeRecordStore for PostgresTimeLog {
    async fn record_timestamp(&self, instant: DateTime<Utc>) -> Result<(), ServiceError> {
        sqlx::query(r#"INSERT INTO time_log ("timestamp") VALUES ($1)"#)
            .bind(instant)
            .execute(&self.pool)
            .await
            .map_err(|e| ServiceError::Write(e.to_string()))?;

        Ok(())
    }

    async fn count(&self) -> Result<i64, ServiceError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM time_log")
            .fetch_one(&self.pool)
            .await
            .map_err(read_error)
    }

    async fn list_timestamps(&self) -> Result<Vec<DateTime<Utc>>, ServiceError> {
        sqlx::query_scalar::<_, DateTime<Utc>>(
            r#"SELECT "timestamp" FROM time_log ORDER BY "timestamp" DESC"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(read_error)
    }
}

/// Decode failures mean a stored value is malformed; everything else is a
/// query fault.
fn read_error(e: sqlx::Error) -> ServiceError {
    match e {
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            ServiceError::Parse(e.to_string())
        }
        other => ServiceError::Query(other.to_string()),
    }
}
