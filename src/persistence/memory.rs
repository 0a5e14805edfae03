//! In-process time log used when persistence is disabled.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::TimeRecordStore;
use crate::error::ServiceError;

/// Append-only log held in memory behind a [`RwLock`].
///
/// Contents are lost on restart. Never fails.
#[derive(Debug, Default)]
pub struct MemoryTimeLog {
    records: RwLock<Vec<DateTime<Utc>>>,
}

impl MemoryTimeLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TimeRecordStore for MemoryTimeLog {
    async fn record_timestamp(&self, instant: DateTime<Utc>) -> Result<(), ServiceError> {
        self.records.write().await.push(instant);
        Ok(())
    }

    async fn count(&self) -> Result<i64, ServiceError> {
        let len = self.records.read().await.len();
        i64::try_from(len).map_err(|e| ServiceError::Query(e.to_string()))
    }

    async fn list_timestamps(&self) -> Result<Vec<DateTime<Utc>>, ServiceError> {
        let mut timestamps = self.records.read().await.clone();
        timestamps.sort_by(|a, b| b.cmp(a));
        Ok(timestamps)
    }
}
