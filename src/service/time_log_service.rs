//! Time log service: records the current instant and replays history.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::clock::ZonedClock;
use crate::error::ServiceError;
use crate::persistence::TimeRecordStore;

/// Result of reading the log.
///
/// The empty case is kept distinct so the API can answer with a message
/// object instead of an empty array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum History {
    /// No instant has been recorded yet.
    Empty,
    /// Formatted instants, most recent first.
    Entries(Vec<String>),
}

/// Orchestration layer for both endpoints.
///
/// Stateless coordinator: owns the shared [`TimeRecordStore`] and the
/// [`ZonedClock`]. Holds no locks of its own.
#[derive(Debug, Clone)]
pub struct TimeLogService {
    store: Arc<dyn TimeRecordStore>,
    clock: ZonedClock,
}

impl TimeLogService {
    /// Creates a new `TimeLogService`.
    #[must_use]
    pub fn new(store: Arc<dyn TimeRecordStore>, clock: ZonedClock) -> Self {
        Self { store, clock }
    }

    /// Returns the inner store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn TimeRecordStore> {
        &self.store
    }

    /// Stores the current instant and returns it formatted.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::TimeZoneResolution`] if the zone cannot be
    /// loaded (nothing is stored in that case), or [`ServiceError::Write`]
    /// if the insert fails.
    pub async fn record_current_time(&self) -> Result<String, ServiceError> {
        let now = self.clock.now()?;
        let zone = now.timezone();
        let instant = now.with_timezone(&Utc);

        self.store.record_timestamp(instant).await?;
        tracing::info!(%instant, zone = self.clock.zone_name(), "stored current time");

        Ok(self.clock.format(instant, zone))
    }

    /// Reads every recorded instant, formatted, most recent first.
    ///
    /// Counts first and skips the full listing when the log is empty.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Query`] on a storage fault,
    /// [`ServiceError::Parse`] if a stored value is malformed, or
    /// [`ServiceError::TimeZoneResolution`] if the zone cannot be loaded.
    pub async fn history(&self) -> Result<History, ServiceError> {
        let count = self.store.count().await?;
        tracing::debug!(count, "time log size");
        if count == 0 {
            return Ok(History::Empty);
        }

        let zone = self.clock.zone()?;
        let timestamps = self.store.list_timestamps().await?;
        Ok(History::Entries(
            timestamps
                .into_iter()
                .map(|instant| self.clock.format(instant, zone))
                .collect(),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::clock::{DEFAULT_TIME_ZONE, FixedClock};
    use crate::persistence::MemoryTimeLog;
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Store whose every operation fails, counting calls.
    #[derive(Debug, Default)]
    pub(crate) struct UnreachableStore {
        pub(crate) calls: AtomicUsize,
    }

    #[async_trait]
    impl TimeRecordStore for UnreachableStore {
        async fn record_timestamp(&self, _instant: DateTime<Utc>) -> Result<(), ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ServiceError::Write("connection refused".into()))
        }

        async fn count(&self) -> Result<i64, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ServiceError::Query("connection refused".into()))
        }

        async fn list_timestamps(&self) -> Result<Vec<DateTime<Utc>>, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ServiceError::Query("connection refused".into()))
        }
    }

    /// Store that counts fine but holds a value it cannot decode.
    #[derive(Debug)]
    pub(crate) struct CorruptStore;

    #[async_trait]
    impl TimeRecordStore for CorruptStore {
        async fn record_timestamp(&self, _instant: DateTime<Utc>) -> Result<(), ServiceError> {
            Ok(())
        }

        async fn count(&self) -> Result<i64, ServiceError> {
            Ok(1)
        }

        async fn list_timestamps(&self) -> Result<Vec<DateTime<Utc>>, ServiceError> {
            Err(ServiceError::Parse("0000-13-45".into()))
        }
    }

    /// Store whose count succeeds but whose listing query fails.
    #[derive(Debug)]
    pub(crate) struct ListFailsStore;

    #[async_trait]
    impl TimeRecordStore for ListFailsStore {
        async fn record_timestamp(&self, _instant: DateTime<Utc>) -> Result<(), ServiceError> {
            Ok(())
        }

        async fn count(&self) -> Result<i64, ServiceError> {
            Ok(2)
        }

        async fn list_timestamps(&self) -> Result<Vec<DateTime<Utc>>, ServiceError> {
            Err(ServiceError::Query("connection reset by peer".into()))
        }
    }

    pub(crate) fn june_first() -> DateTime<Utc> {
        let Some(instant) = Utc.with_ymd_and_hms(2024, 6, 1, 18, 30, 0).single() else {
            panic!("valid instant");
        };
        instant
    }

    fn service_at(store: Arc<dyn TimeRecordStore>, instant: DateTime<Utc>) -> TimeLogService {
        TimeLogService::new(
            store,
            ZonedClock::new(Arc::new(FixedClock(instant)), DEFAULT_TIME_ZONE),
        )
    }

    #[tokio::test]
    async fn record_returns_formatted_time_and_stores_one_row() {
        let service = service_at(Arc::new(MemoryTimeLog::new()), june_first());

        let Ok(formatted) = service.record_current_time().await else {
            panic!("record failed");
        };
        assert_eq!(formatted, "2024-06-01 14:30:00 EDT (Toronto Time)");
        assert_eq!(service.store().count().await.ok(), Some(1));
    }

    #[tokio::test]
    async fn empty_history_is_distinct() {
        let service = service_at(Arc::new(MemoryTimeLog::new()), june_first());
        assert_eq!(service.history().await.ok(), Some(History::Empty));
    }

    #[tokio::test]
    async fn history_is_most_recent_first() {
        let store: Arc<dyn TimeRecordStore> = Arc::new(MemoryTimeLog::new());
        let t1 = june_first();
        for offset in [0, 60, 120] {
            let service = service_at(Arc::clone(&store), t1 + chrono::Duration::seconds(offset));
            assert!(service.record_current_time().await.is_ok());
        }

        let service = service_at(store, t1);
        let Ok(History::Entries(entries)) = service.history().await else {
            panic!("expected entries");
        };
        assert_eq!(
            entries,
            vec![
                "2024-06-01 14:32:00 EDT (Toronto Time)".to_string(),
                "2024-06-01 14:31:00 EDT (Toronto Time)".to_string(),
                "2024-06-01 14:30:00 EDT (Toronto Time)".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn history_is_repeatable() {
        let store = Arc::new(MemoryTimeLog::new());
        let service = service_at(store, june_first());
        assert!(service.record_current_time().await.is_ok());

        let first = service.history().await.ok();
        let second = service.history().await.ok();
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn unknown_zone_stores_nothing() {
        let service = TimeLogService::new(
            Arc::new(MemoryTimeLog::new()),
            ZonedClock::new(Arc::new(FixedClock(june_first())), "Nowhere/Atlantis"),
        );

        let result = service.record_current_time().await;
        assert!(matches!(result, Err(ServiceError::TimeZoneResolution(_))));
        assert_eq!(service.store().count().await.ok(), Some(0));
    }

    #[tokio::test]
    async fn storage_faults_surface_once() {
        let store = Arc::new(UnreachableStore::default());
        let shared: Arc<UnreachableStore> = Arc::clone(&store);
        let service = service_at(shared, june_first());

        let write = service.record_current_time().await;
        assert!(matches!(write, Err(ServiceError::Write(_))));
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);

        let read = service.history().await;
        assert!(matches!(read, Err(ServiceError::Query(_))));
        assert_eq!(store.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn listing_failure_after_nonzero_count_is_query_error() {
        let service = service_at(Arc::new(ListFailsStore), june_first());
        let result = service.history().await;
        assert!(matches!(result, Err(ServiceError::Query(_))));
    }

    #[tokio::test]
    async fn corrupt_rows_are_parse_errors() {
        let service = service_at(Arc::new(CorruptStore), june_first());
        let result = service.history().await;
        assert!(matches!(result, Err(ServiceError::Parse(_))));
    }
}
