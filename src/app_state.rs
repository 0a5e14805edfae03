//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::TimeLogService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Time log service for both endpoints.
    pub time_log: Arc<TimeLogService>,
}

impl AppState {
    /// Wraps a service into handler state.
    #[must_use]
    pub fn new(time_log: TimeLogService) -> Self {
        Self {
            time_log: Arc::new(time_log),
        }
    }
}
