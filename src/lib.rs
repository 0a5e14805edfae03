//! # toronto-time-log
//!
//! HTTP service that records the time of each `GET /current-time` request
//! in PostgreSQL and replays the history through `GET /request-logs`,
//! rendered in the `America/Toronto` zone.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── TimeLogService (service/)
//!     │
//!     ├── ZonedClock (domain/)
//!     ├── TimeRecordStore (persistence/)
//!     │
//!     └── PostgreSQL `time_log` table
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

/// Builds the full application: every route, request tracing, and state.
pub fn app(state: AppState) -> Router {
    api::build_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
