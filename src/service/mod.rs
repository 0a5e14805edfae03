//! Service layer: request-independent orchestration.
//!
//! [`TimeLogService`] composes the zoned clock with the time record store
//! and produces display-ready strings for the handlers.

pub mod time_log_service;

pub use time_log_service::{History, TimeLogService};
