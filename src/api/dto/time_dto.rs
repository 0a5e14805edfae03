//! DTOs for the time endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::service::History;

/// Body of `GET /current-time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CurrentTimeResponse {
    /// Recorded instant, e.g. `"2024-06-01 14:30:00 EDT (Toronto Time)"`.
    pub current_time: String,
}

/// Informational body used when there is nothing to list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

/// Body of `GET /request-logs`.
///
/// Serializes as a bare JSON array of strings, or as
/// `{"message": "No time requests recorded yet"}` when the log is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum RequestLogsResponse {
    /// Formatted instants, most recent first.
    Entries(Vec<String>),
    /// Empty log.
    Message(MessageResponse),
}

/// Message returned when the log has no records.
pub const EMPTY_LOG_MESSAGE: &str = "No time requests recorded yet";

impl From<History> for RequestLogsResponse {
    fn from(history: History) -> Self {
        match history {
            History::Empty => Self::Message(MessageResponse {
                message: EMPTY_LOG_MESSAGE.to_string(),
            }),
            History::Entries(entries) => Self::Entries(entries),
        }
    }
}
