//! Time handlers: record the current time, replay the request log.
//!
//! Both routes are mounted with `any` and check the method themselves, so
//! every non-`GET` method (including `HEAD`) gets a 405 with `Allow: GET`
//! before storage is touched.

use axum::extract::State;
use axum::http::Method;
use axum::response::IntoResponse;
use axum::routing::any;
use axum::{Json, Router};

use crate::api::dto::{CurrentTimeResponse, RequestLogsResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, ServiceError};

/// `GET /current-time` — Record and return the current time.
///
/// Writes a row despite being a `GET`; clients depend on that.
///
/// # Errors
///
/// Returns [`ServiceError::MethodNotAllowed`] for non-`GET` methods,
/// [`ServiceError::TimeZoneResolution`] or [`ServiceError::Write`] on
/// failure.
#[utoipa::path(
    get,
    path = "/current-time",
    tag = "Time",
    summary = "Record the current time",
    description = "Stores the current instant and returns it rendered in the configured zone.",
    responses(
        (status = 200, description = "Time recorded", body = CurrentTimeResponse),
        (status = 405, description = "Method other than GET", body = ErrorResponse),
        (status = 500, description = "Time zone or insert failure", body = ErrorResponse),
    )
)]
pub async fn current_time(
    method: Method,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    require_get(&method)?;
    tracing::info!("current time requested");

    let current_time = state.time_log.record_current_time().await?;
    Ok(Json(CurrentTimeResponse { current_time }))
}

/// `GET /request-logs` — List every recorded time, most recent first.
///
/// # Errors
///
/// Returns [`ServiceError::MethodNotAllowed`] for non-`GET` methods,
/// [`ServiceError::Query`] or [`ServiceError::Parse`] on failure.
#[utoipa::path(
    get,
    path = "/request-logs",
    tag = "Time",
    summary = "List recorded times",
    description = "Returns a JSON array of recorded times, most recent first, or a message object when nothing has been recorded.",
    responses(
        (status = 200, description = "Recorded times or empty-log message", body = RequestLogsResponse),
        (status = 405, description = "Method other than GET", body = ErrorResponse),
        (status = 500, description = "Query or parse failure", body = ErrorResponse),
    )
)]
pub async fn request_logs(
    method: Method,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    require_get(&method)?;
    tracing::info!("request logs requested");

    let history = state.time_log.history().await?;
    Ok(Json(RequestLogsResponse::from(history)))
}

fn require_get(method: &Method) -> Result<(), ServiceError> {
    if method == Method::GET {
        Ok(())
    } else {
        Err(ServiceError::MethodNotAllowed(method.clone()))
    }
}

/// Time routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/current-time", any(current_time))
        .route("/request-logs", any(request_logs))
}
