//! Service error types with HTTP status code mapping.
//!
//! [`ServiceError`] is the central error type. Each variant maps to a
//! specific HTTP status code and a structured JSON error response whose
//! message is fixed per variant; the underlying detail only goes to logs.

use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 3002,
///     "message": "Database insert error"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Client-facing error message.
    pub message: String,
}

/// Per-request error enum with HTTP status code mapping.
///
/// None of these variants is fatal to the process.
///
/// | Code | Variant              | HTTP Status                |
/// |------|----------------------|----------------------------|
/// | 1001 | `MethodNotAllowed`   | 405 Method Not Allowed     |
/// | 3001 | `TimeZoneResolution` | 500 Internal Server Error  |
/// | 3002 | `Write`              | 500 Internal Server Error  |
/// | 3003 | `Query`              | 500 Internal Server Error  |
/// | 3004 | `Parse`              | 500 Internal Server Error  |
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The endpoint only answers `GET`.
    #[error("method {0} not allowed")]
    MethodNotAllowed(Method),

    /// The configured time zone could not be loaded.
    #[error("time zone resolution failed: {0}")]
    TimeZoneResolution(String),

    /// Inserting a record failed.
    #[error("database insert failed: {0}")]
    Write(String),

    /// Counting or listing records failed.
    #[error("database query failed: {0}")]
    Query(String),

    /// A stored value could not be turned back into an instant.
    #[error("stored timestamp could not be parsed: {0}")]
    Parse(String),
}

impl ServiceError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::MethodNotAllowed(_) => 1001,
            Self::TimeZoneResolution(_) => 3001,
            Self::Write(_) => 3002,
            Self::Query(_) => 3003,
            Self::Parse(_) => 3004,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::TimeZoneResolution(_) | Self::Write(_) | Self::Query(_) | Self::Parse(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message returned to clients. Never includes driver or zone details.
    #[must_use]
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::MethodNotAllowed(_) => "Only GET method is allowed",
            Self::TimeZoneResolution(_) => "Time zone conversion error",
            Self::Write(_) => "Database insert error",
            Self::Query(_) => "Database query error",
            Self::Parse(_) => "Time parsing error",
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match &self {
            Self::MethodNotAllowed(method) => {
                tracing::warn!(%method, "method not allowed");
            }
            other => tracing::error!(error = %other, "request failed"),
        }

        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.public_message().to_string(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        if matches!(self, Self::MethodNotAllowed(_)) {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static("GET"));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_not_allowed_sets_allow_header() {
        let response = ServiceError::MethodNotAllowed(Method::POST).into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response.headers().get(header::ALLOW),
            Some(&HeaderValue::from_static("GET"))
        );
    }

    #[test]
    fn storage_errors_map_to_500() {
        for error in [
            ServiceError::TimeZoneResolution("x".into()),
            ServiceError::Write("x".into()),
            ServiceError::Query("x".into()),
            ServiceError::Parse("x".into()),
        ] {
            assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
            let response = error.into_response();
            assert!(response.headers().get(header::ALLOW).is_none());
        }
    }

    #[test]
    fn public_message_hides_detail() {
        let error = ServiceError::Write("connection refused (os error 111)".into());
        assert_eq!(error.public_message(), "Database insert error");
        assert!(error.to_string().contains("connection refused"));
    }

    #[test]
    fn response_is_json() {
        let response = ServiceError::Query("timeout".into()).into_response();
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE),
            Some(&HeaderValue::from_static("application/json"))
        );
    }
}
