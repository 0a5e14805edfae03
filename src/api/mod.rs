//! REST API layer: route handlers, DTOs, OpenAPI document, and router
//! composition.

pub mod dto;
pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;
use crate::error::{ErrorBody, ErrorResponse};

/// OpenAPI description of every endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "toronto-time-log", description = "Records request times and replays them in Toronto time."),
    paths(
        handlers::time::current_time,
        handlers::time::request_logs,
    ),
    components(schemas(
        dto::CurrentTimeResponse,
        dto::MessageResponse,
        dto::RequestLogsResponse,
        ErrorResponse,
        ErrorBody,
    )),
    tags(
        (name = "Time", description = "Record and replay request times"),
    )
)]
pub struct ApiDoc;

/// Path the OpenAPI JSON document is served at.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = handlers::routes();

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui").url(OPENAPI_PATH, ApiDoc::openapi()),
    );

    #[cfg(not(feature = "swagger-ui"))]
    let router = router.route(
        OPENAPI_PATH,
        axum::routing::get(|| async { axum::Json(ApiDoc::openapi()) }),
    );

    router
}
