//! REST endpoint handlers organized by resource.

pub mod time;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes at the root.
pub fn routes() -> Router<AppState> {
    time::routes()
}
