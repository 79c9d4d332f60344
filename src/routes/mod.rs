//! Router assembly.

mod college;
mod common;

pub use college::college_routes;
pub use common::common_routes;

use crate::config::AppConfig;
use crate::openapi::openapi_routes;
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, Router};
use tower_http::trace::TraceLayer;

/// Full application router: common probes, the college resource, and its OpenAPI document.
/// Oversized bodies surface as a body rejection inside the handler, which answers
/// with its failure envelope.
pub fn app(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(college_routes(state, &config.colleges_path()))
        .merge(openapi_routes(&config.api_version))
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(TraceLayer::new_for_http())
}
