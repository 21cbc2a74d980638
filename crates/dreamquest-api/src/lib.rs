//! DreamQuest API: HTTP surface and process wiring.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;

use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::CorsOrigins;
use crate::error::AppError;
use crate::state::AppState;

/// Builds the application router with every route and request tracing.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::jobs::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Builds the CORS layer for the configured origins.
///
/// # Errors
///
/// Returns `AppError::Config` if an origin is not a valid header value.
pub fn cors_layer(origins: &CorsOrigins) -> Result<CorsLayer, AppError> {
    let origins = match origins {
        CorsOrigins::Any => return Ok(CorsLayer::permissive()),
        CorsOrigins::List(origins) => origins,
    };

    let origins = origins
        .iter()
        .map(|origin| {
            origin.parse::<HeaderValue>().map_err(|e| {
                AppError::Config(format!("invalid CORS origin '{origin}': {e}"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]))
}
