//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`      - Short link redirect
//! - `GET  /health`      - Health check: database and click queue
//! - `/api/links*`       - REST API for link management
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes, state, and request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .nest("/api", api::routes::routes())
        .with_state(state)
        .layer(tracing::layer())
}

/// Wraps [`router`] with trailing-slash normalization.
///
/// Normalization must run before routing, so it wraps the whole router
/// instead of being added as a router layer.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
