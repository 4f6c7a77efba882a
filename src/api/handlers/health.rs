//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected, 42 links" },
///     "click_queue": { "status": "ok", "message": "Capacity: 10000" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let database = check_database(&state).await;
    let click_queue = check_click_queue(&state);

    let all_healthy = database.is_ok() && click_queue.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database,
            click_queue,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks database connectivity by counting links.
async fn check_database(state: &AppState) -> CheckStatus {
    match state.link_service.count_links().await {
        Ok(count) => CheckStatus::ok(format!("Connected, {} links", count)),
        Err(e) => {
            tracing::warn!(error = %e, "Health check: database unavailable");
            CheckStatus::error("Database unavailable")
        }
    }
}

/// Checks if the click tracking queue is operational.
fn check_click_queue(state: &AppState) -> CheckStatus {
    if state.click_sender.is_closed() {
        CheckStatus::error("Click queue is closed")
    } else {
        CheckStatus::ok(format!("Capacity: {}", state.click_sender.capacity()))
    }
}
