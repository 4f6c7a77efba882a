//! Handler for short URL redirect.

use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tokio::sync::mpsc::error::TrySendError;
use tracing::warn;
use url::Url;

use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Reject codes that are undecodable or not 6-8 alphanumeric characters (404)
/// 2. Look the code up (404 if unknown)
/// 3. Offer a click event to the background worker without waiting
/// 4. Return 302 Found
///
/// # Click Tracking
///
/// Click events go to a bounded channel. If the queue is full or closed the
/// click is dropped and logged; the visitor is redirected regardless.
pub async fn redirect_handler(
    code: Result<Path<String>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let Path(code) = code?;
    let link = state.link_service.resolve(&code).await?;

    let location = location_header(&link.long_url)?;

    enqueue_click(&state, code);

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// Builds the `Location` value, falling back to the serialized [`Url`] for
/// input a header cannot carry verbatim.
fn location_header(long_url: &str) -> Result<HeaderValue, AppError> {
    if let Ok(value) = HeaderValue::from_str(long_url) {
        return Ok(value);
    }

    Url::parse(long_url)
        .ok()
        .and_then(|url| HeaderValue::from_str(url.as_str()).ok())
        .ok_or_else(|| {
            AppError::internal(
                "Stored URL cannot be used as a Location header",
                json!({ "long_url": long_url }),
            )
        })
}

fn enqueue_click(state: &AppState, code: String) {
    match state.click_sender.try_send(ClickEvent::new(code)) {
        Ok(()) => {}
        Err(TrySendError::Full(event)) => {
            metrics::counter!("clicks_dropped_total").increment(1);
            warn!(code = %event.code, "Click queue full, click dropped");
        }
        Err(TrySendError::Closed(event)) => {
            metrics::counter!("clicks_dropped_total").increment(1);
            warn!(code = %event.code, "Click queue closed, click dropped");
        }
    }
}
