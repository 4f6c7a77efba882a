//! Handlers for link management endpoints (list, fetch, create, delete).

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, DeleteLinkResponse, LinkResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Lists all links, newest first.
///
/// # Endpoint
///
/// `GET /api/links`
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.list_links().await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "longUrl": "https://example.com",
///   "customCode": "promo25"   // optional, 6-8 alphanumeric characters
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for a malformed body, URL, or code.
/// Returns 409 Conflict if the code already exists.
pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let link = state
        .link_service
        .create_link(payload.long_url, payload.custom_code)
        .await?;

    tracing::info!(code = %link.code, "Link created");

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Fetches a single link with its click counters.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown.
pub async fn get_link_handler(
    code: Result<Path<String>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let Path(code) = code?;
    let link = state.link_service.get_link_by_code(&code).await?;

    Ok(Json(link.into()))
}

/// Permanently deletes a link.
///
/// # Endpoint
///
/// `DELETE /api/links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown or was already deleted.
pub async fn delete_link_handler(
    code: Result<Path<String>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Json<DeleteLinkResponse>, AppError> {
    let Path(code) = code?;
    state.link_service.delete_link(&code).await?;

    tracing::info!(code = %code, "Link deleted");

    Ok(Json(DeleteLinkResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use crate::domain::entities::Link;
    use crate::domain::repositories::MockLinkRepository;
    use crate::error::AppError;
    use crate::routes::router;
    use crate::state::test_state;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::{Duration, Utc};
    use serde_json::{Value, json};

    fn make_server(repo: MockLinkRepository) -> TestServer {
        let (state, _rx) = test_state(repo, 10);
        TestServer::new(router(state)).unwrap()
    }

    fn stored(id: i64, code: &str, url: &str) -> Link {
        Link::new(id, code.to_string(), url.to_string(), Utc::now(), 0, None)
    }

    // ─── POST ─────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_create_link_generated_code() {
        let mut repo = MockLinkRepository::new();
        repo.expect_create()
            .times(1)
            .returning(|new_link| Ok(stored(1, &new_link.code, &new_link.long_url)));

        let response = make_server(repo)
            .post("/api/links")
            .json(&json!({ "longUrl": "https://example.com" }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body = response.json::<Value>();
        assert_eq!(body["long_url"], "https://example.com");
        assert_eq!(body["code"].as_str().unwrap().len(), 6);
        assert_eq!(body["total_clicks"], 0);
        assert!(body["last_clicked"].is_null());
    }

    #[tokio::test]
    async fn test_create_link_custom_code() {
        let mut repo = MockLinkRepository::new();
        repo.expect_create()
            .withf(|new_link| new_link.code == "Promo25")
            .times(1)
            .returning(|new_link| Ok(stored(1, &new_link.code, &new_link.long_url)));

        let response = make_server(repo)
            .post("/api/links")
            .json(&json!({ "longUrl": "https://example.com", "customCode": "Promo25" }))
            .await;

        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<Value>()["code"], "Promo25");
    }

    #[tokio::test]
    async fn test_create_link_duplicate_code() {
        let mut repo = MockLinkRepository::new();
        repo.expect_create().times(1).returning(|_| {
            Err(AppError::conflict(
                "Code already exists",
                json!({ "constraint": "links_code_key" }),
            ))
        });

        let response = make_server(repo)
            .post("/api/links")
            .json(&json!({ "longUrl": "https://example.com", "customCode": "taken12" }))
            .await;

        response.assert_status(StatusCode::CONFLICT);
        assert_eq!(response.json::<Value>()["error"]["code"], "conflict");
    }

    #[tokio::test]
    async fn test_create_link_invalid_url() {
        let mut repo = MockLinkRepository::new();
        repo.expect_create().times(0);

        let response = make_server(repo)
            .post("/api/links")
            .json(&json!({ "longUrl": "not a url" }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn test_create_link_rejects_non_http_scheme() {
        let mut repo = MockLinkRepository::new();
        repo.expect_create().times(0);

        make_server(repo)
            .post("/api/links")
            .json(&json!({ "longUrl": "javascript:alert(1)" }))
            .await
            .assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_create_link_invalid_custom_code() {
        let mut repo = MockLinkRepository::new();
        repo.expect_create().times(0);
        let server = make_server(repo);

        for code in ["abc", "abcdefghi", "ab-cd-ef", "health"] {
            server
                .post("/api/links")
                .json(&json!({ "longUrl": "https://example.com", "customCode": code }))
                .await
                .assert_status_bad_request();
        }
    }

    #[tokio::test]
    async fn test_create_link_null_custom_code() {
        let mut repo = MockLinkRepository::new();
        repo.expect_create().times(0);

        let response = make_server(repo)
            .post("/api/links")
            .json(&json!({ "longUrl": "https://example.com", "customCode": null }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn test_create_link_missing_long_url() {
        let mut repo = MockLinkRepository::new();
        repo.expect_create().times(0);

        let response = make_server(repo)
            .post("/api/links")
            .json(&json!({ "url": "https://example.com" }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
    }

    // ─── GET ──────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_list_links() {
        let mut repo = MockLinkRepository::new();
        repo.expect_list_all().times(1).returning(|| {
            let newer = stored(2, "newer12", "https://b.example.com");
            let mut older = stored(1, "older12", "https://a.example.com");
            older.created_at = Utc::now() - Duration::hours(1);
            Ok(vec![newer, older])
        });

        let response = make_server(repo).get("/api/links").await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["code"], "newer12");
        assert_eq!(items[1]["code"], "older12");
    }

    #[tokio::test]
    async fn test_list_links_empty() {
        let mut repo = MockLinkRepository::new();
        repo.expect_list_all().times(1).returning(|| Ok(vec![]));

        let response = make_server(repo).get("/api/links").await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), json!([]));
    }

    #[tokio::test]
    async fn test_get_link() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_code()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(|code| {
                let mut link = stored(5, code, "https://example.com");
                link.total_clicks = 3;
                link.last_clicked = Some(Utc::now());
                Ok(Some(link))
            });

        let response = make_server(repo).get("/api/links/abc123").await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["id"], 5);
        assert_eq!(body["total_clicks"], 3);
        assert!(body["last_clicked"].is_string());
    }

    #[tokio::test]
    async fn test_get_link_not_found() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_code().times(1).returning(|_| Ok(None));

        make_server(repo)
            .get("/api/links/missing")
            .await
            .assert_status_not_found();
    }

    // ─── DELETE ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_delete_link_success() {
        let mut repo = MockLinkRepository::new();
        repo.expect_delete()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(|_| Ok(true));

        let response = make_server(repo).delete("/api/links/abc123").await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), json!({ "success": true }));
    }

    #[tokio::test]
    async fn test_delete_link_not_found() {
        let mut repo = MockLinkRepository::new();
        repo.expect_delete().times(1).returning(|_| Ok(false));

        make_server(repo)
            .delete("/api/links/abc123")
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_list_links_storage_error() {
        let mut repo = MockLinkRepository::new();
        repo.expect_list_all()
            .returning(|| Err(AppError::internal("Database error: boom", json!({}))));

        let response = make_server(repo).get("/api/links").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.json::<Value>()["error"]["code"], "internal_error");
    }
}
