#![allow(dead_code)]

use linkshort::application::services::LinkService;
use linkshort::domain::click_event::ClickEvent;
use linkshort::domain::repositories::LinkRepository;
use linkshort::infrastructure::persistence::PgLinkRepository;
use linkshort::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;

pub async fn create_test_link(pool: &PgPool, code: &str, url: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO links (code, long_url) VALUES ($1, $2) RETURNING id")
        .bind(code)
        .bind(url)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn fetch_clicks(pool: &PgPool, code: &str) -> (i64, Option<chrono::DateTime<chrono::Utc>>) {
    sqlx::query_as("SELECT total_clicks, last_clicked FROM links WHERE code = $1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_repository(pool: PgPool) -> Arc<dyn LinkRepository> {
    Arc::new(PgLinkRepository::new(Arc::new(pool)))
}

pub fn create_test_state(pool: PgPool) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let (tx, rx) = mpsc::channel(100);
    let link_service = Arc::new(LinkService::new(create_repository(pool), 6));

    (AppState::new(link_service, tx), rx)
}
