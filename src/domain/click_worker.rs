//! Background worker applying click increments.
//!
//! The redirect handler pushes [`ClickEvent`]s into a bounded channel and
//! returns immediately. This worker drains the channel, applying at most
//! `concurrency` increments at a time, each retried with jittered
//! exponential backoff. A click that still fails is logged and dropped.
//!
//! Outcomes are counted through the `metrics` facade
//! (`clicks_recorded_total`, `clicks_failed_total`) and reach whichever
//! recorder the process installs.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, info, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkRepository;

/// Retries after the first failed attempt.
const MAX_RETRIES: usize = 3;

/// Runs until every sender is dropped, then waits for in-flight increments.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    repository: Arc<dyn LinkRepository>,
    concurrency: usize,
) {
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();

    while let Some(event) = rx.recv().await {
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };

        let repository = repository.clone();
        tasks.spawn(async move {
            record_click(repository.as_ref(), &event.code).await;
            drop(permit);
        });

        while let Some(joined) = tasks.try_join_next() {
            if let Err(e) = joined {
                warn!(error = %e, "Click task panicked");
            }
        }
    }

    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            warn!(error = %e, "Click task panicked");
        }
    }

    info!("Click worker stopped");
}

/// Applies one increment with retry. Returns whether it eventually succeeded.
async fn record_click(repository: &dyn LinkRepository, code: &str) -> bool {
    let strategy = ExponentialBackoff::from_millis(2)
        .factor(50)
        .max_delay(Duration::from_secs(2))
        .map(jitter)
        .take(MAX_RETRIES);

    match Retry::spawn(strategy, || repository.increment_clicks(code)).await {
        Ok(()) => {
            debug!(code, "Click recorded");
            metrics::counter!("clicks_recorded_total").increment(1);
            true
        }
        Err(e) => {
            error!(code, error = %e, "Failed to record click");
            metrics::counter!("clicks_failed_total").increment(1);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use crate::error::AppError;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_worker_processes_events_and_stops_when_senders_drop() {
        let mut repo = MockLinkRepository::new();
        repo.expect_increment_clicks()
            .withf(|code| code == "abc123")
            .times(3)
            .returning(|_| Ok(()));

        let (tx, rx) = mpsc::channel(16);
        for _ in 0..3 {
            tx.send(ClickEvent::new("abc123")).await.unwrap();
        }
        drop(tx);

        run_click_worker(rx, Arc::new(repo), 2).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_record_click_retries_transient_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in_mock = calls.clone();

        let mut repo = MockLinkRepository::new();
        repo.expect_increment_clicks().returning(move |_| {
            if calls_in_mock.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(AppError::internal("Database error: timeout", json!({})))
            } else {
                Ok(())
            }
        });

        assert!(record_click(&repo, "abc123").await);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_record_click_gives_up_after_retries() {
        let mut repo = MockLinkRepository::new();
        repo.expect_increment_clicks()
            .times(MAX_RETRIES + 1)
            .returning(|_| Err(AppError::internal("Database error: down", json!({}))));

        assert!(!record_click(&repo, "abc123").await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_worker_survives_failures() {
        let mut repo = MockLinkRepository::new();
        repo.expect_increment_clicks()
            .withf(|code| code == "broken1")
            .returning(|_| Err(AppError::internal("Database error: down", json!({}))));
        repo.expect_increment_clicks()
            .withf(|code| code == "works12")
            .times(1)
            .returning(|_| Ok(()));

        let (tx, rx) = mpsc::channel(16);
        tx.send(ClickEvent::new("broken1")).await.unwrap();
        tx.send(ClickEvent::new("works12")).await.unwrap();
        drop(tx);

        run_click_worker(rx, Arc::new(repo), 1).await;
    }
}
