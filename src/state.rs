//! Shared application state injected into every handler.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::LinkService;
use crate::domain::click_event::ClickEvent;

/// Cheap-to-clone handle to the services and the click queue.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub click_sender: mpsc::Sender<ClickEvent>,
}

impl AppState {
    pub fn new(link_service: Arc<LinkService>, click_sender: mpsc::Sender<ClickEvent>) -> Self {
        Self {
            link_service,
            click_sender,
        }
    }
}

/// Builds a state over a mocked repository, returning the click receiver.
#[cfg(test)]
pub(crate) fn test_state(
    repository: crate::domain::repositories::MockLinkRepository,
    queue_capacity: usize,
) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let (tx, rx) = mpsc::channel(queue_capacity);
    let link_service = Arc::new(LinkService::new(Arc::new(repository), 6));
    (AppState::new(link_service, tx), rx)
}
