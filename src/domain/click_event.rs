//! Click event model for asynchronous click tracking.

/// A click on a short link, queued for the background worker.
///
/// Sent by the redirect handler through a bounded channel so the redirect
/// response never waits on the counter update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub code: String,
}

impl ClickEvent {
    /// Creates a click event for `code`.
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_event_creation() {
        let event = ClickEvent::new("abc123");
        assert_eq!(event.code, "abc123");
        assert_eq!(event.clone(), ClickEvent::new("abc123".to_string()));
    }
}
