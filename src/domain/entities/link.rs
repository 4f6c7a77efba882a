//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A short code mapped to a long URL, with click counters.
///
/// `code`, `long_url`, and `created_at` never change after insertion.
/// `total_clicks` only grows and `last_clicked` stays `None` until the first
/// recorded click.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub total_clicks: i64,
    pub last_clicked: Option<DateTime<Utc>>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        code: String,
        long_url: String,
        created_at: DateTime<Utc>,
        total_clicks: i64,
        last_clicked: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            code,
            long_url,
            created_at,
            total_clicks,
            last_clicked,
        }
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLink {
    pub code: String,
    pub long_url: String,
}
