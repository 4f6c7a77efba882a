//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::domain::entities::Link;
use crate::utils::code_generator::CODE_REGEX;

/// Request to create a short link.
///
/// ```json
/// { "longUrl": "https://example.com", "customCode": "promo25" }
/// ```
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    /// The URL to redirect to.
    #[validate(url(message = "Invalid URL format"))]
    pub long_url: String,

    /// Optional custom short code (6-8 alphanumeric characters).
    /// May be omitted, but not sent as `null`.
    #[serde(default, deserialize_with = "deserialize_present")]
    #[validate(regex(
        path = *CODE_REGEX,
        message = "Code must be 6-8 alphanumeric characters"
    ))]
    pub custom_code: Option<String>,
}

/// Deserializes a field that may be absent (via `#[serde(default)]`) but
/// must not be `null` when present.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Some)
}

/// JSON representation of a stored link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkResponse {
    pub id: i64,
    pub code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub total_clicks: i64,
    pub last_clicked: Option<DateTime<Utc>>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            code: link.code,
            long_url: link.long_url,
            created_at: link.created_at,
            total_clicks: link.total_clicks,
            last_clicked: link.last_clicked,
        }
    }
}

/// Response body for a successful delete.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteLinkResponse {
    pub success: bool,
}
