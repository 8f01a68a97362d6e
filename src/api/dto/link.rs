//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::services::LinkView;

/// Request body for `POST /api/links`.
///
/// `url` is optional at the serde level so a missing field is reported as
/// `invalid_url` rather than a generic body error. An absent or `null` code
/// means "generate one"; an empty string is a malformed custom code.
#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

/// JSON representation of a stored link.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub code: String,
    pub url: String,
    pub short_url: String,
    pub clicks: i64,
    pub last_clicked: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<LinkView> for LinkResponse {
    fn from(view: LinkView) -> Self {
        Self {
            code: view.link.code,
            url: view.link.url,
            short_url: view.short_url,
            clicks: view.link.clicks,
            last_clicked: view.link.last_clicked,
            created_at: view.link.created_at,
        }
    }
}

/// Confirmation returned by `DELETE /api/links/{code}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteLinkResponse {
    pub message: String,
}

impl DeleteLinkResponse {
    pub fn deleted() -> Self {
        Self {
            message: "Link deleted".to_string(),
        }
    }
}
