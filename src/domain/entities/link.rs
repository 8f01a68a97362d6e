//! Link entity representing a short code to destination mapping.

use chrono::{DateTime, Utc};

/// A persisted short link.
///
/// `code` and `url` never change after creation. `clicks` and `last_clicked`
/// are only advanced by redirect resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub url: String,
    pub clicks: i64,
    pub last_clicked: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a link as it looks right after insertion: no clicks yet.
    pub fn new(id: i64, code: String, url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            code,
            url,
            clicks: 0,
            last_clicked: None,
            created_at,
        }
    }

    /// Returns true if the link has been resolved at least once.
    pub fn was_clicked(&self) -> bool {
        self.last_clicked.is_some()
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub url: String,
}

impl NewLink {
    pub fn new(code: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            url: url.into(),
        }
    }
}
