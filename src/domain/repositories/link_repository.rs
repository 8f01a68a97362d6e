//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use async_trait::async_trait;

/// Errors reported by a link store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// The code is already present. Nothing was written.
    #[error("short code '{code}' already exists")]
    Duplicate { code: String },

    /// The store could not complete the operation in time or at all.
    /// Callers may retry.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Storage contract for short links.
///
/// Every mutating operation is a single atomic step in the backing store:
/// uniqueness of `code` is enforced by the store itself and click accounting
/// is an in-place increment, never a read-modify-write in application memory.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - in-process
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Duplicate`] if the code already exists; the
    /// existing row is left untouched.
    async fn insert(&self, new_link: NewLink) -> Result<Link, RepositoryError>;

    /// Finds a link by its exact (case-sensitive) code.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, RepositoryError>;

    /// Lists every link, newest `created_at` first.
    async fn list_all(&self) -> Result<Vec<Link>, RepositoryError>;

    /// Permanently removes a link.
    ///
    /// Returns `Ok(true)` if a row was removed, `Ok(false)` if none matched.
    async fn delete(&self, code: &str) -> Result<bool, RepositoryError>;

    /// Atomically increments `clicks` and sets `last_clicked` to now.
    ///
    /// Returns the updated link, or `Ok(None)` if the code does not exist.
    async fn record_click(&self, code: &str) -> Result<Option<Link>, RepositoryError>;
}
