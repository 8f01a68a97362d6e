//! Per-operation deadline around any link store.

use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkRepository, RepositoryError};

/// Bounds every call on the inner store by `op_timeout`.
///
/// An operation that does not finish in time is abandoned and reported as
/// [`RepositoryError::Unavailable`], so callers see a retryable error instead
/// of a hung request.
pub struct TimeoutLinkRepository<R> {
    inner: R,
    op_timeout: Duration,
}

impl<R: LinkRepository> TimeoutLinkRepository<R> {
    pub fn new(inner: R, op_timeout: Duration) -> Self {
        Self { inner, op_timeout }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> Result<T, RepositoryError>
    where
        F: Future<Output = Result<T, RepositoryError>>,
    {
        match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    operation,
                    timeout_ms = self.op_timeout.as_millis() as u64,
                    "Storage operation timed out"
                );
                Err(RepositoryError::Unavailable(format!(
                    "{operation} timed out after {}ms",
                    self.op_timeout.as_millis()
                )))
            }
        }
    }
}

#[async_trait]
impl<R: LinkRepository> LinkRepository for TimeoutLinkRepository<R> {
    async fn insert(&self, new_link: NewLink) -> Result<Link, RepositoryError> {
        self.bounded("insert", self.inner.insert(new_link)).await
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, RepositoryError> {
        self.bounded("find_by_code", self.inner.find_by_code(code))
            .await
    }

    async fn list_all(&self) -> Result<Vec<Link>, RepositoryError> {
        self.bounded("list_all", self.inner.list_all()).await
    }

    async fn delete(&self, code: &str) -> Result<bool, RepositoryError> {
        self.bounded("delete", self.inner.delete(code)).await
    }

    async fn record_click(&self, code: &str) -> Result<Option<Link>, RepositoryError> {
        self.bounded("record_click", self.inner.record_click(code))
            .await
    }
}
