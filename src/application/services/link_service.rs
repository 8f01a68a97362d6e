//! Link creation, lookup, listing and deletion.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkRepository, RepositoryError};
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, is_reserved, validate_custom_code};
use crate::utils::url_validator::validate_url;

/// Default ceiling for generated-code collision retries.
pub const DEFAULT_MAX_ATTEMPTS: usize = 8;

/// A link together with its derived short URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkView {
    pub link: Link,
    pub short_url: String,
}

/// Service for creating and managing short links.
///
/// Validation happens before any storage call. Uniqueness is decided by the
/// store's insert, never by a prior existence check.
pub struct LinkService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    base_url: String,
    max_attempts: usize,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    ///
    /// `base_url` is the public origin short URLs are built from; a trailing
    /// slash is ignored. `max_attempts` is clamped to at least 1.
    pub fn new(link_repository: Arc<L>, base_url: impl Into<String>, max_attempts: usize) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            link_repository,
            base_url,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Creates a short link.
    ///
    /// With `requested_code` the code is validated and inserted exactly once.
    /// Without it, random codes are generated and inserted until one does not
    /// collide, up to the configured number of attempts.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] if the destination is rejected
    /// - [`AppError::InvalidCode`] / [`AppError::ReservedCode`] for a bad explicit code
    /// - [`AppError::CodeTaken`] if the explicit code already exists
    /// - [`AppError::CodeSpaceExhausted`] if every generated code collided
    /// - [`AppError::StorageUnavailable`] if the store failed
    pub async fn create_link(
        &self,
        url: &str,
        requested_code: Option<String>,
    ) -> Result<LinkView, AppError> {
        let url = url.trim();
        validate_url(url).map_err(|e| AppError::InvalidUrl(e.to_string()))?;

        let generated = requested_code.is_none();
        let link = match requested_code {
            Some(code) => self.insert_explicit(url, code).await?,
            None => self.insert_generated(url).await?,
        };

        info!(code = %link.code, generated, "Short link created");
        metrics::counter!("links_created_total").increment(1);

        Ok(self.view(link))
    }

    /// Retrieves a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn get_link(&self, code: &str) -> Result<LinkView, AppError> {
        match self.link_repository.find_by_code(code).await? {
            Some(link) => Ok(self.view(link)),
            None => {
                debug!(code, "Link lookup miss");
                Err(AppError::NotFound(code.to_string()))
            }
        }
    }

    /// Lists all links, newest first.
    pub async fn list_links(&self) -> Result<Vec<LinkView>, AppError> {
        let links = self.link_repository.list_all().await?;
        Ok(links.into_iter().map(|link| self.view(link)).collect())
    }

    /// Permanently deletes a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn delete_link(&self, code: &str) -> Result<(), AppError> {
        if !self.link_repository.delete(code).await? {
            return Err(AppError::NotFound(code.to_string()));
        }

        info!(code, "Short link deleted");
        metrics::counter!("links_deleted_total").increment(1);
        Ok(())
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }

    fn view(&self, link: Link) -> LinkView {
        LinkView {
            short_url: self.short_url(&link.code),
            link,
        }
    }

    async fn insert_explicit(&self, url: &str, code: String) -> Result<Link, AppError> {
        validate_custom_code(&code)?;

        match self.link_repository.insert(NewLink::new(code, url)).await {
            Ok(link) => Ok(link),
            Err(RepositoryError::Duplicate { code }) => Err(AppError::CodeTaken(code)),
            Err(e) => Err(e.into()),
        }
    }

    async fn insert_generated(&self, url: &str) -> Result<Link, AppError> {
        for attempt in 1..=self.max_attempts {
            let code = generate_code();
            if is_reserved(&code) {
                continue;
            }

            match self.link_repository.insert(NewLink::new(code, url)).await {
                Ok(link) => return Ok(link),
                Err(RepositoryError::Duplicate { code }) => {
                    warn!(code, attempt, "Generated code collided, retrying");
                    metrics::counter!("code_collisions_total").increment(1);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::CodeSpaceExhausted {
            attempts: self.max_attempts,
        })
    }
}
