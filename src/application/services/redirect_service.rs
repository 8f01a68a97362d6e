//! Redirect resolution with click accounting.

use std::sync::Arc;

use tracing::{debug, error};

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{is_reserved, is_valid_format};

/// Where a resolved short code points to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    pub url: String,
    /// Click count including the click that produced this target.
    pub clicks: i64,
}

/// Resolves short codes and records one click per resolution.
///
/// Lookup and click accounting are a single atomic store call, so a click is
/// counted exactly when a redirect is issued.
pub struct RedirectService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository + ?Sized + 'static> RedirectService<L> {
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// Resolves `code` to its destination and records the click.
    ///
    /// Reserved words and malformed codes are rejected without a store call.
    /// The click is recorded before returning; the store call runs on its own
    /// task, so it completes even if the caller goes away mid-request.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the code is unknown, reserved or malformed
    /// - [`AppError::StorageUnavailable`] if the store failed
    pub async fn resolve(&self, code: &str) -> Result<RedirectTarget, AppError> {
        if is_reserved(code) || !is_valid_format(code) {
            debug!(code, "Rejected redirect for non-code path segment");
            metrics::counter!("redirects_total", "outcome" => "rejected").increment(1);
            return Err(AppError::NotFound(code.to_string()));
        }

        let repository = Arc::clone(&self.link_repository);
        let owned_code = code.to_string();
        let recorded = tokio::spawn(async move { repository.record_click(&owned_code).await })
            .await
            .map_err(|e| {
                error!(code, error = %e, "Click recording task failed");
                AppError::Internal(format!("click recording task failed: {e}"))
            })?;

        match recorded {
            Ok(Some(link)) => {
                metrics::counter!("redirects_total", "outcome" => "found").increment(1);
                Ok(RedirectTarget {
                    url: link.url,
                    clicks: link.clicks,
                })
            }
            Ok(None) => {
                debug!(code, "Redirect miss");
                metrics::counter!("redirects_total", "outcome" => "not_found").increment(1);
                Err(AppError::NotFound(code.to_string()))
            }
            Err(e) => {
                error!(code, error = %e, "Failed to record click");
                metrics::counter!("redirects_total", "outcome" => "error").increment(1);
                Err(e.into())
            }
        }
    }
}
