//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{LinkService, RedirectService};
use crate::domain::repositories::LinkRepository;

/// Services shared by all requests. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    pub redirect_service: Arc<RedirectService<dyn LinkRepository>>,
}

impl AppState {
    /// Builds the services on top of one link store.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        base_url: impl Into<String>,
        max_attempts: usize,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(
                link_repository.clone(),
                base_url,
                max_attempts,
            )),
            redirect_service: Arc::new(RedirectService::new(link_repository)),
        }
    }
}
