//! In-process link repository.
//!
//! Backed by a sharded concurrent map. Inserts go through the map's entry API
//! and clicks are incremented under the shard's write lock, so uniqueness and
//! click counts hold for concurrent requests within a single process. Data
//! does not survive a restart and is not shared between instances.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkRepository, RepositoryError};

#[derive(Debug, Default)]
pub struct MemoryLinkRepository {
    links: DashMap<String, Link>,
    next_id: AtomicI64,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        tracing::debug!("Using in-memory link store");
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<Link, RepositoryError> {
        match self.links.entry(new_link.code) {
            Entry::Occupied(entry) => Err(RepositoryError::Duplicate {
                code: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
                let link = Link::new(id, entry.key().clone(), new_link.url, Utc::now());
                entry.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, RepositoryError> {
        Ok(self.links.get(code).map(|entry| entry.value().clone()))
    }

    async fn list_all(&self) -> Result<Vec<Link>, RepositoryError> {
        let mut links: Vec<Link> = self
            .links
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        links.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(links)
    }

    async fn delete(&self, code: &str) -> Result<bool, RepositoryError> {
        Ok(self.links.remove(code).is_some())
    }

    async fn record_click(&self, code: &str) -> Result<Option<Link>, RepositoryError> {
        Ok(self.links.get_mut(code).map(|mut entry| {
            entry.clicks += 1;
            entry.last_clicked = Some(Utc::now());
            entry.value().clone()
        }))
    }
}
