#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::extract::ConnectInfo;
use axum_test::TestServer;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tower::Layer;
use urlsnip::domain::entities::{Link, NewLink};
use urlsnip::domain::repositories::{LinkRepository, RepositoryError};
use urlsnip::infrastructure::persistence::{MemoryLinkRepository, TimeoutLinkRepository};
use urlsnip::routes::{RouterSettings, app_router};
use urlsnip::state::AppState;

pub const BASE_URL: &str = "https://s.example.com";

/// Memory store that counts the calls reaching it.
#[derive(Default)]
pub struct CountingRepository {
    inner: MemoryLinkRepository,
    pub inserts: AtomicUsize,
    pub lookups: AtomicUsize,
    pub clicks: AtomicUsize,
}

impl CountingRepository {
    pub fn store_calls(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
            + self.lookups.load(Ordering::SeqCst)
            + self.clicks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LinkRepository for CountingRepository {
    async fn insert(&self, new_link: NewLink) -> Result<Link, RepositoryError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(new_link).await
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, RepositoryError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_code(code).await
    }

    async fn list_all(&self) -> Result<Vec<Link>, RepositoryError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.list_all().await
    }

    async fn delete(&self, code: &str) -> Result<bool, RepositoryError> {
        self.inner.delete(code).await
    }

    async fn record_click(&self, code: &str) -> Result<Option<Link>, RepositoryError> {
        self.clicks.fetch_add(1, Ordering::SeqCst);
        self.inner.record_click(code).await
    }
}

/// Store that is always down.
pub struct UnavailableRepository;

#[async_trait]
impl LinkRepository for UnavailableRepository {
    async fn insert(&self, _: NewLink) -> Result<Link, RepositoryError> {
        Err(down())
    }

    async fn find_by_code(&self, _: &str) -> Result<Option<Link>, RepositoryError> {
        Err(down())
    }

    async fn list_all(&self) -> Result<Vec<Link>, RepositoryError> {
        Err(down())
    }

    async fn delete(&self, _: &str) -> Result<bool, RepositoryError> {
        Err(down())
    }

    async fn record_click(&self, _: &str) -> Result<Option<Link>, RepositoryError> {
        Err(down())
    }
}

/// Store whose operations never complete.
pub struct StalledRepository;

#[async_trait]
impl LinkRepository for StalledRepository {
    async fn insert(&self, _: NewLink) -> Result<Link, RepositoryError> {
        std::future::pending().await
    }

    async fn find_by_code(&self, _: &str) -> Result<Option<Link>, RepositoryError> {
        std::future::pending().await
    }

    async fn list_all(&self) -> Result<Vec<Link>, RepositoryError> {
        std::future::pending().await
    }

    async fn delete(&self, _: &str) -> Result<bool, RepositoryError> {
        std::future::pending().await
    }

    async fn record_click(&self, _: &str) -> Result<Option<Link>, RepositoryError> {
        std::future::pending().await
    }
}

/// A stalled store behind the production deadline wrapper.
pub fn stalled_repository() -> Arc<dyn LinkRepository> {
    Arc::new(TimeoutLinkRepository::new(
        StalledRepository,
        Duration::from_millis(50),
    ))
}

fn down() -> RepositoryError {
    RepositoryError::Unavailable("connection refused".to_string())
}

/// Router settings with a limit high enough not to interfere with tests.
pub fn relaxed_settings() -> RouterSettings {
    RouterSettings {
        rate_limit_per_second: 1,
        rate_limit_burst: 10_000,
        ..RouterSettings::default()
    }
}

/// Full application router over `repo`, with a fake peer address.
pub fn create_app(repo: Arc<dyn LinkRepository>, settings: &RouterSettings) -> Router {
    let state = AppState::new(repo, BASE_URL, 8);
    app_router(state, settings).layer(MockConnectInfoLayer)
}

pub fn create_server(repo: Arc<dyn LinkRepository>) -> TestServer {
    TestServer::new(create_app(repo, &relaxed_settings())).unwrap()
}

pub fn memory_server() -> (TestServer, Arc<CountingRepository>) {
    let repo = Arc::new(CountingRepository::default());
    (create_server(repo.clone()), repo)
}

/// Inserts the peer address the rate limiter keys on.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
