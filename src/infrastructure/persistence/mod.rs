//! Link store implementations.
//!
//! - [`PgLinkRepository`] - PostgreSQL, safe across many service instances
//! - [`MemoryLinkRepository`] - in-process map for development and tests
//! - [`TimeoutLinkRepository`] - per-operation deadline around either store

pub mod memory_link_repository;
pub mod pg_link_repository;
pub mod timeout_link_repository;

pub use memory_link_repository::MemoryLinkRepository;
pub use pg_link_repository::PgLinkRepository;
pub use timeout_link_repository::TimeoutLinkRepository;
