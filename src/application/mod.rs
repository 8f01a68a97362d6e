//! Application layer services implementing business logic.
//!
//! Services coordinate validation and repository calls and give HTTP handlers
//! and the admin CLI a single API to work against.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation, lookup and deletion
//! - [`services::redirect_service::RedirectService`] - Redirect resolution and click accounting

pub mod services;
