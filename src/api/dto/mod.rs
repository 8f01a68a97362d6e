//! Data Transfer Objects for API requests and responses.
//!
//! Link payloads use camelCase field names on the wire.

pub mod health;
pub mod link;
