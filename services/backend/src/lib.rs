//! Data core for the lost-and-found backend
//!
//! Users register, post lost or found items, and file claim requests against
//! items. This crate provides the persistent data model, input validation for
//! inbound payloads, the relational schema, and repositories over PostgreSQL.
//! HTTP routing, sessions, and password hashing live in other services.

pub mod dto;
pub mod error;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod validation;

pub use error::{BackendError, BackendResult, ValidationErrors};
