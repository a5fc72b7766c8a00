//! Common library for the lost-and-found backend
//!
//! This crate provides shared infrastructure used by the backend service:
//! database connectivity, pooling, and error handling.

pub mod database;
pub mod error;
