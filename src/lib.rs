//! db-query-client - typed bindings for the db_query backend API.
//!
//! [`ApiClient`] wraps one configured HTTP client; the [`api`] module adds
//! the metadata, SQL query and natural-language query operations to it.

pub mod api;
pub mod client;
pub mod config;
pub mod error;

pub use client::{ApiClient, PassThrough, ResponseInterceptor};
pub use error::{ApiError, ErrorBody, Result};
