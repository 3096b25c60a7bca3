//! HTTP client construction.
//!
//! - [`client`] - client creation with retry, tracing and timeout middleware

pub mod client;

pub use client::{create_http_client, user_agent, HttpClientConfig};
