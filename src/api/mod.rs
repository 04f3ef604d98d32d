//! HTTP layer for redirects, service endpoints and shared middleware.
//!
//! # Modules
//!
//! - [`dto`] - JSON response payloads
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Rate limiting and request tracing
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
