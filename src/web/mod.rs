//! Web layer for the browser-facing submission page.
//!
//! Uses Askama templates for server-side rendering.
//!
//! # Modules
//!
//! - [`dto`] - Form payloads
//! - [`handlers`] - Template rendering handlers
//! - [`routes`] - Page route configuration

pub mod dto;
pub mod handlers;
pub mod routes;
