//! Core domain entities.
//!
//! The service has a single entity: [`UrlMapping`], one row of the `urls`
//! table. It is never updated or deleted once created.

pub mod url_mapping;

pub use url_mapping::UrlMapping;
