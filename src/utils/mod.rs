//! Helper functions shared across layers.
//!
//! - [`code_generator`] - Deterministic short code derivation
//! - [`db_error`] - SQLx error classification

pub mod code_generator;
pub mod db_error;
