//! Response payloads for JSON endpoints.

pub mod health;
