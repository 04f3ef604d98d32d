//! HTML template rendering handlers.

mod index;

pub use index::{IndexTemplate, form_handler, shorten_handler};
