//! JSON-file backend for the HRM candidate store.
//!
//! The whole store lives in one document that is loaded once per
//! [`JsonStore`] and rewritten in full on every mutation.

mod document;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{JsonRepository, JsonStore};
