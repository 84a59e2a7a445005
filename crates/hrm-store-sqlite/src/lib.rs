//! SQLite backend for the HRM candidate store.
//!
//! Wraps [`tokio_rusqlite`] so database access runs off the async runtime.
//! Each repository call opens its own connection and drops it when done.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
