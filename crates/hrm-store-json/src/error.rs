//! Error type for `hrm-store-json`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to write {path}: {source}")]
  Write {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// A stored record could not be turned back into a domain value.
  #[error("decode error: {0}")]
  Decode(String),

  /// Every id up to `i64::MAX` has been handed out.
  #[error("no candidate ids left to assign")]
  IdsExhausted,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
