//! Error types for `hrm-core`.

use thiserror::Error;

use crate::candidate::{CandidateId, CandidateStatus};

#[derive(Debug, Error)]
pub enum Error {
  #[error("candidate not found: {0}")]
  NotFound(CandidateId),

  #[error("invalid argument: {0}")]
  InvalidArgument(String),

  #[error("candidate {id} cannot move from {from} to {to}")]
  InvalidTransition {
    id:   CandidateId,
    from: CandidateStatus,
    to:   CandidateStatus,
  },

  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error.
  pub fn storage(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Storage(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
