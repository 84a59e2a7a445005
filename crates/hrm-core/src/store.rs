//! The `CandidateRepository` trait.
//!
//! Implemented by the storage backends (`hrm-store-json`, `hrm-store-sqlite`).
//! The use-case layer and the CLI depend on this abstraction only, so the two
//! backends must be observably interchangeable: the same sequence of calls
//! yields the same ids and the same field values on either.

use std::future::Future;

use crate::candidate::{Candidate, CandidateId};

/// Persistence for candidates, keyed by an auto-incrementing integer id.
///
/// Unreadable or malformed storage found while loading is discarded and
/// treated as an empty store. Write failures are returned to the caller.
pub trait CandidateRepository: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// All stored candidates in id order.
  fn get_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Candidate>, Self::Error>> + Send + '_;

  /// Retrieve a candidate by id. Returns `None` if not found.
  fn get_by_id(
    &self,
    id: CandidateId,
  ) -> impl Future<Output = Result<Option<Candidate>, Self::Error>> + Send + '_;

  /// Upsert a candidate and return its id.
  ///
  /// A candidate without an id gets the next unused id, strictly greater than
  /// every id handed out before. A candidate with an id overwrites whatever is
  /// stored there, or is inserted at that id if nothing is.
  fn insert_or_update(
    &self,
    candidate: Candidate,
  ) -> impl Future<Output = Result<CandidateId, Self::Error>> + Send + '_;

  /// Remove a candidate. Deleting an absent id is a no-op.
  fn delete(
    &self,
    id: CandidateId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Remove every candidate and restart id assignment at 1.
  fn clear_all(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
