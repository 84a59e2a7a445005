//! Business rules layered over a [`CandidateRepository`].
//!
//! The repository is a plain upsert store. Existence checks, validation,
//! merging of edits over the stored record and the status transitions live here.

use tracing::{debug, info};

use crate::{
  Error, Result,
  candidate::{Candidate, CandidateId, CandidatePatch, CandidateStatus},
  store::CandidateRepository,
};

/// The application's operations, generic over the injected storage backend.
pub struct UseCases<R> {
  repo: R,
}

impl<R: CandidateRepository> UseCases<R> {
  pub fn new(repo: R) -> Self { Self { repo } }

  pub fn repository(&self) -> &R { &self.repo }

  /// Register a new candidate and return the assigned id.
  ///
  /// Any id or status on the input is ignored: new candidates always start
  /// out `Registered` under a fresh id.
  pub async fn register(&self, mut candidate: Candidate) -> Result<CandidateId> {
    candidate.validate()?;
    candidate.id = None;
    candidate.status = CandidateStatus::Registered;

    let id = self
      .repo
      .insert_or_update(candidate)
      .await
      .map_err(Error::storage)?;
    info!(id, "registered candidate");
    Ok(id)
  }

  pub async fn get(&self, id: CandidateId) -> Result<Candidate> {
    self
      .repo
      .get_by_id(id)
      .await
      .map_err(Error::storage)?
      .ok_or(Error::NotFound(id))
  }

  pub async fn list_all(&self) -> Result<Vec<Candidate>> {
    self.repo.get_all().await.map_err(Error::storage)
  }

  /// Merge the fields supplied on `candidate` over the stored record and
  /// return the record as stored afterwards.
  ///
  /// Optional fields left `None` keep their stored values. Any `status` on
  /// the input is ignored.
  pub async fn edit(&self, candidate: Candidate) -> Result<Candidate> {
    let id = candidate.id.ok_or_else(|| {
      Error::InvalidArgument("candidate id is required for edit".into())
    })?;
    self.update(id, CandidatePatch::merging(candidate)).await
  }

  /// Apply `patch` to the stored candidate `id`. Unlike [`Self::edit`] this
  /// can clear optional fields.
  pub async fn update(&self, id: CandidateId, patch: CandidatePatch) -> Result<Candidate> {
    let mut candidate = self.get(id).await?;
    patch.apply_to(&mut candidate);
    candidate.validate()?;

    self
      .repo
      .insert_or_update(candidate)
      .await
      .map_err(Error::storage)?;
    debug!(id, "edited candidate");

    self.get(id).await
  }

  pub async fn delete(&self, id: CandidateId) -> Result<()> {
    self.get(id).await?;
    self.repo.delete(id).await.map_err(Error::storage)?;
    info!(id, "deleted candidate");
    Ok(())
  }

  pub async fn clear_all(&self) -> Result<()> {
    self.repo.clear_all().await.map_err(Error::storage)?;
    info!("cleared all candidates");
    Ok(())
  }

  pub async fn count(&self) -> Result<usize> {
    Ok(self.list_all().await?.len())
  }

  /// Accept the candidate as a new hire.
  pub async fn approve(&self, id: CandidateId) -> Result<()> {
    self.transition(id, CandidateStatus::Approved).await
  }

  pub async fn reject(&self, id: CandidateId) -> Result<()> {
    self.transition(id, CandidateStatus::Rejected).await
  }

  async fn transition(&self, id: CandidateId, to: CandidateStatus) -> Result<()> {
    let mut candidate = self.get(id).await?;
    if candidate.status.is_terminal() {
      return Err(Error::InvalidTransition { id, from: candidate.status, to });
    }

    let from = candidate.status;
    candidate.status = to;
    self
      .repo
      .insert_or_update(candidate)
      .await
      .map_err(Error::storage)?;
    info!(id, %from, %to, "candidate status changed");
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use std::{collections::BTreeMap, convert::Infallible, sync::Mutex};

  use chrono::NaiveDate;

  use super::*;
  use crate::candidate::{CandidateSex, FieldEdit};

  /// Minimal in-process repository with the same id semantics as the real
  /// backends.
  #[derive(Default)]
  struct MemoryRepository {
    inner: Mutex<(BTreeMap<CandidateId, Candidate>, CandidateId)>,
  }

  impl CandidateRepository for MemoryRepository {
    type Error = Infallible;

    async fn get_all(&self) -> Result<Vec<Candidate>, Infallible> {
      Ok(self.inner.lock().unwrap().0.values().cloned().collect())
    }

    async fn get_by_id(&self, id: CandidateId) -> Result<Option<Candidate>, Infallible> {
      Ok(self.inner.lock().unwrap().0.get(&id).cloned())
    }

    async fn insert_or_update(
      &self,
      mut candidate: Candidate,
    ) -> Result<CandidateId, Infallible> {
      let mut guard = self.inner.lock().unwrap();
      let (rows, last) = &mut *guard;
      let id = match candidate.id {
        Some(id) => id,
        None => *last + 1,
      };
      *last = (*last).max(id);
      candidate.id = Some(id);
      rows.insert(id, candidate);
      Ok(id)
    }

    async fn delete(&self, id: CandidateId) -> Result<(), Infallible> {
      self.inner.lock().unwrap().0.remove(&id);
      Ok(())
    }

    async fn clear_all(&self) -> Result<(), Infallible> {
      *self.inner.lock().unwrap() = (BTreeMap::new(), 0);
      Ok(())
    }
  }

  fn use_cases() -> UseCases<MemoryRepository> {
    UseCases::new(MemoryRepository::default())
  }

  fn ivan() -> Candidate {
    Candidate {
      phone: Some("+79990000000".into()),
      birth_date: NaiveDate::from_ymd_opt(1990, 1, 1),
      sex: Some(CandidateSex::Male),
      comments: Some("ok".into()),
      ..Candidate::new("Ivan", "Petrov")
    }
  }

  #[tokio::test]
  async fn register_get_delete_scenario() {
    let uc = use_cases();

    let id = uc.register(ivan()).await.unwrap();
    assert_eq!(id, 1);

    let stored = uc.get(1).await.unwrap();
    assert_eq!(stored.status, CandidateStatus::Registered);
    assert_eq!(stored, Candidate { id: Some(1), ..ivan() });

    uc.delete(1).await.unwrap();
    assert!(matches!(uc.get(1).await, Err(Error::NotFound(1))));
  }

  #[tokio::test]
  async fn register_ignores_supplied_id_and_status() {
    let uc = use_cases();
    let mut input = ivan();
    input.id = Some(42);
    input.status = CandidateStatus::Approved;

    let id = uc.register(input).await.unwrap();
    assert_eq!(id, 1);
    assert_eq!(uc.get(id).await.unwrap().status, CandidateStatus::Registered);
  }

  #[tokio::test]
  async fn register_rejects_invalid_candidate() {
    let uc = use_cases();
    let err = uc.register(Candidate::new("", "Petrov")).await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
    assert_eq!(uc.count().await.unwrap(), 0);
  }

  #[tokio::test]
  async fn count_and_clear_all() {
    let uc = use_cases();
    uc.register(ivan()).await.unwrap();
    uc.register(Candidate::new("Anna", "Smirnova")).await.unwrap();
    assert_eq!(uc.count().await.unwrap(), 2);

    uc.clear_all().await.unwrap();
    assert_eq!(uc.count().await.unwrap(), 0);
    assert!(uc.list_all().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn edit_requires_id() {
    let uc = use_cases();
    let err = uc.edit(ivan()).await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
  }

  #[tokio::test]
  async fn edit_unknown_id_is_not_found() {
    let uc = use_cases();
    let err = uc.edit(Candidate { id: Some(7), ..ivan() }).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(7)));
  }

  #[tokio::test]
  async fn edit_merges_supplied_fields_and_pins_status() {
    let uc = use_cases();
    let id = uc.register(ivan()).await.unwrap();
    uc.approve(id).await.unwrap();

    let edited = uc
      .edit(Candidate {
        id: Some(id),
        status: CandidateStatus::Rejected,
        comments: Some("call back".into()),
        ..Candidate::new("Pyotr", "Petrov")
      })
      .await
      .unwrap();

    assert_eq!(edited.id, Some(id));
    assert_eq!(edited.status, CandidateStatus::Approved);
    assert_eq!(edited.first_name, "Pyotr");
    assert_eq!(edited.comments.as_deref(), Some("call back"));
    assert_eq!(uc.get(id).await.unwrap(), edited);
  }

  #[tokio::test]
  async fn edit_keeps_fields_that_were_not_supplied() {
    let uc = use_cases();
    let id = uc.register(ivan()).await.unwrap();

    let edited = uc
      .edit(Candidate { id: Some(id), ..Candidate::new("Ivan", "Sidorov") })
      .await
      .unwrap();

    assert_eq!(edited, Candidate { id: Some(id), last_name: "Sidorov".into(), ..ivan() });
  }

  #[tokio::test]
  async fn edit_validates_the_merged_record() {
    let uc = use_cases();
    let id = uc.register(ivan()).await.unwrap();

    let err = uc
      .edit(Candidate { id: Some(id), ..Candidate::new(" ", "Petrov") })
      .await
      .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
    assert_eq!(uc.get(id).await.unwrap(), Candidate { id: Some(id), ..ivan() });
  }

  #[tokio::test]
  async fn update_can_clear_optional_fields() {
    let uc = use_cases();
    let id = uc.register(ivan()).await.unwrap();

    let patch = CandidatePatch {
      phone: Some(FieldEdit::Clear),
      sex: Some(FieldEdit::Set(CandidateSex::Female)),
      ..CandidatePatch::default()
    };
    let updated = uc.update(id, patch).await.unwrap();

    assert_eq!(updated.phone, None);
    assert_eq!(updated.sex, Some(CandidateSex::Female));
    assert_eq!(updated.birth_date, ivan().birth_date);
    assert_eq!(updated.comments, ivan().comments);
    assert!(matches!(
      uc.update(99, CandidatePatch::default()).await,
      Err(Error::NotFound(99))
    ));
  }

  #[tokio::test]
  async fn approve_and_reject_set_status() {
    let uc = use_cases();
    let a = uc.register(ivan()).await.unwrap();
    let b = uc.register(Candidate::new("Anna", "Smirnova")).await.unwrap();

    uc.approve(a).await.unwrap();
    uc.reject(b).await.unwrap();

    assert_eq!(uc.get(a).await.unwrap().status, CandidateStatus::Approved);
    assert_eq!(uc.get(b).await.unwrap().status, CandidateStatus::Rejected);
  }

  #[tokio::test]
  async fn transitions_on_unknown_id_are_not_found() {
    let uc = use_cases();
    assert!(matches!(uc.approve(3).await, Err(Error::NotFound(3))));
    assert!(matches!(uc.reject(3).await, Err(Error::NotFound(3))));
  }

  #[tokio::test]
  async fn terminal_status_cannot_be_reversed() {
    let uc = use_cases();
    let id = uc.register(ivan()).await.unwrap();
    uc.reject(id).await.unwrap();

    let err = uc.approve(id).await.unwrap_err();
    assert!(matches!(
      err,
      Error::InvalidTransition {
        from: CandidateStatus::Rejected,
        to: CandidateStatus::Approved,
        ..
      }
    ));
    assert_eq!(uc.get(id).await.unwrap().status, CandidateStatus::Rejected);
  }

  #[tokio::test]
  async fn proposed_candidates_can_be_decided() {
    let uc = use_cases();
    let mut proposed = ivan();
    proposed.id = Some(5);
    proposed.status = CandidateStatus::Proposed;
    uc.repository().insert_or_update(proposed).await.unwrap();

    uc.approve(5).await.unwrap();
    assert_eq!(uc.get(5).await.unwrap().status, CandidateStatus::Approved);
  }

  #[tokio::test]
  async fn delete_unknown_id_is_not_found() {
    let uc = use_cases();
    assert!(matches!(uc.delete(9).await, Err(Error::NotFound(9))));
  }
}
