//! [`JsonStore`] — the loaded document — and [`JsonRepository`], the
//! [`CandidateRepository`] implementation that works on it.

use std::path::{Path, PathBuf};

use hrm_core::{
  candidate::{Candidate, CandidateId},
  store::CandidateRepository,
};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

use crate::{
  Error, Result,
  document::{Document, StoredCandidate},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// The candidates document for one file, held in memory.
///
/// Created once by the composition root and lent to a [`JsonRepository`].
pub struct JsonStore {
  path: PathBuf,
  doc:  Mutex<Document>,
}

impl JsonStore {
  /// Load the document at `path`.
  ///
  /// A missing file yields an empty store. So does an unreadable or malformed
  /// one: its contents are discarded and overwritten on the next write.
  pub async fn open(path: impl AsRef<Path>) -> Self {
    let path = path.as_ref().to_path_buf();
    let doc = match tokio::fs::read_to_string(&path).await {
      Ok(raw) => match Document::parse(&raw) {
        Ok(doc) => {
          debug!(path = %path.display(), count = doc.candidates.len(), "loaded store");
          doc
        }
        Err(e) => {
          warn!(path = %path.display(), error = %e, "discarding malformed store");
          Document::default()
        }
      },
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
        debug!(path = %path.display(), "no store file yet");
        Document::default()
      }
      Err(e) => {
        warn!(path = %path.display(), error = %e, "discarding unreadable store");
        Document::default()
      }
    };

    Self { path, doc: Mutex::new(doc) }
  }

  pub fn path(&self) -> &Path { &self.path }

  async fn lock(&self) -> MutexGuard<'_, Document> { self.doc.lock().await }

  /// Write `next` to disk, then make it the in-memory document. On failure
  /// the in-memory document is left as it was.
  async fn commit(
    &self,
    guard: &mut MutexGuard<'_, Document>,
    next: Document,
  ) -> Result<()> {
    let body = serde_json::to_string_pretty(&next)?;

    if let Some(parent) = self.path.parent()
      && !parent.as_os_str().is_empty()
    {
      tokio::fs::create_dir_all(parent)
        .await
        .map_err(|source| Error::Write { path: parent.to_path_buf(), source })?;
    }
    tokio::fs::write(&self.path, body)
      .await
      .map_err(|source| Error::Write { path: self.path.clone(), source })?;

    **guard = next;
    Ok(())
  }
}

// ─── Repository ──────────────────────────────────────────────────────────────

/// [`CandidateRepository`] over a borrowed [`JsonStore`].
#[derive(Clone, Copy)]
pub struct JsonRepository<'s> {
  store: &'s JsonStore,
}

impl<'s> JsonRepository<'s> {
  pub fn new(store: &'s JsonStore) -> Self { Self { store } }
}

impl CandidateRepository for JsonRepository<'_> {
  type Error = Error;

  async fn get_all(&self) -> Result<Vec<Candidate>> {
    let doc = self.store.lock().await;
    doc.candidates.values().map(StoredCandidate::to_candidate).collect()
  }

  async fn get_by_id(&self, id: CandidateId) -> Result<Option<Candidate>> {
    let doc = self.store.lock().await;
    doc.candidates.get(&id).map(StoredCandidate::to_candidate).transpose()
  }

  async fn insert_or_update(&self, candidate: Candidate) -> Result<CandidateId> {
    let mut guard = self.store.lock().await;
    let mut next = guard.clone();

    let id = match candidate.id {
      Some(id) => {
        next.next_id = next.next_id.max(id.saturating_add(1));
        id
      }
      // The counter saturates at `i64::MAX`; once that id is taken nothing
      // is left to assign.
      None if next.candidates.contains_key(&next.next_id) => {
        return Err(Error::IdsExhausted);
      }
      None => {
        let id = next.next_id;
        next.next_id = id.saturating_add(1);
        id
      }
    };
    next
      .candidates
      .insert(id, StoredCandidate::from_candidate(id, candidate));

    self.store.commit(&mut guard, next).await?;
    Ok(id)
  }

  async fn delete(&self, id: CandidateId) -> Result<()> {
    let mut guard = self.store.lock().await;
    if !guard.candidates.contains_key(&id) {
      return Ok(());
    }

    let mut next = guard.clone();
    next.candidates.remove(&id);
    self.store.commit(&mut guard, next).await
  }

  async fn clear_all(&self) -> Result<()> {
    let mut guard = self.store.lock().await;
    self.store.commit(&mut guard, Document::default()).await
  }
}
