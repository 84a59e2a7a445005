//! The on-disk document and its conversion to and from domain types.
//!
//! Layout:
//!
//! ```json
//! {
//!   "candidates": { "1": { "id": 1, "first_name": "Ivan", ..., "status": 1 } },
//!   "next_id": 2
//! }
//! ```
//!
//! Enumerations are stored as their numeric codes, dates as ISO 8601
//! `YYYY-MM-DD` strings.

use std::collections::BTreeMap;

use hrm_core::candidate::{
  Candidate, CandidateId, CandidateSex, CandidateStatus, decode_date, encode_date,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{Error, Result};

pub const FIRST_ID: CandidateId = 1;

fn first_id() -> CandidateId { FIRST_ID }

// ─── Document ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
  #[serde(default)]
  pub candidates: BTreeMap<CandidateId, StoredCandidate>,
  #[serde(default = "first_id")]
  pub next_id:    CandidateId,
}

impl Default for Document {
  fn default() -> Self {
    Self { candidates: BTreeMap::new(), next_id: FIRST_ID }
  }
}

impl Document {
  /// Parse and fully decode a document, so that a file which parses but
  /// holds bad values is rejected as a whole.
  ///
  /// A `next_id` that is missing or does not lie past every stored id is
  /// raised so that assigned ids cannot land on existing records.
  pub fn parse(raw: &str) -> Result<Self> {
    let mut doc: Self = serde_json::from_str(raw)?;
    for (key, stored) in &doc.candidates {
      if stored.id != *key {
        return Err(Error::Decode(format!("record under key {key} has id {}", stored.id)));
      }
      stored.to_candidate()?;
    }

    let floor = doc
      .candidates
      .keys()
      .next_back()
      .map_or(FIRST_ID, |last| last.saturating_add(1))
      .max(FIRST_ID);
    if doc.next_id < floor {
      warn!(next_id = doc.next_id, raised_to = floor, "stale id counter in store");
      doc.next_id = floor;
    }
    Ok(doc)
  }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// One candidate as it appears in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCandidate {
  pub id:         CandidateId,
  pub first_name: String,
  pub last_name:  String,
  #[serde(default)]
  pub phone:      Option<String>,
  #[serde(default)]
  pub birth_date: Option<String>,
  #[serde(default)]
  pub sex:        Option<i64>,
  pub status:     i64,
  #[serde(default)]
  pub comments:   Option<String>,
}

impl StoredCandidate {
  pub fn from_candidate(id: CandidateId, c: Candidate) -> Self {
    Self {
      id,
      first_name: c.first_name,
      last_name:  c.last_name,
      phone:      c.phone,
      birth_date: c.birth_date.map(encode_date),
      sex:        c.sex.map(CandidateSex::code),
      status:     c.status.code(),
      comments:   c.comments,
    }
  }

  pub fn to_candidate(&self) -> Result<Candidate> {
    let sex = self
      .sex
      .map(|code| {
        CandidateSex::from_code(code)
          .ok_or_else(|| Error::Decode(format!("unknown sex code: {code}")))
      })
      .transpose()?;
    let status = CandidateStatus::from_code(self.status)
      .ok_or_else(|| Error::Decode(format!("unknown status code: {}", self.status)))?;
    let birth_date = self
      .birth_date
      .as_deref()
      .map(|s| decode_date(s).map_err(|e| Error::Decode(format!("invalid date {s:?}: {e}"))))
      .transpose()?;

    Ok(Candidate {
      id: Some(self.id),
      first_name: self.first_name.clone(),
      last_name: self.last_name.clone(),
      phone: self.phone.clone(),
      birth_date,
      sex,
      status,
      comments: self.comments.clone(),
    })
  }
}
