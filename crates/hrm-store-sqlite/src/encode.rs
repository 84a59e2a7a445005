//! Encoding and decoding helpers between domain types and SQLite columns.
//!
//! Dates are stored as ISO 8601 `YYYY-MM-DD` text, enumerations as their
//! numeric codes.

use hrm_core::candidate::{
  Candidate, CandidateId, CandidateSex, CandidateStatus, decode_date, encode_date,
};

use crate::{Error, Result};

// ─── Enumerations ────────────────────────────────────────────────────────────

pub fn decode_status(code: i64) -> Result<CandidateStatus> {
  CandidateStatus::from_code(code)
    .ok_or_else(|| Error::Decode(format!("unknown status code: {code}")))
}

pub fn decode_sex(code: i64) -> Result<CandidateSex> {
  CandidateSex::from_code(code)
    .ok_or_else(|| Error::Decode(format!("unknown sex code: {code}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `candidates` row, in
/// [`crate::schema::COLUMNS`] order.
pub struct RawCandidate {
  pub id:         CandidateId,
  pub first_name: String,
  pub last_name:  String,
  pub phone:      Option<String>,
  pub birth_date: Option<String>,
  pub sex:        Option<i64>,
  pub status:     i64,
  pub comments:   Option<String>,
}

impl RawCandidate {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      first_name: row.get(1)?,
      last_name:  row.get(2)?,
      phone:      row.get(3)?,
      birth_date: row.get(4)?,
      sex:        row.get(5)?,
      status:     row.get(6)?,
      comments:   row.get(7)?,
    })
  }

  pub fn into_candidate(self) -> Result<Candidate> {
    Ok(Candidate {
      id:         Some(self.id),
      first_name: self.first_name,
      last_name:  self.last_name,
      phone:      self.phone,
      birth_date: self
        .birth_date
        .as_deref()
        .map(|s| decode_date(s).map_err(|e| Error::Decode(format!("invalid date {s:?}: {e}"))))
        .transpose()?,
      sex:        self.sex.map(decode_sex).transpose()?,
      status:     decode_status(self.status)?,
      comments:   self.comments,
    })
  }
}

/// Column values for an `INSERT`, owned so they can move into a
/// `tokio_rusqlite` closure.
pub struct EncodedCandidate {
  pub first_name: String,
  pub last_name:  String,
  pub phone:      Option<String>,
  pub birth_date: Option<String>,
  pub sex:        Option<i64>,
  pub status:     i64,
  pub comments:   Option<String>,
}

impl From<Candidate> for EncodedCandidate {
  fn from(c: Candidate) -> Self {
    Self {
      first_name: c.first_name,
      last_name:  c.last_name,
      phone:      c.phone,
      birth_date: c.birth_date.map(encode_date),
      sex:        c.sex.map(CandidateSex::code),
      status:     c.status.code(),
      comments:   c.comments,
    }
  }
}
