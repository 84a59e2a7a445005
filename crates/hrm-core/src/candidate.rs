//! The candidate record and its enumerated fields.
//!
//! Both storage backends persist [`CandidateStatus`] and [`CandidateSex`] by
//! their numeric codes, so those codes are part of the on-disk format and must
//! never be renumbered.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{Error, Result};

/// Repository-assigned identifier; ids start at 1.
pub type CandidateId = i64;

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_PHONE_LEN: usize = 20;

// ─── Status ──────────────────────────────────────────────────────────────────

/// Stage of a candidate in the hiring pipeline.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display,
  EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum CandidateStatus {
  /// Newly registered.
  #[default]
  Registered,
  /// Put forward for consideration. Nothing sets this yet.
  Proposed,
  Approved,
  Rejected,
}

impl CandidateStatus {
  pub fn code(self) -> i64 {
    match self {
      Self::Registered => 1,
      Self::Proposed => 2,
      Self::Approved => 3,
      Self::Rejected => 4,
    }
  }

  pub fn from_code(code: i64) -> Option<Self> {
    match code {
      1 => Some(Self::Registered),
      2 => Some(Self::Proposed),
      3 => Some(Self::Approved),
      4 => Some(Self::Rejected),
      _ => None,
    }
  }

  /// Approved and rejected candidates never move again.
  pub fn is_terminal(self) -> bool {
    matches!(self, Self::Approved | Self::Rejected)
  }
}

// ─── Sex ─────────────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum CandidateSex {
  #[strum(to_string = "MALE", serialize = "M")]
  Male,
  #[strum(to_string = "FEMALE", serialize = "F")]
  Female,
}

impl CandidateSex {
  pub fn code(self) -> i64 {
    match self {
      Self::Male => 1,
      Self::Female => 2,
    }
  }

  pub fn from_code(code: i64) -> Option<Self> {
    match code {
      1 => Some(Self::Male),
      2 => Some(Self::Female),
      _ => None,
    }
  }
}

// ─── Candidate ───────────────────────────────────────────────────────────────

/// A person tracked through the hiring pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
  /// `None` until the repository assigns one on first insert.
  pub id:         Option<CandidateId>,
  pub first_name: String,
  pub last_name:  String,
  pub phone:      Option<String>,
  pub birth_date: Option<NaiveDate>,
  pub sex:        Option<CandidateSex>,
  pub status:     CandidateStatus,
  pub comments:   Option<String>,
}

impl Candidate {
  /// A fresh, unsaved candidate with only the required fields set.
  pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
    Self {
      id:         None,
      first_name: first_name.into(),
      last_name:  last_name.into(),
      phone:      None,
      birth_date: None,
      sex:        None,
      status:     CandidateStatus::default(),
      comments:   None,
    }
  }

  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }

  /// Check the field constraints that the storage layer does not enforce.
  pub fn validate(&self) -> Result<()> {
    check_name("first name", &self.first_name)?;
    check_name("last name", &self.last_name)?;
    if let Some(phone) = &self.phone
      && phone.chars().count() > MAX_PHONE_LEN
    {
      return Err(Error::InvalidArgument(format!(
        "phone must be at most {MAX_PHONE_LEN} characters"
      )));
    }
    Ok(())
  }
}

// ─── Partial updates ─────────────────────────────────────────────────────────

/// A new value for an optional field, or an instruction to clear it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit<T> {
  Set(T),
  Clear,
}

impl<T> FieldEdit<T> {
  /// Apply an edit, if one was given, to a stored field.
  pub fn apply(edit: Option<Self>, field: &mut Option<T>) {
    match edit {
      Some(Self::Set(v)) => *field = Some(v),
      Some(Self::Clear) => *field = None,
      None => {}
    }
  }
}

/// Changes to the editable fields of a stored candidate. `None` leaves a
/// field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidatePatch {
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
  pub phone:      Option<FieldEdit<String>>,
  pub birth_date: Option<FieldEdit<NaiveDate>>,
  pub sex:        Option<FieldEdit<CandidateSex>>,
  pub comments:   Option<FieldEdit<String>>,
}

impl CandidatePatch {
  /// Supply every field of `c`; its absent optional fields keep their
  /// stored values.
  pub fn merging(c: Candidate) -> Self {
    Self {
      first_name: Some(c.first_name),
      last_name:  Some(c.last_name),
      phone:      c.phone.map(FieldEdit::Set),
      birth_date: c.birth_date.map(FieldEdit::Set),
      sex:        c.sex.map(FieldEdit::Set),
      comments:   c.comments.map(FieldEdit::Set),
    }
  }

  /// Supply every field of `c`; its absent optional fields are cleared.
  pub fn replacing(c: Candidate) -> Self {
    fn edit<T>(v: Option<T>) -> Option<FieldEdit<T>> {
      Some(v.map_or(FieldEdit::Clear, FieldEdit::Set))
    }
    Self {
      first_name: Some(c.first_name),
      last_name:  Some(c.last_name),
      phone:      edit(c.phone),
      birth_date: edit(c.birth_date),
      sex:        edit(c.sex),
      comments:   edit(c.comments),
    }
  }

  /// Overlay the patch on `c`. Never touches `id` or `status`.
  pub fn apply_to(self, c: &mut Candidate) {
    if let Some(first_name) = self.first_name {
      c.first_name = first_name;
    }
    if let Some(last_name) = self.last_name {
      c.last_name = last_name;
    }
    FieldEdit::apply(self.phone, &mut c.phone);
    FieldEdit::apply(self.birth_date, &mut c.birth_date);
    FieldEdit::apply(self.sex, &mut c.sex);
    FieldEdit::apply(self.comments, &mut c.comments);
  }
}

// ─── Dates ───────────────────────────────────────────────────────────────────

/// Storage form of a date in both backends: ISO 8601 `YYYY-MM-DD`.
pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

/// Accepts a plain date or a full ISO 8601 date-time, keeping the date part.
pub fn decode_date(s: &str) -> std::result::Result<NaiveDate, chrono::ParseError> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
}

fn check_name(field: &str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::InvalidArgument(format!("{field} must not be empty")));
  }
  if value.chars().count() > MAX_NAME_LEN {
    return Err(Error::InvalidArgument(format!(
      "{field} must be at most {MAX_NAME_LEN} characters"
    )));
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_codes_are_stable() {
    for status in [
      CandidateStatus::Registered,
      CandidateStatus::Proposed,
      CandidateStatus::Approved,
      CandidateStatus::Rejected,
    ] {
      assert_eq!(CandidateStatus::from_code(status.code()), Some(status));
    }
    assert_eq!(CandidateStatus::Registered.code(), 1);
    assert_eq!(CandidateStatus::Rejected.code(), 4);
    assert_eq!(CandidateStatus::from_code(0), None);
    assert_eq!(CandidateStatus::from_code(5), None);
  }

  #[test]
  fn sex_parses_short_and_long_forms() {
    assert_eq!("m".parse::<CandidateSex>().unwrap(), CandidateSex::Male);
    assert_eq!("F".parse::<CandidateSex>().unwrap(), CandidateSex::Female);
    assert_eq!("female".parse::<CandidateSex>().unwrap(), CandidateSex::Female);
    assert!("x".parse::<CandidateSex>().is_err());
    assert_eq!(CandidateSex::Male.to_string(), "MALE");
  }

  #[test]
  fn only_approved_and_rejected_are_terminal() {
    assert!(!CandidateStatus::Registered.is_terminal());
    assert!(!CandidateStatus::Proposed.is_terminal());
    assert!(CandidateStatus::Approved.is_terminal());
    assert!(CandidateStatus::Rejected.is_terminal());
  }

  #[test]
  fn validate_rejects_blank_names() {
    assert!(Candidate::new("Ivan", "Petrov").validate().is_ok());
    assert!(matches!(
      Candidate::new("  ", "Petrov").validate(),
      Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
      Candidate::new("Ivan", "").validate(),
      Err(Error::InvalidArgument(_))
    ));
  }

  #[test]
  fn validate_enforces_length_limits() {
    let long = "x".repeat(MAX_NAME_LEN + 1);
    assert!(Candidate::new(long, "Petrov").validate().is_err());

    let mut candidate = Candidate::new("Ivan", "Petrov");
    candidate.phone = Some("+7".repeat(11));
    assert!(candidate.validate().is_err());
    candidate.phone = Some("+79990000000".into());
    assert!(candidate.validate().is_ok());
  }

  #[test]
  fn dates_decode_plain_and_datetime_forms() {
    let d = NaiveDate::from_ymd_opt(1990, 1, 31).unwrap();
    assert_eq!(encode_date(d), "1990-01-31");
    assert_eq!(decode_date("1990-01-31"), Ok(d));
    assert_eq!(decode_date("1990-01-31T08:30:00"), Ok(d));
    assert_eq!(decode_date("1990-01-31T08:30:00.250"), Ok(d));
    assert!(decode_date("31.01.1990").is_err());
    assert!(decode_date("").is_err());
  }

  #[test]
  fn field_edit_sets_clears_or_keeps() {
    let mut phone = Some("1".to_owned());
    FieldEdit::apply(None, &mut phone);
    assert_eq!(phone.as_deref(), Some("1"));
    FieldEdit::apply(Some(FieldEdit::Set("2".to_owned())), &mut phone);
    assert_eq!(phone.as_deref(), Some("2"));
    FieldEdit::apply(Some(FieldEdit::Clear), &mut phone);
    assert_eq!(phone, None);
  }

  #[test]
  fn merging_patch_keeps_absent_fields() {
    let mut stored = Candidate {
      id: Some(3),
      phone: Some("+79990000000".into()),
      sex: Some(CandidateSex::Female),
      status: CandidateStatus::Approved,
      ..Candidate::new("Anna", "Smirnova")
    };
    let incoming = Candidate { comments: Some("ok".into()), ..Candidate::new("Anna", "Ivanova") };

    CandidatePatch::merging(incoming).apply_to(&mut stored);
    assert_eq!(stored.last_name, "Ivanova");
    assert_eq!(stored.phone.as_deref(), Some("+79990000000"));
    assert_eq!(stored.sex, Some(CandidateSex::Female));
    assert_eq!(stored.comments.as_deref(), Some("ok"));
    assert_eq!((stored.id, stored.status), (Some(3), CandidateStatus::Approved));
  }

  #[test]
  fn replacing_patch_clears_absent_fields() {
    let mut stored = Candidate {
      phone: Some("+79990000000".into()),
      sex: Some(CandidateSex::Female),
      ..Candidate::new("Anna", "Smirnova")
    };
    CandidatePatch::replacing(Candidate::new("Anna", "Smirnova")).apply_to(&mut stored);
    assert_eq!(stored.phone, None);
    assert_eq!(stored.sex, None);
  }
}
