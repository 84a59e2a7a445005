//! Interactive prompts for `add-interactive` and `edit-interactive`.
//!
//! Every prompt validates with the same parsers as the command-line flags, so
//! a value accepted here is accepted by `add`/`edit` too.

use anyhow::Result;
use chrono::NaiveDate;
use dialoguer::{Confirm, Input, Select};
use hrm_core::candidate::{Candidate, CandidateSex, MAX_NAME_LEN, MAX_PHONE_LEN};

use crate::cli::{parse_date, parse_sex};

/// Ask for every field of a new candidate.
pub fn new_candidate() -> Result<Candidate> {
  fill(Candidate::new("", ""))
}

/// Ask for every field, offering the stored values as defaults.
pub fn edit_candidate(existing: Candidate) -> Result<Candidate> {
  fill(existing)
}

pub fn confirm_clear() -> Result<bool> {
  Ok(
    Confirm::new()
      .with_prompt("Delete ALL candidates?")
      .default(false)
      .interact()?,
  )
}

fn fill(mut c: Candidate) -> Result<Candidate> {
  c.first_name = required("First name", &c.first_name)?;
  c.last_name = required("Last name", &c.last_name)?;
  c.phone = optional("Phone", c.phone.as_deref(), MAX_PHONE_LEN)?;
  c.birth_date = birth_date(c.birth_date)?;
  c.sex = sex(c.sex)?;
  c.comments = optional("Comments", c.comments.as_deref(), usize::MAX)?;
  Ok(c)
}

fn required(prompt: &str, current: &str) -> Result<String> {
  let value: String = Input::new()
    .with_prompt(prompt)
    .with_initial_text(current)
    .validate_with(|s: &String| -> Result<(), String> {
      match s.trim().chars().count() {
        0 => Err("must not be empty".into()),
        n if n > MAX_NAME_LEN => Err(format!("at most {MAX_NAME_LEN} characters")),
        _ => Ok(()),
      }
    })
    .interact_text()?;
  Ok(value.trim().to_owned())
}

fn optional(prompt: &str, current: Option<&str>, max_len: usize) -> Result<Option<String>> {
  let value: String = Input::new()
    .with_prompt(format!("{prompt} (optional)"))
    .with_initial_text(current.unwrap_or_default())
    .allow_empty(true)
    .validate_with(move |s: &String| -> Result<(), String> {
      if s.trim().chars().count() > max_len {
        Err(format!("at most {max_len} characters"))
      } else {
        Ok(())
      }
    })
    .interact_text()?;
  let value = value.trim();
  Ok((!value.is_empty()).then(|| value.to_owned()))
}

fn birth_date(current: Option<NaiveDate>) -> Result<Option<NaiveDate>> {
  let value: String = Input::new()
    .with_prompt("Birth date, YYYY-MM-DD (optional)")
    .with_initial_text(current.map(|d| d.to_string()).unwrap_or_default())
    .allow_empty(true)
    .validate_with(|s: &String| -> Result<(), String> {
      if s.trim().is_empty() { Ok(()) } else { parse_date(s).map(drop) }
    })
    .interact_text()?;
  if value.trim().is_empty() {
    Ok(None)
  } else {
    Ok(Some(parse_date(&value).map_err(anyhow::Error::msg)?))
  }
}

fn sex(current: Option<CandidateSex>) -> Result<Option<CandidateSex>> {
  let items = ["not specified", "M", "F"];
  let default = match current {
    None => 0,
    Some(CandidateSex::Male) => 1,
    Some(CandidateSex::Female) => 2,
  };
  let picked = Select::new()
    .with_prompt("Sex")
    .items(&items)
    .default(default)
    .interact()?;
  match picked {
    0 => Ok(None),
    n => Ok(Some(parse_sex(items[n]).map_err(anyhow::Error::msg)?)),
  }
}
