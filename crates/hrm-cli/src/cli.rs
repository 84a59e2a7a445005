//! Command-line surface and boundary parsing of user input.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use hrm_core::candidate::{CandidateId, CandidateSex, FieldEdit};

use crate::settings::Backend;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "hrm", version, about = "HR candidate tracking from the command line")]
pub struct Cli {
  /// Path to a TOML config file (default: ~/.hrm/config.toml).
  #[arg(long, value_name = "FILE", global = true)]
  pub config: Option<PathBuf>,

  /// Storage backend to use, overriding the configuration.
  #[arg(long, value_enum, global = true)]
  pub backend: Option<Backend>,

  /// Storage file for the selected backend, overriding the configuration.
  #[arg(long, value_name = "PATH", global = true)]
  pub storage: Option<PathBuf>,

  #[command(subcommand)]
  pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Register a new candidate
  Add(AddArgs),
  /// Register a new candidate, prompting for each field
  AddInteractive,
  /// Show one candidate
  Get {
    id:   CandidateId,
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
  },
  /// List all candidates
  List {
    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
  },
  /// Change a candidate's details; fields not given keep their value
  Edit(EditArgs),
  /// Change a candidate's details, prompting with the current values
  EditInteractive { id: CandidateId },
  /// Delete a candidate
  Delete { id: CandidateId },
  /// Delete all candidates
  Clear {
    /// Do not ask for confirmation
    #[arg(long)]
    force: bool,
  },
  /// Print the number of candidates
  Count,
  /// Mark a candidate as approved
  Approve { id: CandidateId },
  /// Mark a candidate as rejected
  Reject { id: CandidateId },
}

#[derive(Args, Debug)]
pub struct AddArgs {
  #[arg(short = 'f', long)]
  pub first_name: String,

  #[arg(short = 'l', long)]
  pub last_name: String,

  #[arg(short = 'p', long)]
  pub phone: Option<String>,

  /// Date of birth (YYYY-MM-DD)
  #[arg(short = 'b', long, value_parser = parse_date)]
  pub birth_date: Option<NaiveDate>,

  /// M or F
  #[arg(short = 's', long, value_parser = parse_sex)]
  pub sex: Option<CandidateSex>,

  #[arg(short = 'c', long)]
  pub comments: Option<String>,
}

/// Like [`AddArgs`] but every field is optional; an empty value clears an
/// optional field.
#[derive(Args, Debug)]
pub struct EditArgs {
  pub id: CandidateId,

  #[arg(short = 'f', long)]
  pub first_name: Option<String>,

  #[arg(short = 'l', long)]
  pub last_name: Option<String>,

  #[arg(short = 'p', long, value_parser = parse_text_edit)]
  pub phone: Option<FieldEdit<String>>,

  /// Date of birth (YYYY-MM-DD), or "" to clear
  #[arg(short = 'b', long, value_parser = parse_date_edit)]
  pub birth_date: Option<FieldEdit<NaiveDate>>,

  /// M or F, or "" to clear
  #[arg(short = 's', long, value_parser = parse_sex_edit)]
  pub sex: Option<FieldEdit<CandidateSex>>,

  #[arg(short = 'c', long, value_parser = parse_text_edit)]
  pub comments: Option<FieldEdit<String>>,
}

// ─── Parsers ──────────────────────────────────────────────────────────────────

pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
  NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
    .map_err(|_| format!("invalid date {s:?}, expected YYYY-MM-DD"))
}

pub fn parse_sex(s: &str) -> Result<CandidateSex, String> {
  s.trim()
    .parse()
    .map_err(|_| format!("invalid sex {s:?}, expected M or F"))
}

fn edit_with<T>(
  s: &str,
  parse: impl FnOnce(&str) -> Result<T, String>,
) -> Result<FieldEdit<T>, String> {
  if s.trim().is_empty() {
    Ok(FieldEdit::Clear)
  } else {
    parse(s).map(FieldEdit::Set)
  }
}

pub fn parse_text_edit(s: &str) -> Result<FieldEdit<String>, String> {
  edit_with(s, |s| Ok(s.to_owned()))
}

pub fn parse_date_edit(s: &str) -> Result<FieldEdit<NaiveDate>, String> {
  edit_with(s, parse_date)
}

pub fn parse_sex_edit(s: &str) -> Result<FieldEdit<CandidateSex>, String> {
  edit_with(s, parse_sex)
}
