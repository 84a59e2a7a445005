//! Dispatch of parsed commands onto the use-case layer.

use anyhow::{Context, Result};
use hrm_core::{
  candidate::{Candidate, CandidatePatch},
  store::CandidateRepository,
  usecases::UseCases,
};

use crate::{
  cli::{AddArgs, Command, EditArgs},
  prompt, render,
};

/// Run one command against `uc`, printing results to stdout.
pub async fn run<R: CandidateRepository>(uc: &UseCases<R>, command: Command) -> Result<()> {
  match command {
    Command::Add(args) => {
      let candidate = candidate_from_args(args);
      let name = candidate.full_name();
      let id = uc.register(candidate).await.context("failed to register candidate")?;
      println!("Candidate {name} registered with ID: {id}");
    }
    Command::AddInteractive => {
      let candidate = prompt::new_candidate()?;
      let name = candidate.full_name();
      let id = uc.register(candidate).await.context("failed to register candidate")?;
      println!("Candidate {name} registered with ID: {id}");
    }
    Command::Get { id, json } => {
      let candidate = uc.get(id).await?;
      if json {
        println!("{}", serde_json::to_string_pretty(&candidate)?);
      } else {
        print!("{}", render::detail(&candidate));
      }
    }
    Command::List { json } => {
      let candidates = uc.list_all().await?;
      if json {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
      } else {
        print!("{}", render::table(&candidates));
      }
    }
    Command::Edit(args) => {
      let id = args.id;
      let edited = uc.update(id, patch_from_args(args)).await?;
      println!("Candidate {id} updated");
      print!("{}", render::detail(&edited));
    }
    Command::EditInteractive { id } => {
      let existing = uc.get(id).await?;
      let filled = prompt::edit_candidate(existing)?;
      let edited = uc.update(id, CandidatePatch::replacing(filled)).await?;
      println!("Candidate {id} updated");
      print!("{}", render::detail(&edited));
    }
    Command::Delete { id } => {
      uc.delete(id).await?;
      println!("Candidate {id} deleted");
    }
    Command::Clear { force } => {
      if !force && !prompt::confirm_clear()? {
        println!("Aborted");
        return Ok(());
      }
      uc.clear_all().await?;
      println!("All candidates deleted");
    }
    Command::Count => {
      println!("{}", uc.count().await?);
    }
    Command::Approve { id } => {
      uc.approve(id).await?;
      println!("Candidate {id} approved");
    }
    Command::Reject { id } => {
      uc.reject(id).await?;
      println!("Candidate {id} rejected");
    }
  }

  Ok(())
}

fn candidate_from_args(args: AddArgs) -> Candidate {
  Candidate {
    phone: args.phone,
    birth_date: args.birth_date,
    sex: args.sex,
    comments: args.comments,
    ..Candidate::new(args.first_name, args.last_name)
  }
}

/// Only the flags given to `edit` become changes.
fn patch_from_args(args: EditArgs) -> CandidatePatch {
  CandidatePatch {
    first_name: args.first_name,
    last_name:  args.last_name,
    phone:      args.phone,
    birth_date: args.birth_date,
    sex:        args.sex,
    comments:   args.comments,
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use clap::Parser;
  use hrm_core::candidate::{CandidateSex, CandidateStatus};

  use super::*;
  use crate::cli::Cli;

  fn parse(args: &[&str]) -> Command {
    Cli::try_parse_from(std::iter::once("hrm").chain(args.iter().copied()))
      .unwrap()
      .command
  }

  #[test]
  fn add_flags_build_a_registered_candidate() {
    let Command::Add(args) = parse(&[
      "add", "-f", "Ivan", "-l", "Petrov", "-p", "+79990000000", "-b", "1990-01-01", "-s", "m",
    ]) else {
      panic!("expected add")
    };
    let c = candidate_from_args(args);
    assert_eq!(c.id, None);
    assert_eq!(c.status, CandidateStatus::Registered);
    assert_eq!(c.phone.as_deref(), Some("+79990000000"));
    assert_eq!(c.birth_date, NaiveDate::from_ymd_opt(1990, 1, 1));
    assert_eq!(c.sex, Some(CandidateSex::Male));
    assert_eq!(c.comments, None);
  }

  #[test]
  fn edit_keeps_fields_that_were_not_given() {
    let stored = Candidate {
      id: Some(4),
      phone: Some("+79990000000".into()),
      sex: Some(CandidateSex::Female),
      comments: Some("ok".into()),
      ..Candidate::new("Anna", "Smirnova")
    };
    let Command::Edit(args) = parse(&["edit", "4", "-l", "Ivanova", "--comments", ""]) else {
      panic!("expected edit")
    };

    let mut edited = stored.clone();
    patch_from_args(args).apply_to(&mut edited);
    assert_eq!(edited.first_name, "Anna");
    assert_eq!(edited.last_name, "Ivanova");
    assert_eq!(edited.phone, stored.phone);
    assert_eq!(edited.sex, stored.sex);
    assert_eq!(edited.comments, None);
    assert_eq!(edited.id, Some(4));
  }
}
