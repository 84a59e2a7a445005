//! `hrm` — command-line candidate tracking.
//!
//! # Usage
//!
//! ```text
//! hrm add --first-name Ivan --last-name Petrov --sex M --birth-date 1990-01-01
//! hrm list
//! hrm approve 1
//! hrm --backend sqlite count
//! ```
//!
//! Storage defaults to `~/.hrm/candidates.json`; see [`settings`] for the
//! settings file and `HRM_*` environment variables.

mod cli;
mod commands;
mod prompt;
mod render;
mod settings;

use anyhow::Context as _;
use clap::Parser;
use hrm_core::usecases::UseCases;
use hrm_store_json::{JsonRepository, JsonStore};
use hrm_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::{
  cli::Cli,
  settings::{Backend, Settings},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Logs go to stderr so command output stays clean.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  let config_file = cli.config.clone().unwrap_or_else(settings::default_config_file);
  let settings = Settings::load(&config_file)
    .with_context(|| format!("failed to read configuration from {config_file:?}"))?
    .with_overrides(cli.backend, cli.storage.clone());

  tracing::debug!(
    backend = ?settings.backend,
    path = %settings.storage_path().display(),
    "selected storage"
  );

  // The backend is chosen once here and injected into the use cases.
  match settings.backend {
    Backend::Json => {
      let store = JsonStore::open(&settings.json_path).await;
      let use_cases = UseCases::new(JsonRepository::new(&store));
      commands::run(&use_cases, cli.command).await
    }
    Backend::Sqlite => {
      let use_cases = UseCases::new(SqliteStore::new(&settings.db_path));
      commands::run(&use_cases, cli.command).await
    }
  }
}
