//! Layered settings: built-in defaults, then the optional TOML file, then
//! `HRM_*` environment variables. Command-line flags are applied last by
//! [`Settings::with_overrides`].

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Which repository implementation backs the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
  #[default]
  Json,
  Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  pub backend:   Backend,
  /// Store file for the JSON backend (`HRM_JSON_PATH`).
  pub json_path: PathBuf,
  /// Database file for the SQLite backend (`HRM_DB_PATH`).
  pub db_path:   PathBuf,
}

/// `~/.hrm`, or `./.hrm` when there is no home directory.
pub fn data_dir() -> PathBuf {
  dirs::home_dir()
    .unwrap_or_else(|| PathBuf::from("."))
    .join(".hrm")
}

pub fn default_config_file() -> PathBuf { data_dir().join("config.toml") }

impl Settings {
  /// Read settings from `file` (missing is fine) and the process environment.
  pub fn load(file: &Path) -> Result<Self, ConfigError> {
    Self::from_sources(file, Environment::with_prefix("HRM"))
  }

  fn from_sources(file: &Path, env: Environment) -> Result<Self, ConfigError> {
    let data_dir = data_dir();
    let settings: Self = Config::builder()
      .set_default("backend", "json")?
      .set_default(
        "json_path",
        data_dir.join("candidates.json").to_string_lossy().into_owned(),
      )?
      .set_default(
        "db_path",
        data_dir.join("candidates.db").to_string_lossy().into_owned(),
      )?
      .add_source(File::from(file.to_path_buf()).required(false))
      .add_source(env)
      .build()?
      .try_deserialize()?;

    Ok(Self {
      json_path: expand_tilde(&settings.json_path),
      db_path: expand_tilde(&settings.db_path),
      ..settings
    })
  }

  /// Apply command-line overrides. `storage` replaces the path of whichever
  /// backend ends up selected.
  pub fn with_overrides(mut self, backend: Option<Backend>, storage: Option<PathBuf>) -> Self {
    if let Some(backend) = backend {
      self.backend = backend;
    }
    if let Some(path) = storage {
      let path = expand_tilde(&path);
      match self.backend {
        Backend::Json => self.json_path = path,
        Backend::Sqlite => self.db_path = path,
      }
    }
    self
  }

  /// Path of the store the selected backend will use.
  pub fn storage_path(&self) -> &Path {
    match self.backend {
      Backend::Json => &self.json_path,
      Backend::Sqlite => &self.db_path,
    }
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Some(home) = dirs::home_dir()
  {
    return home.join(rest);
  }
  path.to_path_buf()
}
