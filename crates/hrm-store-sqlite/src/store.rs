//! [`SqliteStore`] — the SQLite implementation of [`CandidateRepository`].

use std::path::{Path, PathBuf};

use hrm_core::{
  candidate::{Candidate, CandidateId},
  store::CandidateRepository,
};
use rusqlite::{ErrorCode, OptionalExtension as _};
use tokio_rusqlite::Connection;
use tracing::{debug, warn};

use crate::{
  Result,
  encode::{EncodedCandidate, RawCandidate},
  schema::{CLEAR, COLUMNS, SCHEMA},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A candidate store backed by a single SQLite file.
///
/// Holds only the path. Every operation opens a connection, ensures the
/// schema and readable rows, does its work and closes the connection again.
#[derive(Debug, Clone)]
pub struct SqliteStore {
  path: PathBuf,
}

impl SqliteStore {
  /// Point a store at `path`. The file is created on first use.
  pub fn new(path: impl AsRef<Path>) -> Self {
    Self { path: path.as_ref().to_path_buf() }
  }

  pub fn path(&self) -> &Path { &self.path }

  /// Open a connection scoped to one operation.
  ///
  /// A file that SQLite does not recognise as a database is removed and
  /// replaced with an empty one. A database holding a row that does not
  /// decode is emptied.
  async fn connect(&self) -> Result<Connection> {
    let conn = self.open().await?;

    if let Some(reason) = find_undecodable_row(&conn).await? {
      warn!(path = %self.path.display(), %reason, "discarding undecodable candidates");
      conn
        .call(|conn| {
          conn.execute_batch(CLEAR)?;
          Ok(())
        })
        .await?;
    }
    Ok(conn)
  }

  async fn open(&self) -> Result<Connection> {
    if let Some(parent) = self.path.parent()
      && !parent.as_os_str().is_empty()
    {
      tokio::fs::create_dir_all(parent).await?;
    }

    let conn = Connection::open(&self.path).await?;
    let init = init_schema(&conn).await;
    match init {
      Ok(()) => Ok(conn),
      Err(e) if is_corruption(&e) => {
        warn!(path = %self.path.display(), error = %e, "discarding unreadable database");
        conn.close().await.ok();
        tokio::fs::remove_file(&self.path).await?;

        let conn = Connection::open(&self.path).await?;
        init_schema(&conn).await?;
        Ok(conn)
      }
      Err(e) => Err(e.into()),
    }
  }
}

async fn init_schema(conn: &Connection) -> tokio_rusqlite::Result<()> {
  conn
    .call(|conn| {
      conn.execute_batch(SCHEMA)?;
      Ok(())
    })
    .await
}

/// Describe the first row whose columns do not convert to a [`Candidate`].
async fn find_undecodable_row(conn: &Connection) -> tokio_rusqlite::Result<Option<String>> {
  conn
    .call(|conn| {
      let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM candidates"))?;
      let mut rows = stmt.query([])?;
      while let Some(row) = rows.next()? {
        let decoded = match RawCandidate::from_row(row) {
          Ok(raw) => raw.into_candidate().map(drop).map_err(|e| e.to_string()),
          Err(e) => Err(e.to_string()),
        };
        if let Err(reason) = decoded {
          return Ok(Some(reason));
        }
      }
      Ok(None)
    })
    .await
}

fn is_corruption(e: &tokio_rusqlite::Error) -> bool {
  match e {
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(f, _)) => {
      matches!(f.code, ErrorCode::NotADatabase | ErrorCode::DatabaseCorrupt)
    }
    _ => false,
  }
}

// ─── CandidateRepository impl ────────────────────────────────────────────────

impl CandidateRepository for SqliteStore {
  type Error = crate::Error;

  async fn get_all(&self) -> Result<Vec<Candidate>> {
    let conn = self.connect().await?;

    let raws: Vec<RawCandidate> = conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {COLUMNS} FROM candidates ORDER BY id"))?;
        let rows = stmt
          .query_map([], RawCandidate::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCandidate::into_candidate).collect()
  }

  async fn get_by_id(&self, id: CandidateId) -> Result<Option<Candidate>> {
    let conn = self.connect().await?;

    let raw: Option<RawCandidate> = conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {COLUMNS} FROM candidates WHERE id = ?1"),
            rusqlite::params![id],
            RawCandidate::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawCandidate::into_candidate).transpose()
  }

  async fn insert_or_update(&self, candidate: Candidate) -> Result<CandidateId> {
    let conn = self.connect().await?;
    let explicit_id = candidate.id;
    let c = EncodedCandidate::from(candidate);

    let id = conn
      .call(move |conn| match explicit_id {
        None => {
          conn.execute(
            "INSERT INTO candidates (
               first_name, last_name, phone, birth_date, sex, status, comments
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
              c.first_name,
              c.last_name,
              c.phone,
              c.birth_date,
              c.sex,
              c.status,
              c.comments,
            ],
          )?;
          Ok(conn.last_insert_rowid())
        }
        Some(id) => {
          conn.execute(
            "INSERT INTO candidates (
               id, first_name, last_name, phone, birth_date, sex, status, comments
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(id) DO UPDATE SET
               first_name = excluded.first_name,
               last_name  = excluded.last_name,
               phone      = excluded.phone,
               birth_date = excluded.birth_date,
               sex        = excluded.sex,
               status     = excluded.status,
               comments   = excluded.comments",
            rusqlite::params![
              id,
              c.first_name,
              c.last_name,
              c.phone,
              c.birth_date,
              c.sex,
              c.status,
              c.comments,
            ],
          )?;
          Ok(id)
        }
      })
      .await?;

    debug!(id, "stored candidate");
    Ok(id)
  }

  async fn delete(&self, id: CandidateId) -> Result<()> {
    let conn = self.connect().await?;
    conn
      .call(move |conn| {
        conn.execute("DELETE FROM candidates WHERE id = ?1", rusqlite::params![id])?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn clear_all(&self) -> Result<()> {
    let conn = self.connect().await?;
    conn
      .call(|conn| {
        conn.execute_batch(CLEAR)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
