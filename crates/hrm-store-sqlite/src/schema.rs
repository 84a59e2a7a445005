//! SQL schema for the HRM SQLite store.
//!
//! Executed on every connection; idempotent thanks to
//! `CREATE TABLE IF NOT EXISTS`. There is no migration mechanism.

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS candidates (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name  TEXT    NOT NULL,
    last_name   TEXT    NOT NULL,
    phone       TEXT,
    birth_date  TEXT,               -- ISO 8601 date, YYYY-MM-DD
    sex         INTEGER,            -- 1 = male, 2 = female
    status      INTEGER NOT NULL DEFAULT 1,
    comments    TEXT
);
";

/// Column list shared by every `SELECT`, in [`crate::encode::RawCandidate`]
/// field order.
pub const COLUMNS: &str =
  "id, first_name, last_name, phone, birth_date, sex, status, comments";

/// Remove every row and restart id assignment at 1.
pub const CLEAR: &str = "
DELETE FROM candidates;
DELETE FROM sqlite_sequence WHERE name = 'candidates';
";
