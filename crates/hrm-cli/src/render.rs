//! Plain-text rendering of candidates for the terminal.

use hrm_core::candidate::Candidate;

const EMPTY: &str = "-";

fn or_dash(v: Option<impl ToString>) -> String {
  v.map(|v| v.to_string()).unwrap_or_else(|| EMPTY.to_owned())
}

fn id_of(c: &Candidate) -> String { or_dash(c.id) }

/// One field per line.
pub fn detail(c: &Candidate) -> String {
  let rows = [
    ("ID", id_of(c)),
    ("First name", c.first_name.clone()),
    ("Last name", c.last_name.clone()),
    ("Phone", or_dash(c.phone.as_deref())),
    ("Birth date", or_dash(c.birth_date)),
    ("Sex", or_dash(c.sex)),
    ("Status", c.status.to_string()),
    ("Comments", or_dash(c.comments.as_deref())),
  ];

  rows
    .into_iter()
    .map(|(label, value)| format!("{:<11} {value}\n", format!("{label}:")))
    .collect()
}

/// An aligned table, one candidate per row.
pub fn table(candidates: &[Candidate]) -> String {
  if candidates.is_empty() {
    return "No candidates registered.\n".to_owned();
  }

  let header = ["ID", "NAME", "PHONE", "BIRTH DATE", "SEX", "STATUS"].map(str::to_owned);
  let rows: Vec<[String; 6]> = candidates
    .iter()
    .map(|c| {
      [
        id_of(c),
        c.full_name(),
        or_dash(c.phone.as_deref()),
        or_dash(c.birth_date),
        or_dash(c.sex),
        c.status.to_string(),
      ]
    })
    .collect();

  let mut widths = header.clone().map(|h| h.chars().count());
  for row in &rows {
    for (w, cell) in widths.iter_mut().zip(row) {
      *w = (*w).max(cell.chars().count());
    }
  }

  std::iter::once(&header)
    .chain(&rows)
    .map(|row| {
      let line = row
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{cell:<w$}"))
        .collect::<Vec<_>>()
        .join("  ");
      format!("{}\n", line.trim_end())
    })
    .collect()
}
