//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, statement UUIDs as hyphenated
//! lowercase strings, roles by their reference-table name.

use chrono::{DateTime, Utc};
use credence_core::{
  case::{Case, CaseProgress},
  role::RoleKind,
  score::{Cooperation, Evaluation, ScoreRecord},
  statement::Statement,
  user::User,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Cooperation ──────────────────────────────────────────────────────────────

pub fn encode_cooperation(c: Cooperation) -> &'static str {
  match c {
    Cooperation::Cooperative => "cooperative",
    Cooperation::NonCooperative => "non_cooperative",
  }
}

pub fn decode_cooperation(s: &str) -> Result<Cooperation> {
  match s {
    "cooperative" => Ok(Cooperation::Cooperative),
    "non_cooperative" => Ok(Cooperation::NonCooperative),
    other => Err(Error::Decode(format!("unknown cooperation: {other:?}"))),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read from a `User` row joined with `Role`.
pub struct RawUser {
  pub user_id:    i64,
  pub first_name: String,
  pub last_name:  String,
  pub email:      String,
  pub credential: String,
  pub role_name:  Option<String>,
  pub created_at: String,
}

impl RawUser {
  pub fn into_user(self) -> Result<User> {
    let role = self
      .role_name
      .as_deref()
      .map(str::parse::<RoleKind>)
      .transpose()?;
    Ok(User {
      user_id: self.user_id,
      first_name: self.first_name,
      last_name: self.last_name,
      email: self.email,
      credential: self.credential,
      role,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read from a `Cases` row.
pub struct RawCase {
  pub case_id:     i64,
  pub description: String,
  pub created_at:  String,
}

impl RawCase {
  pub fn into_case(self) -> Result<Case> {
    Ok(Case {
      case_id:     self.case_id,
      description: self.description,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read from a `CaseProgress` row.
pub struct RawProgress {
  pub progress_id: i64,
  pub case_id:     i64,
  pub progress:    String,
  pub recorded_at: String,
}

impl RawProgress {
  pub fn into_progress(self) -> Result<CaseProgress> {
    Ok(CaseProgress {
      progress_id: self.progress_id,
      case_id:     self.case_id,
      progress:    self.progress,
      recorded_at: decode_dt(&self.recorded_at)?,
    })
  }
}

/// Raw values read from a `Statement` row.
pub struct RawStatement {
  pub statement_id: String,
  pub person_id:    i64,
  pub case_id:      i64,
  pub position:     u32,
  pub text:         String,
  pub recorded_at:  String,
  pub question:     Option<String>,
}

impl RawStatement {
  pub fn into_statement(self) -> Result<Statement> {
    Ok(Statement {
      statement_id: decode_uuid(&self.statement_id)?,
      person_id:    self.person_id,
      case_id:      self.case_id,
      position:     self.position,
      question:     self.question,
      text:         self.text,
      recorded_at:  decode_dt(&self.recorded_at)?,
    })
  }
}

/// Raw values read from a `StatementScore` row.
pub struct RawScore {
  pub person_id:   i64,
  pub case_id:     i64,
  pub position:    u32,
  pub emotion:     f64,
  pub consistency: Option<f64>,
  pub confidence:  Option<f64>,
  pub cooperation: String,
  pub recorded_at: String,
}

impl RawScore {
  pub fn into_record(self) -> Result<ScoreRecord> {
    Ok(ScoreRecord {
      person_id:   self.person_id,
      case_id:     self.case_id,
      position:    self.position,
      evaluation:  Evaluation {
        cooperation:       decode_cooperation(&self.cooperation)?,
        emotion_score:     self.emotion,
        consistency_score: self.consistency,
        confidence_score:  self.confidence,
      },
      recorded_at: decode_dt(&self.recorded_at)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn cooperation_round_trips() {
    for c in [Cooperation::Cooperative, Cooperation::NonCooperative] {
      assert_eq!(decode_cooperation(encode_cooperation(c)).unwrap(), c);
    }
    assert!(matches!(decode_cooperation("maybe"), Err(Error::Decode(_))));
  }

  #[test]
  fn unknown_role_name_fails_decode() {
    let raw = RawUser {
      user_id:    1,
      first_name: "Ada".into(),
      last_name:  "Byron".into(),
      email:      "ada@example.com".into(),
      credential: String::new(),
      role_name:  Some("Detective".into()),
      created_at: encode_dt(Utc::now()),
    };
    assert!(matches!(raw.into_user(), Err(Error::Core(_))));
  }
}
