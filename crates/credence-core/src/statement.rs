//! Statements, the unit the credibility engine consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A statement given by a person in the context of a case.
///
/// Positions are assigned by the store, start at 1, and increase by one per
/// (person, case) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
  pub statement_id: Uuid,
  pub person_id:    i64,
  pub case_id:      i64,
  pub position:     u32,
  /// The interview prompt this statement answers, if any.
  pub question:     Option<String>,
  pub text:         String,
  /// Server-assigned timestamp.
  pub recorded_at:  DateTime<Utc>,
}

/// Input to [`crate::store::WorkflowStore::add_statement`].
#[derive(Debug, Clone)]
pub struct NewStatement {
  pub person_id: i64,
  pub case_id:   i64,
  pub question:  Option<String>,
  pub text:      String,
}
