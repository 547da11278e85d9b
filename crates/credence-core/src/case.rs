//! Cases and their append-only progress ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An investigative case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
  pub case_id:     i64,
  pub description: String,
  pub created_at:  DateTime<Utc>,
}

/// One entry in a case's progress history. There is no fixed state machine;
/// the marker is free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseProgress {
  pub progress_id: i64,
  pub case_id:     i64,
  pub progress:    String,
  pub recorded_at: DateTime<Utc>,
}
