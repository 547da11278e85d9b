//! Score types produced by the credibility engine and persisted by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Binary verdict derived from polarity sign alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cooperation {
  Cooperative,
  NonCooperative,
}

impl Cooperation {
  /// `polarity >= 0` is cooperative. A polarity of exactly zero is
  /// cooperative too.
  pub fn from_polarity(polarity: f64) -> Self {
    if polarity >= 0.0 {
      Self::Cooperative
    } else {
      Self::NonCooperative
    }
  }

  pub fn is_cooperative(self) -> bool { matches!(self, Self::Cooperative) }
}

/// The result of scoring one statement, optionally against a prior one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
  pub cooperation:       Cooperation,
  /// Polarity in [-1, 1].
  pub emotion_score:     f64,
  /// In [0, 1]; `None` when there was no prior statement to compare with.
  pub consistency_score: Option<f64>,
  /// In [0, 1]; `None` under the same condition as `consistency_score`.
  pub confidence_score:  Option<f64>,
}

/// Input to [`crate::store::WorkflowStore::record_score`].
#[derive(Debug, Clone, Copy)]
pub struct NewScore {
  pub person_id:  i64,
  pub case_id:    i64,
  pub position:   u32,
  pub evaluation: Evaluation,
}

/// A persisted score, keyed by (person, case, position).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
  pub person_id:   i64,
  pub case_id:     i64,
  pub position:    u32,
  #[serde(flatten)]
  pub evaluation:  Evaluation,
  pub recorded_at: DateTime<Utc>,
}
