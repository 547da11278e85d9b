//! Engine configuration, deserialised from the `[engine]` table of the
//! server configuration.

use std::path::PathBuf;

use serde::Deserialize;

use crate::aggregate::ConfidencePolicy;

fn default_dimensions() -> usize { 512 }

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
  /// How the signed emotion score is reconciled with the [0, 1] confidence
  /// range.
  #[serde(default)]
  pub confidence_policy:     ConfidencePolicy,
  /// Bucket count of the hashed term vectors used for consistency scoring.
  #[serde(default = "default_dimensions")]
  pub similarity_dimensions: usize,
  /// Extra valence lexicon (`word<TAB>valence[...]` per line) merged over
  /// the built-in one.
  #[serde(default)]
  pub lexicon_path:          Option<PathBuf>,
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      confidence_policy:     ConfidencePolicy::default(),
      similarity_dimensions: default_dimensions(),
      lexicon_path:          None,
    }
  }
}
