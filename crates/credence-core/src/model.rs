//! The scoring primitives the credibility engine composes.
//!
//! Implementations must be usable from several threads at once for
//! read-only inference; anything with interior state has to guard it itself.

/// A sentiment-polarity primitive.
pub trait PolarityModel: Send + Sync {
  /// Compound polarity of `text`, nominally in [-1, 1].
  fn compound(&self, text: &str) -> f64;
}

/// The range a [`SimilarityModel`] reports in. Fixed per model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimilarityRange {
  /// [-1, 1]; normalised to [0, 1] via `(s + 1) / 2`.
  Signed,
  /// Already [0, 1]; passed through unchanged.
  Unsigned,
}

impl SimilarityRange {
  /// Map a raw similarity into [0, 1].
  pub fn normalize(self, similarity: f64) -> f64 {
    match self {
      Self::Signed => (similarity + 1.0) / 2.0,
      Self::Unsigned => similarity,
    }
  }
}

/// A semantic-similarity primitive.
pub trait SimilarityModel: Send + Sync {
  /// Raw similarity between `a` and `b`, in [`Self::range`].
  fn similarity(&self, a: &str, b: &str) -> f64;

  fn range(&self) -> SimilarityRange;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn signed_range_maps_endpoints() {
    assert_eq!(SimilarityRange::Signed.normalize(-1.0), 0.0);
    assert_eq!(SimilarityRange::Signed.normalize(1.0), 1.0);
    assert_eq!(SimilarityRange::Signed.normalize(0.0), 0.5);
  }

  #[test]
  fn unsigned_range_passes_through() {
    assert_eq!(SimilarityRange::Unsigned.normalize(0.25), 0.25);
  }
}
