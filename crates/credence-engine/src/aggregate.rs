//! Confidence aggregation and score-range checks.

use credence_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// How the signed emotion score ([-1, 1]) is reconciled with the [0, 1]
/// confidence range.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ConfidencePolicy {
  /// `(emotion + consistency) / 2`, clamped to [0, 1].
  #[default]
  Clamp,
  /// Emotion is first mapped to `(emotion + 1) / 2`, then averaged with
  /// consistency.
  Rescale,
}

/// Combine an emotion score and a consistency score into a confidence score
/// in [0, 1].
pub fn score_confidence(
  emotion: f64,
  consistency: f64,
  policy: ConfidencePolicy,
) -> Result<f64> {
  check_input("emotion score", emotion, -1.0, 1.0)?;
  check_input("consistency score", consistency, 0.0, 1.0)?;

  let confidence = match policy {
    ConfidencePolicy::Clamp => ((emotion + consistency) / 2.0).clamp(0.0, 1.0),
    ConfidencePolicy::Rescale => ((emotion + 1.0) / 2.0 + consistency) / 2.0,
  };
  check_range("confidence score", confidence, 0.0, 1.0)
}

/// Reject caller-supplied scores that are non-finite or out of their domain.
fn check_input(what: &'static str, value: f64, lo: f64, hi: f64) -> Result<()> {
  if value.is_finite() && (lo..=hi).contains(&value) {
    Ok(())
  } else {
    tracing::warn!(what, value, "rejected score input");
    Err(Error::InvalidScore { what, value })
  }
}

/// Verify a computed score lies in `[lo, hi]`.
///
/// A violation means a normalisation bug: it is logged, trips a debug
/// assertion, and is otherwise returned as [`Error::RangeViolation`].
pub(crate) fn check_range(
  what: &'static str,
  value: f64,
  lo: f64,
  hi: f64,
) -> Result<f64> {
  if value.is_finite() && (lo..=hi).contains(&value) {
    return Ok(value);
  }
  tracing::error!(what, value, lo, hi, "score outside its documented bound");
  debug_assert!(false, "{what} out of range: {value}");
  Err(Error::RangeViolation { what, value })
}

#[cfg(test)]
mod tests {
  use proptest::prelude::*;

  use super::*;

  #[test]
  fn clamp_is_the_mean_when_non_negative() {
    let c = score_confidence(0.4, 0.8, ConfidencePolicy::Clamp).unwrap();
    assert!((c - 0.6).abs() < 1e-12);
  }

  #[test]
  fn clamp_floors_negative_means() {
    let c = score_confidence(-1.0, 0.0, ConfidencePolicy::Clamp).unwrap();
    assert_eq!(c, 0.0);
  }

  #[test]
  fn rescale_maps_extremes() {
    assert_eq!(
      score_confidence(-1.0, 0.0, ConfidencePolicy::Rescale).unwrap(),
      0.0
    );
    assert_eq!(
      score_confidence(1.0, 1.0, ConfidencePolicy::Rescale).unwrap(),
      1.0
    );
    assert_eq!(
      score_confidence(0.0, 0.5, ConfidencePolicy::Rescale).unwrap(),
      0.5
    );
  }

  #[test]
  fn non_finite_input_rejected() {
    let err = score_confidence(f64::NAN, 0.5, ConfidencePolicy::Clamp).unwrap_err();
    assert!(matches!(err, Error::InvalidScore { what: "emotion score", .. }));
    let err =
      score_confidence(0.5, f64::INFINITY, ConfidencePolicy::Clamp).unwrap_err();
    assert!(matches!(err, Error::InvalidScore { what: "consistency score", .. }));
  }

  #[test]
  fn out_of_domain_input_rejected() {
    assert!(score_confidence(1.5, 0.5, ConfidencePolicy::Clamp).is_err());
    assert!(score_confidence(0.5, -0.1, ConfidencePolicy::Clamp).is_err());
  }

  #[test]
  fn in_range_value_passes_check() {
    assert_eq!(check_range("x", 1.0, 0.0, 1.0).unwrap(), 1.0);
  }

  #[cfg(debug_assertions)]
  #[test]
  #[should_panic(expected = "out of range")]
  fn range_violation_trips_debug_assertion() {
    let _ = check_range("confidence score", 1.5, 0.0, 1.0);
  }

  #[cfg(not(debug_assertions))]
  #[test]
  fn range_violation_is_reported() {
    let err = check_range("confidence score", 1.5, 0.0, 1.0).unwrap_err();
    assert!(matches!(err, Error::RangeViolation { .. }));
  }

  proptest! {
    #[test]
    fn clamp_policy_is_clamped_mean(e in -1.0f64..=1.0, c in 0.0f64..=1.0) {
      let got = score_confidence(e, c, ConfidencePolicy::Clamp).unwrap();
      prop_assert_eq!(got, ((e + c) / 2.0).clamp(0.0, 1.0));
    }

    #[test]
    fn both_policies_stay_in_unit_range(e in -1.0f64..=1.0, c in 0.0f64..=1.0) {
      for policy in [ConfidencePolicy::Clamp, ConfidencePolicy::Rescale] {
        let got = score_confidence(e, c, policy).unwrap();
        prop_assert!((0.0..=1.0).contains(&got));
      }
    }
  }
}
