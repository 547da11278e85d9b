//! [`CredibilityEngine`], the façade the surrounding application calls.

use credence_core::{
  Error, Result,
  model::{PolarityModel, SimilarityModel},
  score::{Cooperation, Evaluation, NewScore, ScoreRecord},
  statement::{NewStatement, Statement},
  store::WorkflowStore,
};

use crate::{
  aggregate::{self, ConfidencePolicy, check_range},
  config::EngineConfig,
  consistency::HashedCosine,
  error::AssessError,
  sentiment::LexiconPolarity,
};

/// Composes a polarity model and a similarity model into credibility scores.
///
/// Holds no per-call state; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct CredibilityEngine<P = LexiconPolarity, M = HashedCosine> {
  polarity:   P,
  similarity: M,
  policy:     ConfidencePolicy,
}

impl CredibilityEngine {
  /// Build the bundled models from `config`.
  ///
  /// Fails with [`Error::ModelUnavailable`] if the lexicon cannot be loaded
  /// or the similarity model is misconfigured.
  pub fn from_config(config: &EngineConfig) -> Result<Self> {
    let polarity = match &config.lexicon_path {
      Some(path) => LexiconPolarity::from_file(path)?,
      None => LexiconPolarity::new(),
    };
    let similarity = HashedCosine::new(config.similarity_dimensions)?;
    tracing::info!(
      policy = ?config.confidence_policy,
      lexicon_entries = polarity.len(),
      dimensions = similarity.dimensions(),
      "credibility engine ready"
    );
    Ok(Self::new(polarity, similarity, config.confidence_policy))
  }
}

impl<P, M> CredibilityEngine<P, M>
where
  P: PolarityModel,
  M: SimilarityModel,
{
  pub fn new(polarity: P, similarity: M, policy: ConfidencePolicy) -> Self {
    Self { polarity, similarity, policy }
  }

  pub fn policy(&self) -> ConfidencePolicy { self.policy }

  // ── Scores ──────────────────────────────────────────────────────────────

  /// Polarity of `text` in [-1, 1].
  pub fn score_polarity(&self, text: &str) -> Result<f64> {
    require_text("statement text", text)?;
    check_range("polarity", self.polarity.compound(text), -1.0, 1.0)
  }

  /// `Cooperative` when the polarity is non-negative.
  pub fn classify_cooperation(&self, text: &str) -> Result<Cooperation> {
    self.score_polarity(text).map(Cooperation::from_polarity)
  }

  /// Similarity of two statements in [0, 1]. Symmetric in its arguments.
  pub fn score_consistency(&self, text_a: &str, text_b: &str) -> Result<f64> {
    require_text("statement text", text_a)?;
    require_text("statement text", text_b)?;
    let raw = self.similarity.similarity(text_a, text_b);
    check_range(
      "consistency",
      self.similarity.range().normalize(raw),
      0.0,
      1.0,
    )
  }

  /// Confidence in [0, 1] under the configured [`ConfidencePolicy`].
  pub fn score_confidence(&self, emotion: f64, consistency: f64) -> Result<f64> {
    aggregate::score_confidence(emotion, consistency, self.policy)
  }

  /// Score `new_text`, comparing it with `prior_text` when there is one.
  pub fn evaluate_statement(
    &self,
    new_text: &str,
    prior_text: Option<&str>,
  ) -> Result<Evaluation> {
    let emotion_score = self.score_polarity(new_text)?;
    let cooperation = Cooperation::from_polarity(emotion_score);

    let (consistency_score, confidence_score) = match prior_text {
      Some(prior) => {
        let consistency = self.score_consistency(new_text, prior)?;
        let confidence = self.score_confidence(emotion_score, consistency)?;
        (Some(consistency), Some(confidence))
      }
      None => (None, None),
    };

    tracing::debug!(
      emotion_score,
      ?consistency_score,
      ?confidence_score,
      ?cooperation,
      "evaluated statement"
    );

    Ok(Evaluation {
      cooperation,
      emotion_score,
      consistency_score,
      confidence_score,
    })
  }

  // ── Store-backed assessment ─────────────────────────────────────────────

  /// Score the latest statement by `person_id` in `case_id` against the one
  /// before it and record the result.
  ///
  /// Returns `None` if the person has no statements in the case.
  pub async fn assess<S: WorkflowStore>(
    &self,
    store: &S,
    person_id: i64,
    case_id: i64,
  ) -> Result<Option<ScoreRecord>, AssessError<S::Error>> {
    let statements = store
      .get_statements_for(person_id, case_id)
      .await
      .map_err(AssessError::Store)?;

    let Some((latest, earlier)) = statements.split_last() else {
      return Ok(None);
    };
    let record = self.score_and_record(store, latest, earlier.last()).await?;
    Ok(Some(record))
  }

  /// Append a statement and score it against the statement preceding it.
  pub async fn submit_statement<S: WorkflowStore>(
    &self,
    store: &S,
    input: NewStatement,
  ) -> Result<(Statement, ScoreRecord), AssessError<S::Error>> {
    require_text("statement text", &input.text)?;

    let statement = store.add_statement(input).await.map_err(AssessError::Store)?;
    tracing::info!(
      person_id = statement.person_id,
      case_id = statement.case_id,
      position = statement.position,
      "statement recorded"
    );

    let statements = store
      .get_statements_for(statement.person_id, statement.case_id)
      .await
      .map_err(AssessError::Store)?;
    let prior = statements
      .iter()
      .find(|s| s.position + 1 == statement.position);

    let record = self.score_and_record(store, &statement, prior).await?;
    Ok((statement, record))
  }

  async fn score_and_record<S: WorkflowStore>(
    &self,
    store: &S,
    statement: &Statement,
    prior: Option<&Statement>,
  ) -> Result<ScoreRecord, AssessError<S::Error>> {
    let evaluation = self
      .evaluate_statement(&statement.text, prior.map(|p| p.text.as_str()))?;

    store
      .record_score(NewScore {
        person_id: statement.person_id,
        case_id: statement.case_id,
        position: statement.position,
        evaluation,
      })
      .await
      .map_err(AssessError::Store)
  }
}

fn require_text(field: &'static str, text: &str) -> Result<()> {
  if text.trim().is_empty() {
    tracing::warn!(field, "rejected empty input");
    return Err(Error::EmptyInput(field));
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use credence_core::model::SimilarityRange;
  use proptest::prelude::*;

  use super::*;

  fn engine() -> CredibilityEngine {
    CredibilityEngine::from_config(&EngineConfig::default()).unwrap()
  }

  /// A similarity model reporting in [-1, 1].
  struct SignedStub(f64);

  impl SimilarityModel for SignedStub {
    fn similarity(&self, a: &str, b: &str) -> f64 {
      if a == b { 1.0 } else { self.0 }
    }

    fn range(&self) -> SimilarityRange { SimilarityRange::Signed }
  }

  struct FixedPolarity(f64);

  impl PolarityModel for FixedPolarity {
    fn compound(&self, _text: &str) -> f64 { self.0 }
  }

  // ── Sentiment ─────────────────────────────────────────────────────────

  #[test]
  fn empty_text_is_rejected() {
    let e = engine();
    assert!(matches!(e.score_polarity(""), Err(Error::EmptyInput(_))));
    assert!(matches!(e.score_polarity("   \n\t"), Err(Error::EmptyInput(_))));
    assert!(matches!(e.classify_cooperation(""), Err(Error::EmptyInput(_))));
  }

  #[test]
  fn scenario_verdicts() {
    let e = engine();
    assert_eq!(
      e.classify_cooperation("I saw the defendant leave the scene calmly").unwrap(),
      Cooperation::Cooperative
    );
    assert_eq!(
      e.classify_cooperation("I refuse to say anything, this is outrageous").unwrap(),
      Cooperation::NonCooperative
    );
  }

  #[test]
  fn zero_polarity_resolves_to_cooperative() {
    let e = CredibilityEngine::new(
      FixedPolarity(0.0),
      HashedCosine::new(64).unwrap(),
      ConfidencePolicy::Clamp,
    );
    assert_eq!(e.classify_cooperation("anything").unwrap(), Cooperation::Cooperative);
  }

  // ── Consistency ───────────────────────────────────────────────────────

  #[test]
  fn consistency_rejects_empty_either_side() {
    let e = engine();
    assert!(matches!(e.score_consistency("", "x y"), Err(Error::EmptyInput(_))));
    assert!(matches!(e.score_consistency("x y", " "), Err(Error::EmptyInput(_))));
  }

  #[test]
  fn signed_models_are_normalised() {
    let e = CredibilityEngine::new(
      LexiconPolarity::new(),
      SignedStub(-0.5),
      ConfidencePolicy::Clamp,
    );
    assert_eq!(e.score_consistency("a b", "c d").unwrap(), 0.25);
    assert_eq!(e.score_consistency("a b", "a b").unwrap(), 1.0);
  }

  // ── Evaluation ────────────────────────────────────────────────────────

  #[test]
  fn evaluation_without_prior_has_no_consistency() {
    let ev = engine().evaluate_statement("I was glad to help", None).unwrap();
    assert_eq!(ev.cooperation, Cooperation::Cooperative);
    assert!(ev.emotion_score > 0.0);
    assert!(ev.consistency_score.is_none());
    assert!(ev.confidence_score.is_none());
  }

  #[test]
  fn identical_retelling_has_full_consistency() {
    let e = engine();
    let text = "I saw the defendant leave the scene calmly";
    let ev = e.evaluate_statement(text, Some(text)).unwrap();
    assert_eq!(ev.consistency_score, Some(1.0));
    assert_eq!(ev.confidence_score, Some((ev.emotion_score + 1.0) / 2.0));
  }

  #[test]
  fn hostile_identical_retelling_is_still_bounded() {
    let e = engine();
    let text = "I refuse to say anything, this is outrageous";
    let ev = e.evaluate_statement(text, Some(text)).unwrap();
    let confidence = ev.confidence_score.unwrap();
    assert!((0.0..=1.0).contains(&confidence));
    assert_eq!(confidence, (ev.emotion_score + 1.0) / 2.0);
  }

  #[test]
  fn blank_prior_is_rejected() {
    let err = engine().evaluate_statement("I saw him", Some("  ")).unwrap_err();
    assert!(matches!(err, Error::EmptyInput(_)));
  }

  #[test]
  fn rescale_policy_is_applied() {
    let e = CredibilityEngine::new(
      FixedPolarity(-1.0),
      HashedCosine::new(64).unwrap(),
      ConfidencePolicy::Rescale,
    );
    let ev = e.evaluate_statement("same words", Some("same words")).unwrap();
    assert_eq!(ev.confidence_score, Some(0.5));
  }

  #[test]
  fn bad_lexicon_path_fails_construction() {
    let config = EngineConfig {
      lexicon_path: Some("/nonexistent/lexicon.tsv".into()),
      ..EngineConfig::default()
    };
    assert!(matches!(
      CredibilityEngine::from_config(&config),
      Err(Error::ModelUnavailable(_))
    ));
  }

  #[cfg(debug_assertions)]
  #[test]
  #[should_panic(expected = "polarity out of range")]
  fn misbehaving_model_trips_range_check() {
    let e = CredibilityEngine::new(
      FixedPolarity(1.5),
      HashedCosine::new(64).unwrap(),
      ConfidencePolicy::Clamp,
    );
    let _ = e.score_polarity("anything");
  }

  // ── Properties ────────────────────────────────────────────────────────

  fn text() -> impl Strategy<Value = String> {
    prop_oneof![
      "[A-Za-z!?,.' ]{0,48}[A-Za-z]{1,8}[A-Za-z!?,.' ]{0,48}",
      termless(),
    ]
  }

  /// Non-blank text with no term of two or more letters.
  fn termless() -> impl Strategy<Value = String> {
    prop_oneof![
      "[!?,.']{1,6}",
      "[A-Za-z]",
      "[A-Za-z][!?.]{1,2}",
      " ?[A-Za-z] [!?,.]",
    ]
  }

  proptest! {
    #[test]
    fn polarity_is_bounded(t in text()) {
      let p = engine().score_polarity(&t).unwrap();
      prop_assert!((-1.0..=1.0).contains(&p));
    }

    #[test]
    fn verdict_follows_polarity_sign(t in text()) {
      let e = engine();
      let p = e.score_polarity(&t).unwrap();
      let verdict = e.classify_cooperation(&t).unwrap();
      prop_assert_eq!(verdict == Cooperation::Cooperative, p >= 0.0);
    }

    #[test]
    fn consistency_is_bounded_and_symmetric(a in text(), b in text()) {
      let e = engine();
      let ab = e.score_consistency(&a, &b).unwrap();
      let ba = e.score_consistency(&b, &a).unwrap();
      prop_assert!((0.0..=1.0).contains(&ab));
      prop_assert_eq!(ab, ba);
    }

    #[test]
    fn self_consistency_is_maximal(a in text()) {
      prop_assert_eq!(engine().score_consistency(&a, &a).unwrap(), 1.0);
    }

    #[test]
    fn different_termless_texts_are_not_consistent(
      a in termless(),
      b in termless(),
    ) {
      prop_assume!(a.trim().to_lowercase() != b.trim().to_lowercase());
      prop_assert_eq!(engine().score_consistency(&a, &b).unwrap(), 0.0);
    }
  }
}
