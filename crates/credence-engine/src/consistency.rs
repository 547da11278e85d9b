//! Consistency scoring between two statements.
//!
//! [`HashedCosine`] hashes terms into fixed-dimension buckets weighted by term
//! frequency and compares the resulting vectors by cosine similarity. Every
//! weight is non-negative, so the similarity is already in [0, 1] and the
//! model reports [`SimilarityRange::Unsigned`].

use std::collections::BTreeMap;

use credence_core::{
  Error, Result,
  model::{SimilarityModel, SimilarityRange},
};

/// Hashed term-frequency cosine similarity.
#[derive(Debug, Clone)]
pub struct HashedCosine {
  dimensions: usize,
}

impl HashedCosine {
  /// Fails with [`Error::ModelUnavailable`] if `dimensions` is zero.
  pub fn new(dimensions: usize) -> Result<Self> {
    if dimensions == 0 {
      return Err(Error::ModelUnavailable(
        "similarity dimensions must be positive".to_owned(),
      ));
    }
    Ok(Self { dimensions })
  }

  pub fn dimensions(&self) -> usize { self.dimensions }

  /// Hash a term into a bucket index using FNV-1a.
  fn hash_term(term: &str, dims: usize) -> usize {
    let mut h: u64 = 0xcbf29ce484222325;
    for b in term.as_bytes() {
      h ^= *b as u64;
      h = h.wrapping_mul(0x100000001b3);
    }
    (h % dims as u64) as usize
  }

  /// Lowercase alphanumeric terms of at least two characters.
  fn tokenize(text: &str) -> Vec<String> {
    text
      .split(|c: char| !c.is_alphanumeric())
      .filter(|s| s.chars().count() >= 2)
      .map(str::to_lowercase)
      .collect()
  }

  /// Term-frequency vector; longer terms weigh more.
  fn vector(&self, tokens: &[String]) -> Vec<f64> {
    let mut vec = vec![0.0f64; self.dimensions];
    // Ordered so colliding buckets always sum in the same order.
    let mut tf: BTreeMap<&str, f64> = BTreeMap::new();
    for tok in tokens {
      *tf.entry(tok.as_str()).or_default() += 1.0;
    }

    let total = tokens.len() as f64;
    for (term, count) in tf {
      let weight = 1.0 + (term.chars().count() as f64).ln();
      vec[Self::hash_term(term, self.dimensions)] += count / total * weight;
    }
    vec
  }
}

/// Text reduced to what a term-less comparison can still distinguish.
fn literal(text: &str) -> String { text.trim().to_lowercase() }

impl SimilarityModel for HashedCosine {
  fn similarity(&self, a: &str, b: &str) -> f64 {
    let ta = Self::tokenize(a);
    let tb = Self::tokenize(b);

    // Without terms on one side only the literal text can match.
    if ta.is_empty() || tb.is_empty() {
      let same = ta.is_empty() && tb.is_empty() && literal(a) == literal(b);
      return if same { 1.0 } else { 0.0 };
    }

    let va = self.vector(&ta);
    let vb = self.vector(&tb);
    if va == vb {
      return 1.0;
    }
    cosine_similarity(&va, &vb)
  }

  fn range(&self) -> SimilarityRange { SimilarityRange::Unsigned }
}

/// Cosine similarity between two vectors.
/// Returns 0.0 for mismatched, empty, or zero-magnitude vectors.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
  if a.len() != b.len() || a.is_empty() {
    return 0.0;
  }
  let (mut dot, mut mag_a, mut mag_b) = (0.0f64, 0.0f64, 0.0f64);
  for (x, y) in a.iter().zip(b) {
    dot += x * y;
    mag_a += x * x;
    mag_b += y * y;
  }
  let denom = mag_a.sqrt() * mag_b.sqrt();
  if denom < f64::EPSILON {
    0.0
  } else {
    (dot / denom).clamp(-1.0, 1.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn model() -> HashedCosine { HashedCosine::new(512).unwrap() }

  #[test]
  fn zero_dimensions_rejected() {
    assert!(matches!(
      HashedCosine::new(0),
      Err(Error::ModelUnavailable(_))
    ));
  }

  #[test]
  fn identical_texts_score_one() {
    let m = model();
    let t = "He left through the back door around nine";
    assert_eq!(m.similarity(t, t), 1.0);
    assert_eq!(m.similarity("?!", "?!"), 1.0);
  }

  #[test]
  fn different_termless_texts_score_zero() {
    let m = model();
    assert_eq!(m.similarity("Y.", "N."), 0.0);
    assert_eq!(m.similarity("a", "b"), 0.0);
    assert_eq!(m.similarity("I", "?"), 0.0);
    assert_eq!(m.similarity("?", "hello there"), 0.0);
    assert_eq!(m.similarity("Y.", " y. "), 1.0);
  }

  #[test]
  fn case_and_punctuation_do_not_matter() {
    let m = model();
    assert_eq!(m.similarity("He ran.", "he RAN"), 1.0);
  }

  #[test]
  fn related_retellings_beat_unrelated_ones() {
    let m = model();
    let a = "the man in the red jacket left the store at nine";
    let b = "a man wearing a red jacket walked out of the store around nine";
    let c = "my sister cooked pasta for dinner yesterday";
    assert!(m.similarity(a, b) > m.similarity(a, c));
  }

  #[test]
  fn disjoint_terms_score_low() {
    let m = HashedCosine::new(4096).unwrap();
    let s = m.similarity("red jacket", "blue sedan");
    assert!(s < 0.5, "got {s}");
  }

  #[test]
  fn symmetric() {
    let m = model();
    let a = "I saw him at the bus stop";
    let b = "He was waiting at the stop for the bus when I saw him";
    assert_eq!(m.similarity(a, b), m.similarity(b, a));
  }

  #[test]
  fn cosine_edge_cases() {
    assert_eq!(cosine_similarity(&[], &[]), 0.0);
    assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
    assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-12);
  }
}
