//! Sentiment scoring.
//!
//! [`LexiconPolarity`] is a rule-based valence model: each word found in the
//! lexicon contributes its valence, adjusted by the words around it, and the
//! sum is squashed into a compound score in [-1, 1].

use std::{collections::HashMap, path::Path};

use credence_core::{Error, Result, model::PolarityModel};

use crate::lexicon::{self, BOOSTERS, NEGATIONS};

/// Added to a sentiment word written in capitals when the rest of the text
/// is not.
const CAPS_INCR: f64 = 0.733;

/// Multiplier for a sentiment word preceded by a negation.
const NEGATION_SCALAR: f64 = -0.74;

/// How many preceding words can modify a sentiment word.
const WINDOW: usize = 3;

/// Normalisation constant for the compound score.
const ALPHA: f64 = 15.0;

const EXCLAMATION_INCR: f64 = 0.292;
const QUESTION_INCR: f64 = 0.18;
const QUESTION_MAX: f64 = 0.96;

/// Lexicon-and-rule polarity model.
///
/// Read-only after construction, so one instance can serve any number of
/// threads.
#[derive(Debug, Clone)]
pub struct LexiconPolarity {
  lexicon: HashMap<String, f64>,
}

impl Default for LexiconPolarity {
  fn default() -> Self { Self::new() }
}

impl LexiconPolarity {
  /// A model using the built-in lexicon only.
  pub fn new() -> Self {
    Self { lexicon: lexicon::builtin() }
  }

  /// The built-in lexicon with `extra` merged over it. Entries are held to
  /// the same rules as a lexicon file.
  pub fn with_entries(extra: HashMap<String, f64>) -> Result<Self> {
    let mut lexicon = lexicon::builtin();
    for (word, valence) in extra {
      lexicon::check_entry(&word, valence).map_err(|reason| {
        Error::ModelUnavailable(format!("lexicon entry {word:?}: {reason}"))
      })?;
      lexicon.insert(word.trim().to_lowercase(), valence);
    }
    Ok(Self { lexicon })
  }

  /// The built-in lexicon extended from a tab-separated lexicon file.
  ///
  /// Any read or parse failure is reported as
  /// [`Error::ModelUnavailable`].
  pub fn from_file(path: &Path) -> Result<Self> {
    let source = std::fs::read_to_string(path).map_err(|e| {
      Error::ModelUnavailable(format!("{}: {e}", path.display()))
    })?;
    let extra = lexicon::parse_lexicon(&source)?;
    tracing::info!(
      path = %path.display(),
      entries = extra.len(),
      "loaded sentiment lexicon"
    );
    Self::with_entries(extra)
  }

  pub fn len(&self) -> usize { self.lexicon.len() }

  pub fn is_empty(&self) -> bool { self.lexicon.is_empty() }

  /// Valence of the word at `i`, after caps, booster and negation rules.
  fn valence_at(&self, tokens: &[Token<'_>], i: usize, cap_diff: bool) -> f64 {
    let token = &tokens[i];
    let Some(&base) = self.lexicon.get(&token.lower) else {
      return 0.0;
    };

    let mut valence = base;
    if cap_diff && token.is_all_caps() {
      valence += CAPS_INCR.copysign(valence);
    }

    for dist in 1..=WINDOW.min(i) {
      let prev = &tokens[i - dist];
      if !self.lexicon.contains_key(&prev.lower) {
        let mut scalar = booster_scalar(prev, valence, cap_diff);
        match dist {
          2 => scalar *= 0.95,
          3 => scalar *= 0.9,
          _ => {}
        }
        valence += scalar;
      }
      if prev.is_negation() {
        valence *= NEGATION_SCALAR;
      }
    }

    valence
  }
}

impl PolarityModel for LexiconPolarity {
  fn compound(&self, text: &str) -> f64 {
    let tokens = tokenize(text);
    if tokens.is_empty() {
      return 0.0;
    }

    let caps = tokens.iter().filter(|t| t.is_all_caps()).count();
    let cap_diff = caps > 0 && caps < tokens.len();

    let mut sentiments: Vec<f64> = (0..tokens.len())
      .map(|i| {
        let lower = tokens[i].lower.as_str();
        let kind_of = lower == "kind"
          && tokens.get(i + 1).is_some_and(|next| next.lower == "of");
        if booster(lower).is_some() || kind_of {
          0.0
        } else {
          self.valence_at(&tokens, i, cap_diff)
        }
      })
      .collect();

    apply_contrast(&tokens, &mut sentiments);

    let sum: f64 = sentiments.iter().sum();
    normalize(sum + punctuation_emphasis(text, sum))
  }
}

// ─── Tokens ──────────────────────────────────────────────────────────────────

struct Token<'a> {
  raw:   &'a str,
  lower: String,
}

impl Token<'_> {
  fn is_all_caps(&self) -> bool {
    self.raw.chars().any(char::is_alphabetic)
      && !self.raw.chars().any(char::is_lowercase)
  }

  fn is_negation(&self) -> bool {
    let bare = self.lower.replace(['\'', '\u{2019}'], "");
    NEGATIONS.contains(&bare.as_str())
      || self.lower.contains("n't")
      || self.lower.contains("n\u{2019}t")
  }
}

/// Whitespace-separated words with surrounding punctuation stripped.
fn tokenize(text: &str) -> Vec<Token<'_>> {
  text
    .split_whitespace()
    .map(|w| w.trim_matches(|c: char| c.is_ascii_punctuation()))
    .filter(|w| !w.is_empty())
    .map(|raw| Token { raw, lower: raw.to_lowercase() })
    .collect()
}

// ─── Rules ───────────────────────────────────────────────────────────────────

fn booster(lower: &str) -> Option<f64> {
  BOOSTERS.iter().find(|(w, _)| *w == lower).map(|(_, v)| *v)
}

/// Intensity shift a booster/dampener applies to a word of `valence`.
fn booster_scalar(word: &Token<'_>, valence: f64, cap_diff: bool) -> f64 {
  let Some(mut scalar) = booster(&word.lower) else {
    return 0.0;
  };
  if valence < 0.0 {
    scalar = -scalar;
  }
  if cap_diff && word.is_all_caps() {
    scalar += CAPS_INCR.copysign(valence);
  }
  scalar
}

/// "X but Y": damp everything before the first `but`, amplify after it.
fn apply_contrast(tokens: &[Token<'_>], sentiments: &mut [f64]) {
  let Some(pivot) = tokens.iter().position(|t| t.lower == "but") else {
    return;
  };
  for (i, s) in sentiments.iter_mut().enumerate() {
    if i < pivot {
      *s *= 0.5;
    } else if i > pivot {
      *s *= 1.5;
    }
  }
}

/// Emphasis from `!` and `?`, signed in the direction of `sum`.
fn punctuation_emphasis(text: &str, sum: f64) -> f64 {
  if sum == 0.0 {
    return 0.0;
  }
  let bangs = text.matches('!').count().min(4) as f64;
  let questions = text.matches('?').count();
  let question_amp = match questions {
    0 | 1 => 0.0,
    2 | 3 => questions as f64 * QUESTION_INCR,
    _ => QUESTION_MAX,
  };
  (bangs * EXCLAMATION_INCR + question_amp).copysign(sum)
}

/// Squash a valence sum into [-1, 1].
fn normalize(sum: f64) -> f64 {
  (sum / (sum * sum + ALPHA).sqrt()).clamp(-1.0, 1.0)
}
