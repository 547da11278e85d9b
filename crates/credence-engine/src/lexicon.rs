//! Valence lexicon and rule word lists for [`LexiconPolarity`].
//!
//! Valences are on the [-4, 4] scale used by rule-based sentiment lexicons.
//! The built-in table is small and tuned towards interview language; larger
//! tables can be merged in from a file with [`parse_lexicon`].
//!
//! [`LexiconPolarity`]: crate::sentiment::LexiconPolarity

use std::collections::HashMap;

use credence_core::{Error, Result};

/// Bound on the magnitude of a single word's valence.
pub const MAX_VALENCE: f64 = 4.0;

pub(crate) const BUILTIN: &[(&str, f64)] = &[
  // ── Cooperation, candour ──────────────────────────────────────────────
  ("accept", 1.6),
  ("accurate", 1.8),
  ("agree", 1.5),
  ("agreed", 1.5),
  ("assist", 1.3),
  ("calm", 1.3),
  ("calmly", 1.3),
  ("careful", 1.2),
  ("certain", 1.1),
  ("clear", 1.6),
  ("clearly", 1.5),
  ("confident", 2.2),
  ("cooperate", 1.6),
  ("correct", 1.6),
  ("definitely", 1.7),
  ("fine", 0.8),
  ("glad", 2.0),
  ("happy", 2.7),
  ("help", 1.7),
  ("helped", 1.7),
  ("helpful", 1.8),
  ("honest", 2.3),
  ("honestly", 2.0),
  ("kind", 2.4),
  ("like", 1.5),
  ("nice", 1.8),
  ("ok", 0.9),
  ("okay", 0.9),
  ("peaceful", 2.2),
  ("please", 1.3),
  ("pleased", 1.9),
  ("polite", 1.8),
  ("remember", 0.6),
  ("respect", 2.1),
  ("safe", 1.9),
  ("sure", 1.3),
  ("thank", 1.5),
  ("thanks", 1.9),
  ("true", 1.8),
  ("trust", 2.3),
  ("truth", 1.3),
  ("welcome", 2.0),
  ("willing", 1.1),
  ("yes", 1.7),
  ("good", 1.9),
  ("great", 3.1),
  ("love", 3.2),
  ("relieved", 1.8),
  ("support", 1.7),
  ("understand", 1.0),
  // ── Hostility, refusal ────────────────────────────────────────────────
  ("abuse", -3.2),
  ("afraid", -2.2),
  ("aggressive", -2.3),
  ("angry", -2.3),
  ("annoyed", -1.6),
  ("argue", -1.4),
  ("attack", -2.1),
  ("awful", -2.0),
  ("bad", -2.5),
  ("blame", -1.4),
  ("confused", -1.3),
  ("crime", -2.5),
  ("cruel", -2.8),
  ("damn", -1.7),
  ("dead", -3.3),
  ("deny", -1.4),
  ("denied", -1.6),
  ("disgusting", -2.4),
  ("doubt", -1.5),
  ("fake", -2.1),
  ("false", -1.9),
  ("fear", -2.2),
  ("fight", -1.6),
  ("furious", -3.0),
  ("guilty", -1.8),
  ("harass", -2.5),
  ("hate", -2.7),
  ("hit", -1.3),
  ("horrible", -2.5),
  ("hostile", -2.2),
  ("hurt", -2.4),
  ("idiot", -2.3),
  ("ignore", -1.5),
  ("kill", -3.7),
  ("killed", -3.5),
  ("liar", -2.8),
  ("lie", -1.6),
  ("lied", -1.6),
  ("lies", -1.8),
  ("mad", -2.2),
  ("no", -1.2),
  ("nonsense", -1.7),
  ("outrage", -2.3),
  ("outraged", -2.5),
  ("outrageous", -2.0),
  ("panic", -2.3),
  ("problem", -1.7),
  ("refuse", -1.2),
  ("refused", -1.2),
  ("ridiculous", -1.5),
  ("sad", -2.1),
  ("scared", -1.9),
  ("shut", -0.8),
  ("stupid", -2.4),
  ("suspicious", -1.5),
  ("terrible", -2.1),
  ("threat", -2.4),
  ("threaten", -2.4),
  ("ugly", -2.3),
  ("unfair", -2.1),
  ("upset", -1.6),
  ("violent", -2.9),
  ("worried", -1.2),
  ("wrong", -2.1),
  ("worst", -3.1),
];

/// Negation terms. Words containing `n't` are negations as well.
pub(crate) const NEGATIONS: &[&str] = &[
  "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt",
  "dont", "hadnt", "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither",
  "never", "none", "nope", "nor", "not", "nothing", "nowhere", "shant",
  "shouldnt", "wasnt", "werent", "without", "wont", "wouldnt", "rarely",
  "seldom", "despite",
];

/// Intensity increment applied by boosters and dampeners.
pub(crate) const BOOST: f64 = 0.293;

/// Words that raise (`+BOOST`) or lower (`-BOOST`) the intensity of the
/// following sentiment word.
pub(crate) const BOOSTERS: &[(&str, f64)] = &[
  ("absolutely", BOOST),
  ("completely", BOOST),
  ("deeply", BOOST),
  ("entirely", BOOST),
  ("especially", BOOST),
  ("extremely", BOOST),
  ("greatly", BOOST),
  ("highly", BOOST),
  ("incredibly", BOOST),
  ("really", BOOST),
  ("so", BOOST),
  ("terribly", BOOST),
  ("totally", BOOST),
  ("truly", BOOST),
  ("utterly", BOOST),
  ("very", BOOST),
  ("almost", -BOOST),
  ("barely", -BOOST),
  ("hardly", -BOOST),
  ("kinda", -BOOST),
  ("less", -BOOST),
  ("little", -BOOST),
  ("marginally", -BOOST),
  ("partly", -BOOST),
  ("scarcely", -BOOST),
  ("slightly", -BOOST),
  ("somewhat", -BOOST),
  ("sorta", -BOOST),
];

/// The built-in lexicon as an owned map.
pub fn builtin() -> HashMap<String, f64> {
  BUILTIN.iter().map(|(w, v)| ((*w).to_owned(), *v)).collect()
}

/// Parse a tab-separated lexicon: one `word<TAB>valence` entry per line, any
/// further columns ignored. Blank lines and `#` comments are skipped.
pub fn parse_lexicon(source: &str) -> Result<HashMap<String, f64>> {
  let mut out = HashMap::new();
  for (idx, line) in source.lines().enumerate() {
    let line = line.trim_end_matches('\r');
    if line.trim().is_empty() || line.starts_with('#') {
      continue;
    }

    let mut cols = line.split('\t');
    let word = cols.next().unwrap_or_default().trim();
    let valence = cols
      .next()
      .map(str::trim)
      .ok_or_else(|| malformed(idx, "missing valence column"))?
      .parse::<f64>()
      .map_err(|e| malformed(idx, &e.to_string()))?;

    check_entry(word, valence)
      .map_err(|reason| malformed(idx, &reason))?;
    out.insert(word.to_lowercase(), valence);
  }
  Ok(out)
}

/// Rejects an empty word or a valence outside [-MAX_VALENCE, MAX_VALENCE].
pub(crate) fn check_entry(
  word: &str,
  valence: f64,
) -> std::result::Result<(), String> {
  if word.trim().is_empty() {
    return Err("empty word".to_owned());
  }
  if !valence.is_finite() || valence.abs() > MAX_VALENCE {
    return Err(format!("valence {valence} out of range"));
  }
  Ok(())
}

fn malformed(idx: usize, reason: &str) -> Error {
  Error::ModelUnavailable(format!("lexicon line {}: {reason}", idx + 1))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builtin_valences_are_bounded() {
    for (word, v) in BUILTIN {
      assert!(v.abs() <= MAX_VALENCE, "{word} has valence {v}");
      assert_eq!(*word, word.to_lowercase());
    }
  }

  #[test]
  fn parses_vader_style_lines() {
    let src = "# comment\n\nbrave\t2.4\t0.8\t[2, 3, 2]\nCoward\t-1.9\n";
    let lex = parse_lexicon(src).unwrap();
    assert_eq!(lex.len(), 2);
    assert_eq!(lex["brave"], 2.4);
    assert_eq!(lex["coward"], -1.9);
  }

  #[test]
  fn rejects_missing_valence() {
    let err = parse_lexicon("brave\n").unwrap_err();
    assert!(matches!(err, Error::ModelUnavailable(ref m) if m.contains("line 1")));
  }

  #[test]
  fn rejects_out_of_range_valence() {
    let err = parse_lexicon("ok\t0.5\nbrave\t9.0\n").unwrap_err();
    assert!(matches!(err, Error::ModelUnavailable(ref m) if m.contains("line 2")));
  }
}
