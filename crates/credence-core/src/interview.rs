//! The interview questionnaire presented to a person giving statements.
//!
//! Each statement may record the prompt it answers. Prompts are matched
//! exactly against the configured [`Questionnaire`].

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Prompts used when no questionnaire is configured, in asking order.
pub const DEFAULT_QUESTIONS: &[&str] = &[
  "What did you witness?",
  "Where did the incident occur?",
  "When did it happen?",
  "Who else was present?",
  "Did you see any suspicious activities before or after the incident?",
];

/// An ordered, non-empty list of interview prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Questionnaire {
  questions: Vec<String>,
}

impl Questionnaire {
  /// Fails with [`Error::EmptyInput`] if the list or any prompt is blank.
  /// Surrounding whitespace is dropped from each prompt.
  pub fn new(questions: Vec<String>) -> Result<Self> {
    if questions.is_empty() {
      return Err(Error::EmptyInput("questionnaire"));
    }
    let questions = questions
      .into_iter()
      .map(|q| {
        let q = q.trim();
        if q.is_empty() {
          return Err(Error::EmptyInput("question"));
        }
        Ok(q.to_owned())
      })
      .collect::<Result<Vec<_>>>()?;
    Ok(Self { questions })
  }

  pub fn questions(&self) -> &[String] { &self.questions }

  pub fn len(&self) -> usize { self.questions.len() }

  pub fn is_empty(&self) -> bool { self.questions.is_empty() }

  /// The prompt as stored, or [`Error::UnknownQuestion`] if `question` is not
  /// part of this questionnaire.
  pub fn resolve(&self, question: &str) -> Result<&str> {
    let wanted = question.trim();
    self
      .questions
      .iter()
      .find(|q| q.as_str() == wanted)
      .map(String::as_str)
      .ok_or_else(|| Error::UnknownQuestion(question.to_owned()))
  }
}

impl Default for Questionnaire {
  fn default() -> Self {
    Self {
      questions: DEFAULT_QUESTIONS.iter().map(|q| (*q).to_owned()).collect(),
    }
  }
}

impl TryFrom<Vec<String>> for Questionnaire {
  type Error = Error;

  fn try_from(questions: Vec<String>) -> Result<Self> { Self::new(questions) }
}

impl From<Questionnaire> for Vec<String> {
  fn from(q: Questionnaire) -> Self { q.questions }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_asks_the_five_interview_questions() {
    let q = Questionnaire::default();
    assert_eq!(q.len(), 5);
    assert_eq!(q.questions()[0], "What did you witness?");
    assert_eq!(q.questions()[3], "Who else was present?");
  }

  #[test]
  fn blank_questionnaires_rejected() {
    assert!(matches!(
      Questionnaire::new(vec![]),
      Err(Error::EmptyInput("questionnaire"))
    ));
    assert!(matches!(
      Questionnaire::new(vec!["Where?".into(), "  ".into()]),
      Err(Error::EmptyInput("question"))
    ));
  }

  #[test]
  fn resolve_matches_trimmed_prompt() {
    let q = Questionnaire::default();
    assert_eq!(
      q.resolve("  When did it happen? ").unwrap(),
      "When did it happen?"
    );
    let err = q.resolve("Why?").unwrap_err();
    assert!(matches!(err, Error::UnknownQuestion(ref s) if s == "Why?"));
  }

  #[test]
  fn serializes_as_a_plain_list() {
    let q = Questionnaire::new(vec!["Where?".into()]).unwrap();
    assert_eq!(serde_json::to_string(&q).unwrap(), r#"["Where?"]"#);
    let back: Questionnaire = serde_json::from_str(r#"[" Where? "]"#).unwrap();
    assert_eq!(back, q);
    assert!(serde_json::from_str::<Questionnaire>("[]").is_err());
  }
}
