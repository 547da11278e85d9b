//! Error types for `credence-core`.

use thiserror::Error;

use crate::role::RoleKind;

#[derive(Debug, Error)]
pub enum Error {
  /// Blank text where text is required. Shown to the operator as a
  /// retryable form error.
  #[error("{0} must not be empty")]
  EmptyInput(&'static str),

  /// A sentiment or similarity backend failed to initialise.
  #[error("model unavailable: {0}")]
  ModelUnavailable(String),

  /// A computed score fell outside its documented bound.
  #[error("{what} out of range: {value}")]
  RangeViolation { what: &'static str, value: f64 },

  /// A caller-supplied score is non-finite or outside its domain.
  #[error("invalid {what}: {value}")]
  InvalidScore { what: &'static str, value: f64 },

  #[error("role {0} is not scoped to a case")]
  NotCaseScoped(RoleKind),

  #[error("unknown role: {0:?}")]
  UnknownRole(String),

  /// A statement named a prompt the questionnaire does not ask.
  #[error("unknown question: {0:?}")]
  UnknownQuestion(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
