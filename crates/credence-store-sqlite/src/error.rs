//! Error type for `credence-store-sqlite`.

use credence_core::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] credence_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored enum column held a value this build does not recognise.
  #[error("decode error: {0}")]
  Decode(String),

  #[error("user not found: {0}")]
  UserNotFound(i64),

  #[error("case not found: {0}")]
  CaseNotFound(i64),

  /// No user's `"First Last"` matches the given name.
  #[error("person not found: {0:?}")]
  PersonNotFound(String),

  #[error("email already registered: {0}")]
  EmailTaken(String),
}

impl StoreError for Error {
  fn is_conflict(&self) -> bool { matches!(self, Error::EmailTaken(_)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
