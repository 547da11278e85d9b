//! Error type for store-backed assessment.

use thiserror::Error;

/// Failure while assessing statements held in a
/// [`WorkflowStore`](credence_core::store::WorkflowStore).
#[derive(Debug, Error)]
pub enum AssessError<E: std::error::Error + 'static> {
  #[error(transparent)]
  Engine(#[from] credence_core::Error),

  #[error("store error: {0}")]
  Store(#[source] E),
}
