//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use credence_core::store::StoreError;
use credence_engine::AssessError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error(transparent)]
  Engine(#[from] credence_core::Error),

  #[error("credential hashing failed: {0}")]
  Credential(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Conflicts reported by the backend become 409; anything else is a 500.
  pub(crate) fn store<E: StoreError>(e: E) -> Self {
    if e.is_conflict() {
      return ApiError::Conflict(e.to_string());
    }
    ApiError::Store(Box::new(e))
  }

  fn status(&self) -> StatusCode {
    use credence_core::Error as Core;
    match self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Conflict(_) => StatusCode::CONFLICT,
      ApiError::Engine(e) => match e {
        Core::EmptyInput(_)
        | Core::InvalidScore { .. }
        | Core::UnknownRole(_)
        | Core::UnknownQuestion(_) => StatusCode::BAD_REQUEST,
        Core::NotCaseScoped(_) => StatusCode::CONFLICT,
        Core::ModelUnavailable(_) | Core::RangeViolation { .. } => {
          StatusCode::INTERNAL_SERVER_ERROR
        }
      },
      ApiError::Credential(_) | ApiError::Store(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }
}

impl<E: StoreError> From<AssessError<E>> for ApiError {
  fn from(e: AssessError<E>) -> Self {
    match e {
      AssessError::Engine(e) => ApiError::Engine(e),
      AssessError::Store(e) => ApiError::store(e),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    }
    let message = match &self {
      ApiError::NotFound(m) | ApiError::BadRequest(m) | ApiError::Conflict(m) => {
        m.clone()
      }
      other => other.to_string(),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
