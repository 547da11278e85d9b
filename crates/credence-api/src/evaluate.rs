//! `POST /evaluate`: stateless scoring of a statement and its predecessor.
//!
//! Body: `{"text":"...","prior_text":"..."}` (`prior_text` optional).
//! Nothing is persisted.

use axum::{Json, extract::State};
use credence_core::{score::Evaluation, store::WorkflowStore};
use serde::Deserialize;

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct EvaluateBody {
  pub text:       String,
  pub prior_text: Option<String>,
}

pub async fn handler<S: WorkflowStore>(
  State(state): State<ApiState<S>>,
  Json(body): Json<EvaluateBody>,
) -> Result<Json<Evaluation>, ApiError> {
  let evaluation = state
    .engine
    .evaluate_statement(&body.text, body.prior_text.as_deref())?;
  Ok(Json(evaluation))
}
