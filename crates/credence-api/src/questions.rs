//! `GET /questions`: the interview prompts, in asking order.

use axum::{Json, extract::State};
use credence_core::store::WorkflowStore;

use crate::ApiState;

pub async fn list<S: WorkflowStore>(
  State(state): State<ApiState<S>>,
) -> Json<Vec<String>> {
  Json(state.questions.questions().to_vec())
}
