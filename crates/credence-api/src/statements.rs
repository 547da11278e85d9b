//! Handlers for a person's statements and scores within a case.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/cases/:case_id/people/:person_id/statements` | Ordered by position |
//! | `POST` | `/cases/:case_id/people/:person_id/statements` | Body: [`SubmitBody`]; appends and scores |
//! | `GET`  | `/cases/:case_id/people/:person_id/scores` | Ordered by position |
//!
//! Every route answers 404 when the case or the person is unknown.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use credence_core::{
  score::ScoreRecord,
  statement::{NewStatement, Statement},
  store::WorkflowStore,
};
use serde::{Deserialize, Serialize};

use crate::{ApiState, cases::require_case, error::ApiError};

/// 404 unless `person_id` is a registered user.
async fn require_person<S: WorkflowStore>(
  store: &S,
  person_id: i64,
) -> Result<(), ApiError> {
  match store.get_user(person_id).await.map_err(ApiError::store)? {
    Some(_) => Ok(()),
    None => Err(ApiError::NotFound(format!("user {person_id} not found"))),
  }
}

/// `GET /cases/:case_id/people/:person_id/statements`
pub async fn list<S: WorkflowStore>(
  State(state): State<ApiState<S>>,
  Path((case_id, person_id)): Path<(i64, i64)>,
) -> Result<Json<Vec<Statement>>, ApiError> {
  let store = state.store.as_ref();
  require_case(store, case_id).await?;
  require_person(store, person_id).await?;
  let statements = state
    .store
    .get_statements_for(person_id, case_id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(statements))
}

/// JSON body accepted by `POST .../statements`.
#[derive(Debug, Deserialize)]
pub struct SubmitBody {
  pub text:     String,
  /// The interview prompt being answered; must be one of `GET /questions`.
  pub question: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Submitted {
  pub statement: Statement,
  pub score:     ScoreRecord,
}

/// `POST /cases/:case_id/people/:person_id/statements`: returns 201 + the
/// stored statement and its score.
pub async fn submit<S: WorkflowStore>(
  State(state): State<ApiState<S>>,
  Path((case_id, person_id)): Path<(i64, i64)>,
  Json(body): Json<SubmitBody>,
) -> Result<impl IntoResponse, ApiError> {
  let store = state.store.as_ref();
  require_case(store, case_id).await?;
  require_person(store, person_id).await?;
  let question = body
    .question
    .as_deref()
    .map(|q| state.questions.resolve(q).map(str::to_owned))
    .transpose()?;

  let (statement, score) = state
    .engine
    .submit_statement(store, NewStatement {
      person_id,
      case_id,
      question,
      text: body.text,
    })
    .await?;
  Ok((StatusCode::CREATED, Json(Submitted { statement, score })))
}

/// `GET /cases/:case_id/people/:person_id/scores`
pub async fn scores<S: WorkflowStore>(
  State(state): State<ApiState<S>>,
  Path((case_id, person_id)): Path<(i64, i64)>,
) -> Result<Json<Vec<ScoreRecord>>, ApiError> {
  let store = state.store.as_ref();
  require_case(store, case_id).await?;
  require_person(store, person_id).await?;
  let scores = state
    .store
    .list_scores(person_id, case_id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(scores))
}
