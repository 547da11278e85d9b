//! Handlers for `/cases` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/cases` | All cases, oldest first |
//! | `POST` | `/cases` | Body: [`CreateBody`]; unknown names come back in `unresolved` |
//! | `GET`  | `/cases/:id` | 404 if not found |
//! | `GET`  | `/cases/:id/progress` | Progress history, oldest first |
//! | `POST` | `/cases/:id/progress` | Body: `{"progress":"..."}` |
//! | `GET`  | `/cases/:id/participants` | Witness, suspect and law-enforcer records |
//! | `POST` | `/cases/:id/participants` | Body: [`ParticipantBody`] |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use credence_core::{
  case::{Case, CaseProgress},
  role::{Participation, RoleKind},
  store::WorkflowStore,
};
use serde::{Deserialize, Serialize};

use crate::{ApiState, error::ApiError};

/// 404 unless `case_id` exists.
pub(crate) async fn require_case<S: WorkflowStore>(
  store: &S,
  case_id: i64,
) -> Result<Case, ApiError> {
  store
    .get_case(case_id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("case {case_id} not found")))
}

// ─── List / get ───────────────────────────────────────────────────────────────

/// `GET /cases`
pub async fn list<S: WorkflowStore>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<Case>>, ApiError> {
  let cases = state.store.list_cases().await.map_err(ApiError::store)?;
  Ok(Json(cases))
}

/// `GET /cases/:id`
pub async fn get_one<S: WorkflowStore>(
  State(state): State<ApiState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Case>, ApiError> {
  Ok(Json(require_case(state.store.as_ref(), id).await?))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /cases`. Names are `"First Last"`.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub description:   String,
  #[serde(default)]
  pub witnesses:     Vec<String>,
  #[serde(default)]
  pub suspects:      Vec<String>,
  #[serde(default)]
  pub law_enforcers: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedCase {
  pub case:         Case,
  pub participants: Vec<Participation>,
  /// Names that matched no registered user.
  pub unresolved:   Vec<String>,
}

/// `POST /cases`: opens a case and attaches every named participant that
/// resolves to a registered user.
pub async fn create<S: WorkflowStore>(
  State(state): State<ApiState<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError> {
  if body.description.trim().is_empty() {
    return Err(ApiError::BadRequest(
      "description must not be empty".to_owned(),
    ));
  }

  let store = state.store.as_ref();
  let case = store
    .add_case(body.description)
    .await
    .map_err(ApiError::store)?;

  let mut participants = Vec::new();
  let mut unresolved = Vec::new();
  for (role, names) in [
    (RoleKind::Witness, body.witnesses),
    (RoleKind::Suspect, body.suspects),
    (RoleKind::LawEnforcer, body.law_enforcers),
  ] {
    for name in names {
      let known = store
        .find_user_by_name(name.clone())
        .await
        .map_err(ApiError::store)?
        .is_some();
      if !known {
        tracing::warn!(
          case_id = case.case_id,
          %role,
          person = %name,
          "unresolved participant"
        );
        unresolved.push(name);
        continue;
      }
      let p = store
        .add_participation(role, name, case.case_id, None)
        .await
        .map_err(ApiError::store)?;
      participants.push(p);
    }
  }

  Ok((
    StatusCode::CREATED,
    Json(CreatedCase { case, participants, unresolved }),
  ))
}

// ─── Progress ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ProgressBody {
  pub progress: String,
}

/// `GET /cases/:id/progress`
pub async fn list_progress<S: WorkflowStore>(
  State(state): State<ApiState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Vec<CaseProgress>>, ApiError> {
  require_case(state.store.as_ref(), id).await?;
  let history = state.store.list_progress(id).await.map_err(ApiError::store)?;
  Ok(Json(history))
}

/// `POST /cases/:id/progress`
pub async fn add_progress<S: WorkflowStore>(
  State(state): State<ApiState<S>>,
  Path(id): Path<i64>,
  Json(body): Json<ProgressBody>,
) -> Result<impl IntoResponse, ApiError> {
  if body.progress.trim().is_empty() {
    return Err(ApiError::BadRequest("progress must not be empty".to_owned()));
  }
  require_case(state.store.as_ref(), id).await?;
  let entry = state
    .store
    .add_progress(id, body.progress)
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(entry)))
}

// ─── Participants ─────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /cases/:id/participants`.
#[derive(Debug, Deserialize)]
pub struct ParticipantBody {
  pub role:        RoleKind,
  pub person_name: String,
  pub gender:      Option<String>,
}

/// `GET /cases/:id/participants`
pub async fn list_participants<S: WorkflowStore>(
  State(state): State<ApiState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Vec<Participation>>, ApiError> {
  require_case(state.store.as_ref(), id).await?;
  let listed = state
    .store
    .list_participants(id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(listed))
}

/// `POST /cases/:id/participants`. 409 for the admin role, 404 when the
/// person or case is unknown.
pub async fn add_participant<S: WorkflowStore>(
  State(state): State<ApiState<S>>,
  Path(id): Path<i64>,
  Json(body): Json<ParticipantBody>,
) -> Result<impl IntoResponse, ApiError> {
  if !body.role.is_case_scoped() {
    return Err(credence_core::Error::NotCaseScoped(body.role).into());
  }
  let store = state.store.as_ref();
  require_case(store, id).await?;

  let known = store
    .find_user_by_name(body.person_name.clone())
    .await
    .map_err(ApiError::store)?
    .is_some();
  if !known {
    return Err(ApiError::NotFound(format!(
      "no user named {:?}",
      body.person_name
    )));
  }

  let p = store
    .add_participation(body.role, body.person_name, id, body.gender)
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(p)))
}
