//! Handlers for `/roles` and `/users` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/roles` | The static role set |
//! | `POST` | `/users` | Body: [`SignupBody`]; 409 if the email is taken |
//! | `GET`  | `/users/:id` | 404 if not found; the credential is never returned |
//! | `GET`  | `/users/:id/participations` | Every role record the user holds |

use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use credence_core::{
  role::{Participation, Role, RoleKind},
  store::WorkflowStore,
  user::{NewUser, User},
};
use rand_core::OsRng;
use serde::Deserialize;

use crate::{ApiState, error::ApiError};

// ─── Roles ────────────────────────────────────────────────────────────────────

/// `GET /roles`
pub async fn roles<S: WorkflowStore>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<Role>>, ApiError> {
  let roles = state.store.list_roles().await.map_err(ApiError::store)?;
  Ok(Json(roles))
}

// ─── Signup ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /users`.
#[derive(Debug, Deserialize)]
pub struct SignupBody {
  pub first_name: String,
  pub last_name:  String,
  pub email:      String,
  /// Plain secret; only its argon2 hash is stored.
  pub credential: String,
  pub role:       Option<RoleKind>,
}

/// `POST /users`: returns 201 + the stored [`User`].
pub async fn create<S: WorkflowStore>(
  State(state): State<ApiState<S>>,
  Json(body): Json<SignupBody>,
) -> Result<impl IntoResponse, ApiError> {
  for (field, value) in [
    ("first_name", &body.first_name),
    ("last_name", &body.last_name),
    ("email", &body.email),
    ("credential", &body.credential),
  ] {
    if value.trim().is_empty() {
      return Err(ApiError::BadRequest(format!("{field} must not be empty")));
    }
  }

  let existing = state
    .store
    .find_user_by_email(body.email.clone())
    .await
    .map_err(ApiError::store)?;
  if existing.is_some() {
    return Err(ApiError::Conflict(format!(
      "email {} is already registered",
      body.email
    )));
  }

  // A signup racing this one past the check above comes back from the store
  // as a conflict.
  let user = state
    .store
    .add_user(NewUser {
      first_name: body.first_name,
      last_name:  body.last_name,
      email:      body.email,
      credential: hash_credential(&body.credential)?,
      role:       body.role,
    })
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(user)))
}

/// Argon2 PHC string for `secret` with a fresh random salt.
fn hash_credential(secret: &str) -> Result<String, ApiError> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(secret.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|e| ApiError::Credential(e.to_string()))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /users/:id`
pub async fn get_one<S: WorkflowStore>(
  State(state): State<ApiState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<User>, ApiError> {
  let user = state
    .store
    .get_user(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("user {id} not found")))?;
  Ok(Json(user))
}

/// `GET /users/:id/participations`
pub async fn participations<S: WorkflowStore>(
  State(state): State<ApiState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Vec<Participation>>, ApiError> {
  if state.store.get_user(id).await.map_err(ApiError::store)?.is_none() {
    return Err(ApiError::NotFound(format!("user {id} not found")));
  }
  let held = state
    .store
    .participations_for_user(id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(held))
}
