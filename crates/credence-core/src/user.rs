//! Users: the people who sign up and later author statements.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::role::RoleKind;

/// A registered user.
///
/// The credential is an opaque secret (in practice an argon2 PHC string) and
/// is never serialised.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub user_id:    i64,
  pub first_name: String,
  pub last_name:  String,
  /// Unique across all users.
  pub email:      String,
  #[serde(skip_serializing, default)]
  pub credential: String,
  pub role:       Option<RoleKind>,
  pub created_at: DateTime<Utc>,
}

impl User {
  /// `"First Last"`, the form used to look people up when building a case.
  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }
}

/// Input to [`crate::store::WorkflowStore::add_user`].
#[derive(Debug, Clone)]
pub struct NewUser {
  pub first_name: String,
  pub last_name:  String,
  pub email:      String,
  pub credential: String,
  pub role:       Option<RoleKind>,
}
