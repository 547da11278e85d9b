//! The `WorkflowStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `credence-store-sqlite`).
//! The engine and the API depend on this abstraction and receive an instance
//! from their caller; neither opens a connection itself.

use std::future::Future;

use crate::{
  case::{Case, CaseProgress},
  role::{Participation, Role, RoleKind},
  score::{NewScore, ScoreRecord},
  statement::{NewStatement, Statement},
  user::{NewUser, User},
};

/// Classification of backend errors the callers of a store act on.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// The write was refused because it collides with existing data, such as
  /// a registered email.
  fn is_conflict(&self) -> bool { false }
}

/// Abstraction over the case workflow backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait WorkflowStore: Send + Sync {
  type Error: StoreError;

  // ── Roles ─────────────────────────────────────────────────────────────

  /// The static role reference set.
  fn list_roles(
    &self,
  ) -> impl Future<Output = Result<Vec<Role>, Self::Error>> + Send + '_;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Register a user. Fails if the email is already taken.
  ///
  /// Users registered as [`RoleKind::Admin`] also get an admin record.
  fn add_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  fn get_user(
    &self,
    user_id: i64,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  fn find_user_by_email(
    &self,
    email: String,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// Look a user up by `"First Last"`. Returns the earliest match.
  fn find_user_by_name(
    &self,
    full_name: String,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  // ── Cases ─────────────────────────────────────────────────────────────

  fn add_case(
    &self,
    description: String,
  ) -> impl Future<Output = Result<Case, Self::Error>> + Send + '_;

  fn get_case(
    &self,
    case_id: i64,
  ) -> impl Future<Output = Result<Option<Case>, Self::Error>> + Send + '_;

  fn list_cases(
    &self,
  ) -> impl Future<Output = Result<Vec<Case>, Self::Error>> + Send + '_;

  /// Append a progress marker to a case's history.
  fn add_progress(
    &self,
    case_id: i64,
    progress: String,
  ) -> impl Future<Output = Result<CaseProgress, Self::Error>> + Send + '_;

  /// A case's progress history, oldest first.
  fn list_progress(
    &self,
    case_id: i64,
  ) -> impl Future<Output = Result<Vec<CaseProgress>, Self::Error>> + Send + '_;

  // ── Participation ─────────────────────────────────────────────────────

  /// Attach the user named `person_name` (`"First Last"`) to a case under
  /// `role`.
  ///
  /// Fails if the person or the case does not exist, or if `role` is not
  /// case-scoped.
  fn add_participation(
    &self,
    role: RoleKind,
    person_name: String,
    case_id: i64,
    gender: Option<String>,
  ) -> impl Future<Output = Result<Participation, Self::Error>> + Send + '_;

  /// Every case-scoped participation record for a case.
  fn list_participants(
    &self,
    case_id: i64,
  ) -> impl Future<Output = Result<Vec<Participation>, Self::Error>> + Send + '_;

  /// Every participation record held by a user, across all roles.
  fn participations_for_user(
    &self,
    user_id: i64,
  ) -> impl Future<Output = Result<Vec<Participation>, Self::Error>> + Send + '_;

  // ── Statements ────────────────────────────────────────────────────────

  /// Append a statement; the store assigns the next position for the
  /// (person, case) pair.
  fn add_statement(
    &self,
    input: NewStatement,
  ) -> impl Future<Output = Result<Statement, Self::Error>> + Send + '_;

  /// All statements by `person_id` in `case_id`, ordered by position.
  fn get_statements_for(
    &self,
    person_id: i64,
    case_id: i64,
  ) -> impl Future<Output = Result<Vec<Statement>, Self::Error>> + Send + '_;

  // ── Scores ────────────────────────────────────────────────────────────

  /// Persist a computed score. Idempotent per (person, case, position):
  /// re-recording overwrites the previous value, last writer wins.
  fn record_score(
    &self,
    input: NewScore,
  ) -> impl Future<Output = Result<ScoreRecord, Self::Error>> + Send + '_;

  fn get_score(
    &self,
    person_id: i64,
    case_id: i64,
    position: u32,
  ) -> impl Future<Output = Result<Option<ScoreRecord>, Self::Error>> + Send + '_;

  /// All scores for a (person, case) pair, ordered by position.
  fn list_scores(
    &self,
    person_id: i64,
    case_id: i64,
  ) -> impl Future<Output = Result<Vec<ScoreRecord>, Self::Error>> + Send + '_;
}
