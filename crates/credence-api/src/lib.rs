//! JSON REST API for Credence.
//!
//! Exposes an axum [`Router`] backed by any
//! [`credence_core::store::WorkflowStore`] and a shared
//! [`CredibilityEngine`]. Auth, TLS, and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", credence_api::api_router(store.clone(), engine.clone(), questions))
//! ```

pub mod cases;
pub mod error;
pub mod evaluate;
pub mod questions;
pub mod statements;
pub mod users;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use credence_core::{interview::Questionnaire, store::WorkflowStore};
use credence_engine::CredibilityEngine;

pub use error::ApiError;

/// State shared by every handler.
pub struct ApiState<S> {
  pub store:     Arc<S>,
  pub engine:    Arc<CredibilityEngine>,
  pub questions: Arc<Questionnaire>,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      store:     Arc::clone(&self.store),
      engine:    Arc::clone(&self.engine),
      questions: Arc::clone(&self.questions),
    }
  }
}

/// Build a fully-materialised API router for `store` and `engine`, asking
/// the prompts in `questions`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(
  store: Arc<S>,
  engine: Arc<CredibilityEngine>,
  questions: Questionnaire,
) -> Router<()>
where
  S: WorkflowStore + 'static,
{
  Router::new()
    // Roles and users
    .route("/roles", get(users::roles::<S>))
    .route("/users", post(users::create::<S>))
    .route("/users/{id}", get(users::get_one::<S>))
    .route("/users/{id}/participations", get(users::participations::<S>))
    // Interview
    .route("/questions", get(questions::list::<S>))
    // Cases
    .route("/cases", get(cases::list::<S>).post(cases::create::<S>))
    .route("/cases/{id}", get(cases::get_one::<S>))
    .route(
      "/cases/{id}/progress",
      get(cases::list_progress::<S>).post(cases::add_progress::<S>),
    )
    .route(
      "/cases/{id}/participants",
      get(cases::list_participants::<S>).post(cases::add_participant::<S>),
    )
    // Statements and scores
    .route(
      "/cases/{case_id}/people/{person_id}/statements",
      get(statements::list::<S>).post(statements::submit::<S>),
    )
    .route(
      "/cases/{case_id}/people/{person_id}/scores",
      get(statements::scores::<S>),
    )
    // Stateless scoring
    .route("/evaluate", post(evaluate::handler::<S>))
    .with_state(ApiState { store, engine, questions: Arc::new(questions) })
}
