//! Store-backed assessment against an in-memory `SqliteStore`.

use credence_core::{
  Error,
  score::Cooperation,
  statement::NewStatement,
  store::WorkflowStore,
  user::NewUser,
};
use credence_store_sqlite::SqliteStore;

use crate::{AssessError, CredibilityEngine, EngineConfig};

struct Fixture {
  store:     SqliteStore,
  engine:    CredibilityEngine,
  person_id: i64,
  case_id:   i64,
}

async fn fixture() -> Fixture {
  let store = SqliteStore::open_in_memory().await.expect("in-memory store");
  let user = store
    .add_user(NewUser {
      first_name: "Jane".into(),
      last_name:  "Doe".into(),
      email:      "jane@example.com".into(),
      credential: "hashed".into(),
      role:       None,
    })
    .await
    .unwrap();
  let case = store.add_case("Hit and run on 5th Ave".into()).await.unwrap();
  Fixture {
    store,
    engine: CredibilityEngine::from_config(&EngineConfig::default()).unwrap(),
    person_id: user.user_id,
    case_id: case.case_id,
  }
}

impl Fixture {
  fn statement(&self, text: &str) -> NewStatement {
    NewStatement {
      person_id: self.person_id,
      case_id:   self.case_id,
      question:  None,
      text:      text.into(),
    }
  }
}

#[tokio::test]
async fn assess_without_statements_returns_none() {
  let f = fixture().await;
  let got = f.engine.assess(&f.store, f.person_id, f.case_id).await.unwrap();
  assert!(got.is_none());
}

#[tokio::test]
async fn first_statement_is_scored_without_consistency() {
  let f = fixture().await;
  let (statement, record) = f
    .engine
    .submit_statement(&f.store, f.statement("I was glad to help the officers"))
    .await
    .unwrap();

  assert_eq!(statement.position, 1);
  assert_eq!(record.position, 1);
  assert_eq!(record.evaluation.cooperation, Cooperation::Cooperative);
  assert!(record.evaluation.consistency_score.is_none());
  assert!(record.evaluation.confidence_score.is_none());

  let stored = f
    .store
    .get_score(f.person_id, f.case_id, 1)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(stored.evaluation, record.evaluation);
}

#[tokio::test]
async fn repeated_statement_is_fully_consistent() {
  let f = fixture().await;
  let text = "I saw the defendant leave the scene calmly";
  f.engine.submit_statement(&f.store, f.statement(text)).await.unwrap();
  let (statement, record) = f
    .engine
    .submit_statement(&f.store, f.statement(text))
    .await
    .unwrap();

  assert_eq!(statement.position, 2);
  assert_eq!(record.evaluation.consistency_score, Some(1.0));
  let confidence = record.evaluation.confidence_score.unwrap();
  assert!((0.0..=1.0).contains(&confidence));
}

#[tokio::test]
async fn empty_statement_is_rejected_before_append() {
  let f = fixture().await;
  let err = f
    .engine
    .submit_statement(&f.store, f.statement("   "))
    .await
    .unwrap_err();
  assert!(matches!(err, AssessError::Engine(Error::EmptyInput(_))));

  let stored = f
    .store
    .get_statements_for(f.person_id, f.case_id)
    .await
    .unwrap();
  assert!(stored.is_empty());
}

#[tokio::test]
async fn unknown_person_surfaces_store_error() {
  let f = fixture().await;
  let mut input = f.statement("hello there");
  input.person_id = 999;
  let err = f.engine.submit_statement(&f.store, input).await.unwrap_err();
  assert!(matches!(
    err,
    AssessError::Store(credence_store_sqlite::Error::UserNotFound(999))
  ));
}

#[tokio::test]
async fn assess_rescores_latest_against_previous() {
  let f = fixture().await;
  f.store
    .add_statement(f.statement("The red car sped away from the bank"))
    .await
    .unwrap();
  f.store
    .add_statement(f.statement("A red car sped away from the bank"))
    .await
    .unwrap();

  let first = f
    .engine
    .assess(&f.store, f.person_id, f.case_id)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(first.position, 2);
  let consistency = first.evaluation.consistency_score.unwrap();
  assert!(consistency > 0.5, "got {consistency}");

  // Recomputing overwrites rather than duplicating.
  let again = f
    .engine
    .assess(&f.store, f.person_id, f.case_id)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(again.evaluation, first.evaluation);
  let scores = f.store.list_scores(f.person_id, f.case_id).await.unwrap();
  assert_eq!(scores.len(), 1);
}
