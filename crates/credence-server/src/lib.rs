//! Server assembly for Credence: configuration, store and engine wiring, and
//! the HTTP router with request tracing.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use credence_core::{interview::Questionnaire, store::WorkflowStore};
use credence_engine::{CredibilityEngine, EngineConfig};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime configuration, deserialised from `credence.toml` layered under
/// `CREDENCE_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  pub engine:     EngineConfig,
  /// Interview prompts served by `GET /questions`.
  pub questions:  Questionnaire,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".to_owned(),
      port:       5280,
      store_path: PathBuf::from("credence.db"),
      engine:     EngineConfig::default(),
      questions:  Questionnaire::default(),
    }
  }
}

impl ServerConfig {
  /// Read `path` (optional) and the environment. Nested keys use `__`, e.g.
  /// `CREDENCE_ENGINE__CONFIDENCE_POLICY=rescale`.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("CREDENCE")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The Credence API with per-request tracing.
pub fn router<S>(
  store: Arc<S>,
  engine: Arc<CredibilityEngine>,
  questions: Questionnaire,
) -> Router
where
  S: WorkflowStore + 'static,
{
  credence_api::api_router(store, engine, questions)
    .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use axum::{body::Body, http::Request};
  use credence_engine::ConfidencePolicy;
  use credence_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  use super::*;

  #[test]
  fn missing_file_yields_defaults() {
    let cfg = ServerConfig::load(Path::new("/nonexistent/credence.toml")).unwrap();
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.port, 5280);
    assert_eq!(cfg.engine.similarity_dimensions, 512);
    assert_eq!(cfg.engine.confidence_policy, ConfidencePolicy::Clamp);
    assert_eq!(cfg.questions, Questionnaire::default());
  }

  #[test]
  fn toml_file_overrides_defaults() {
    let path = std::env::temp_dir().join("credence-server-config-test.toml");
    std::fs::write(
      &path,
      "port = 9000\n\n[engine]\nconfidence_policy = \"rescale\"\nsimilarity_dimensions = 64\n",
    )
    .unwrap();

    let cfg = ServerConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(cfg.port, 9000);
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.address(), "127.0.0.1:9000");
    assert_eq!(cfg.engine.confidence_policy, ConfidencePolicy::Rescale);
    assert_eq!(cfg.engine.similarity_dimensions, 64);
  }

  #[test]
  fn questions_come_from_the_file() {
    let path = std::env::temp_dir().join("credence-server-questions-test.toml");
    std::fs::write(
      &path,
      "questions = [\"What did you hear?\", \"Who called it in?\"]\n",
    )
    .unwrap();
    let cfg = ServerConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();
    let expected = ["What did you hear?", "Who called it in?"];
    assert_eq!(cfg.questions.questions(), expected);

    let path = std::env::temp_dir().join("credence-server-no-questions-test.toml");
    std::fs::write(&path, "questions = []\n").unwrap();
    let err = ServerConfig::load(&path);
    std::fs::remove_file(&path).ok();
    assert!(err.is_err());
  }

  #[test]
  fn tilde_is_expanded() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(
      expand_tilde(Path::new("~/data/credence.db")),
      PathBuf::from(home).join("data/credence.db")
    );
    assert_eq!(
      expand_tilde(Path::new("/var/lib/credence.db")),
      PathBuf::from("/var/lib/credence.db")
    );
  }

  #[tokio::test]
  async fn traced_router_serves_roles() {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let engine =
      Arc::new(CredibilityEngine::from_config(&EngineConfig::default()).unwrap());
    let app = router(store, engine, Questionnaire::default());
    for uri in ["/roles", "/questions"] {
      let resp = app
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
      assert_eq!(resp.status(), axum::http::StatusCode::OK, "{uri}");
    }
  }
}
