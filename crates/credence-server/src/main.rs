//! `credence` binary.
//!
//! Reads `credence.toml` (or the path given with `--config`) and `CREDENCE_*`
//! environment variables, then either serves the JSON API over HTTP or scores
//! a single statement from the command line.
//!
//! ```text
//! credence serve
//! credence evaluate "I saw him leave" --prior "He left at nine"
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use credence_engine::CredibilityEngine;
use credence_server::{ServerConfig, expand_tilde};
use credence_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Credence statement credibility server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "credence.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the JSON API (the default).
  Serve,
  /// Score one statement and print the evaluation as JSON.
  Evaluate {
    /// The statement to score.
    text: String,
    /// The statement it follows, for consistency scoring.
    #[arg(long)]
    prior: Option<String>,
  },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  let engine = CredibilityEngine::from_config(&server_cfg.engine)
    .context("failed to build the credibility engine")?;

  match cli.command.unwrap_or(Command::Serve) {
    Command::Evaluate { text, prior } => {
      let evaluation = engine
        .evaluate_statement(&text, prior.as_deref())
        .context("evaluation failed")?;
      println!("{}", serde_json::to_string_pretty(&evaluation)?);
      Ok(())
    }
    Command::Serve => serve(server_cfg, engine).await,
  }
}

async fn serve(server_cfg: ServerConfig, engine: CredibilityEngine) -> anyhow::Result<()> {
  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let app = credence_server::router(
    Arc::new(store),
    Arc::new(engine),
    server_cfg.questions.clone(),
  );
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
