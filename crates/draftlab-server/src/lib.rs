//! HTTP assembly for the draftlab study server.
//!
//! Mounts the JSON API from [`draftlab_api`] alongside the operational
//! routes: the landing page, `/health`, and a static-file fallback.
//! Backend choices — SQLite store, in-memory conversations, Ollama
//! gateway — are made in `main`; everything here is generic over the
//! backend traits so tests can substitute doubles.

use std::{path::PathBuf, sync::Arc};

use axum::{Router, response::Html, routing::get};
use draftlab_core::{
  gateway::ChatGateway,
  store::{ConversationStore, StudyStore},
};
use serde::Deserialize;
use tower_http::{services::ServeDir, trace::TraceLayer};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and the
/// `DRAFTLAB_*` environment. Every field has a default, so the server
/// starts with no configuration at all.
#[derive(Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                 String,
  pub port:                 u16,
  pub store_path:           PathBuf,
  pub static_dir:           PathBuf,
  pub ollama_url:           String,
  pub model:                String,
  pub gateway_timeout_secs: u64,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                 "127.0.0.1".to_string(),
      port:                 3000,
      store_path:           PathBuf::from("draftlab.db"),
      static_dir:           PathBuf::from("static"),
      ollama_url:           "http://127.0.0.1:11434".to_string(),
      model:                "llama3".to_string(),
      gateway_timeout_secs: 120,
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router over concrete backend instances.
pub fn router<S, C, G>(
  config: &ServerConfig,
  store: Arc<S>,
  conversations: Arc<C>,
  gateway: Arc<G>,
) -> Router
where
  S: StudyStore + 'static,
  C: ConversationStore + 'static,
  G: ChatGateway + 'static,
{
  Router::new()
    .route("/", get(index))
    .route("/health", get(health))
    .merge(draftlab_api::api_router(store, conversations, gateway))
    .fallback_service(ServeDir::new(&config.static_dir))
    .layer(TraceLayer::new_for_http())
}

/// The landing page is compiled in, so `GET /` answers regardless of the
/// working directory; everything else under `static_dir` is served from
/// disk.
async fn index() -> Html<&'static str> {
  Html(include_str!("../static/index.html"))
}

async fn health() -> &'static str {
  "ok"
}

// ─── Integration tests ────────────────────────────────────────────────────────
