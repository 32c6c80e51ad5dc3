//! JSON API for the draftlab study backend.
//!
//! Exposes an axum [`Router`] over any [`StudyStore`] /
//! [`ConversationStore`] / [`ChatGateway`] triple. The liveness route,
//! static files, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .merge(draftlab_api::api_router(store, conversations, gateway))
//! ```

pub mod chat;
pub mod demographics;
pub mod drafts;
pub mod error;
pub mod surveys;

use std::sync::Arc;

use axum::{
  Json, Router,
  extract::{FromRequest, Request},
  routing::post,
};
use draftlab_core::{
  gateway::ChatGateway,
  store::{ConversationStore, StudyStore},
};
use serde::{Serialize, de::DeserializeOwned};

pub use chat::ChatState;
pub use error::ApiError;

/// Build a fully-materialised API router.
///
/// The returned `Router<()>` can be merged into any parent router
/// regardless of its own state type.
pub fn api_router<S, C, G>(
  store: Arc<S>,
  conversations: Arc<C>,
  gateway: Arc<G>,
) -> Router<()>
where
  S: StudyStore + 'static,
  C: ConversationStore + 'static,
  G: ChatGateway + 'static,
{
  let chat_state = ChatState {
    store: Arc::clone(&store),
    conversations,
    gateway,
  };

  Router::new()
    .route("/demographics", post(demographics::save::<S>))
    .route("/survey-response", post(surveys::save::<S>))
    .route("/save-draft", post(drafts::save::<S>))
    .with_state(store)
    .merge(
      Router::new()
        .route("/chat", post(chat::handler::<S, C, G>))
        .with_state(chat_state),
    )
}

// ─── Request extraction ──────────────────────────────────────────────────────

/// JSON body extractor whose rejection is an [`ApiError::Validation`], so a
/// missing field or malformed body answers as a 400 with an `error` field
/// instead of axum's bare rejection text.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
  T: DeserializeOwned,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, ApiError> {
    let Json(value) = Json::<T>::from_request(req, state)
      .await
      .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
    Ok(Self(value))
  }
}

// ─── Success body ────────────────────────────────────────────────────────────

/// Body returned by the three write endpoints on success.
#[derive(Debug, Serialize)]
pub struct Saved {
  pub status: &'static str,
}

impl Default for Saved {
  fn default() -> Self { Self { status: "saved" } }
}
