//! Handler for `POST /chat` — the conversation-and-persistence exchange.
//!
//! The step order is the contract: ensure the conversation, append the
//! user turn, call the gateway with the whole history, append the reply,
//! then write the two audit rows. A gateway failure leaves the unanswered
//! user turn in place (it stays part of the context for the next
//! exchange) and writes no audit rows.

use std::sync::Arc;

use axum::{Json, extract::State};
use draftlab_core::{
  conversation::{ChatTurn, user_turn_content},
  gateway::ChatGateway,
  store::{ConversationStore, StudyStore},
};
use serde::{Deserialize, Serialize};

use crate::{
  ApiJson,
  error::{ApiError, require_nonempty},
};

/// State for the chat route: the only handler that needs all three
/// backends.
pub struct ChatState<S, C, G> {
  pub store:         Arc<S>,
  pub conversations: Arc<C>,
  pub gateway:       Arc<G>,
}

// Derived `Clone` would demand `Clone` of the backends themselves; the
// arcs are all that needs cloning.
impl<S, C, G> Clone for ChatState<S, C, G> {
  fn clone(&self) -> Self {
    Self {
      store:         Arc::clone(&self.store),
      conversations: Arc::clone(&self.conversations),
      gateway:       Arc::clone(&self.gateway),
    }
  }
}

#[derive(Debug, Deserialize)]
pub struct ChatBody {
  #[serde(rename = "userId")]
  pub user_id:  String,
  pub message:  String,
  pub scenario: String,
  /// May be the empty string; the key itself is required.
  pub draft:    String,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
  pub reply: String,
}

/// `POST /chat`
pub async fn handler<S, C, G>(
  State(state): State<ChatState<S, C, G>>,
  ApiJson(body): ApiJson<ChatBody>,
) -> Result<Json<ChatReply>, ApiError>
where
  S: StudyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  C: ConversationStore,
  C::Error: std::error::Error + Send + Sync + 'static,
  G: ChatGateway,
  G::Error: std::error::Error + Send + Sync + 'static,
{
  require_nonempty("userId", &body.user_id)?;
  require_nonempty("message", &body.message)?;
  require_nonempty("scenario", &body.scenario)?;

  let ChatBody { user_id, message, scenario, draft } = body;

  state
    .conversations
    .ensure(&user_id, &scenario)
    .await
    .map_err(|e| ApiError::store("Chat failed", e))?;

  let user_content = user_turn_content(&draft, &message);
  state
    .conversations
    .append(&user_id, &scenario, ChatTurn::user(user_content.clone()))
    .await
    .map_err(|e| ApiError::store("Chat failed", e))?;

  let turns = state
    .conversations
    .history(&user_id, &scenario)
    .await
    .map_err(|e| ApiError::store("Chat failed", e))?;

  let reply = state
    .gateway
    .complete(&turns)
    .await
    .map_err(ApiError::gateway)?;

  state
    .conversations
    .append(&user_id, &scenario, ChatTurn::assistant(reply.clone()))
    .await
    .map_err(|e| ApiError::store("Chat failed", e))?;

  state
    .store
    .record_exchange(&user_id, &scenario, &user_content, &reply)
    .await
    .map_err(|e| ApiError::store("Chat failed", e))?;

  Ok(Json(ChatReply { reply }))
}
