//! In-memory conversation state and the fixed prompt templates.
//!
//! A conversation is the ordered turn history for one (participant,
//! scenario) pair. It lives only for the lifetime of the process; the chat
//! handler mirrors every non-system turn into the persistent message audit
//! trail, so a restart loses context but never audit data.

use std::{collections::HashMap, convert::Infallible};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::store::ConversationStore;

// ─── Turns ───────────────────────────────────────────────────────────────────

/// The speaker of one conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  System,
  User,
  Assistant,
}

/// One role-tagged message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
  pub role:    Role,
  pub content: String,
}

impl ChatTurn {
  pub fn system(content: impl Into<String>) -> Self {
    Self { role: Role::System, content: content.into() }
  }

  pub fn user(content: impl Into<String>) -> Self {
    Self { role: Role::User, content: content.into() }
  }

  pub fn assistant(content: impl Into<String>) -> Self {
    Self { role: Role::Assistant, content: content.into() }
  }
}

// ─── Prompt templates ────────────────────────────────────────────────────────

/// Content of the system turn that seeds every conversation, parameterised
/// only by the scenario label. Scopes the assistant to tone and revision
/// work on the participant's own text.
pub fn system_prompt(scenario: &str) -> String {
  format!(
    "You are a writing assistant in a study on academic communication. The \
     participant is drafting a message for the scenario \"{scenario}\". Help \
     them improve the tone, clarity, and politeness of the draft they \
     provide, and suggest revisions only to that text. Do not write \
     unrelated content or hold conversation beyond this drafting task."
  )
}

/// Content of a user turn: the participant's current draft followed by
/// their free-text request, in that fixed order.
pub fn user_turn_content(draft: &str, message: &str) -> String {
  format!("Here is my current draft:\n{draft}\n\nMy request: {message}")
}

// ─── In-memory store ─────────────────────────────────────────────────────────

type Key = (String, String);

/// The canonical [`ConversationStore`]: a process-wide map guarded by an
/// async mutex, so concurrent requests for the same key cannot interleave
/// inside a single `ensure` or `append`. The guard is never held across an
/// await point.
///
/// Conversations are never deleted or expired, and sequences grow without
/// bound — an accepted cost at this system's scale. Everything here is lost
/// on process restart.
#[derive(Debug, Default)]
pub struct MemoryConversationStore {
  conversations: Mutex<HashMap<Key, Vec<ChatTurn>>>,
}

impl MemoryConversationStore {
  pub fn new() -> Self { Self::default() }
}

impl ConversationStore for MemoryConversationStore {
  type Error = Infallible;

  async fn ensure(
    &self,
    participant_id: &str,
    scenario: &str,
  ) -> Result<(), Infallible> {
    let mut conversations = self.conversations.lock().await;
    conversations
      .entry((participant_id.to_owned(), scenario.to_owned()))
      .or_insert_with(|| vec![ChatTurn::system(system_prompt(scenario))]);
    Ok(())
  }

  async fn append(
    &self,
    participant_id: &str,
    scenario: &str,
    turn: ChatTurn,
  ) -> Result<(), Infallible> {
    let mut conversations = self.conversations.lock().await;
    conversations
      .entry((participant_id.to_owned(), scenario.to_owned()))
      .or_default()
      .push(turn);
    Ok(())
  }

  async fn history(
    &self,
    participant_id: &str,
    scenario: &str,
  ) -> Result<Vec<ChatTurn>, Infallible> {
    let conversations = self.conversations.lock().await;
    Ok(
      conversations
        .get(&(participant_id.to_owned(), scenario.to_owned()))
        .cloned()
        .unwrap_or_default(),
    )
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn ensure_seeds_a_single_system_turn() {
    let store = MemoryConversationStore::new();
    store.ensure("p1", "email_to_professor").await.unwrap();

    let history = store.history("p1", "email_to_professor").await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].role, Role::System);
    assert_eq!(history[0].content, system_prompt("email_to_professor"));
  }

  #[tokio::test]
  async fn ensure_never_resets_an_existing_conversation() {
    let store = MemoryConversationStore::new();
    store.ensure("p1", "email_to_professor").await.unwrap();
    store
      .append("p1", "email_to_professor", ChatTurn::user("hello"))
      .await
      .unwrap();

    store.ensure("p1", "email_to_professor").await.unwrap();

    let history = store.history("p1", "email_to_professor").await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].content, "hello");
  }

  #[tokio::test]
  async fn append_preserves_arrival_order() {
    let store = MemoryConversationStore::new();
    store.ensure("p1", "email_to_professor").await.unwrap();
    store
      .append("p1", "email_to_professor", ChatTurn::user("first"))
      .await
      .unwrap();
    store
      .append("p1", "email_to_professor", ChatTurn::assistant("second"))
      .await
      .unwrap();

    let history = store.history("p1", "email_to_professor").await.unwrap();
    let contents: Vec<&str> =
      history.iter().map(|t| t.content.as_str()).collect();
    assert_eq!(contents[1..], ["first", "second"]);
  }

  #[tokio::test]
  async fn keys_are_isolated_per_participant_and_scenario() {
    let store = MemoryConversationStore::new();
    store.ensure("p1", "email_to_professor").await.unwrap();
    store.ensure("p1", "email_to_advisor").await.unwrap();
    store
      .append("p1", "email_to_professor", ChatTurn::user("only here"))
      .await
      .unwrap();

    let other = store.history("p1", "email_to_advisor").await.unwrap();
    assert_eq!(other.len(), 1);
    assert_eq!(other[0].role, Role::System);
  }

  #[tokio::test]
  async fn history_of_an_unknown_key_is_empty() {
    let store = MemoryConversationStore::new();
    let history = store.history("nobody", "nothing").await.unwrap();
    assert!(history.is_empty());
  }

  #[test]
  fn user_turn_content_puts_the_draft_before_the_request() {
    let content = user_turn_content("hey can i get extension", "make this more formal");
    let draft_pos = content.find("hey can i get extension").unwrap();
    let request_pos = content.find("make this more formal").unwrap();
    assert!(draft_pos < request_pos);
  }

  #[test]
  fn system_prompt_names_the_scenario() {
    assert!(system_prompt("email_to_professor").contains("email_to_professor"));
  }
}
