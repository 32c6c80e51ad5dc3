//! The `StudyStore` and `ConversationStore` traits.
//!
//! `StudyStore` is implemented by persistence backends (e.g.
//! `draftlab-store-sqlite`); `ConversationStore` by conversation-history
//! holders (e.g. [`MemoryConversationStore`]). The HTTP layer depends on
//! these abstractions, not on any concrete backend, so either side can be
//! swapped — a bounded or persisted conversation store, a different
//! database — without touching handler logic.
//!
//! [`MemoryConversationStore`]: crate::conversation::MemoryConversationStore

use std::future::Future;

use crate::{
  conversation::ChatTurn,
  record::{
    Demographics, FinalDraft, MessageRecord, NewDemographics, NewFinalDraft,
    NewSurveyResponse, Participant, SurveyResponse,
  },
};

// ─── Persistence ─────────────────────────────────────────────────────────────

/// Abstraction over the study's persistent record collections.
///
/// All collections except `demographics` are append-only; `demographics`
/// has replace-on-resubmit semantics. Timestamps are always assigned by the
/// store, never accepted from callers.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait StudyStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Replace the participant's demographics record wholesale, creating the
  /// participant row first if this is their first submission.
  fn upsert_demographics(
    &self,
    input: NewDemographics,
  ) -> impl Future<Output = Result<Demographics, Self::Error>> + Send + '_;

  /// Append one survey-response row, creating the participant row first if
  /// this is their first submission.
  fn insert_survey_response(
    &self,
    input: NewSurveyResponse,
  ) -> impl Future<Output = Result<SurveyResponse, Self::Error>> + Send + '_;

  /// Append one final-draft row. Does not create a participant row.
  fn insert_final_draft(
    &self,
    input: NewFinalDraft,
  ) -> impl Future<Output = Result<FinalDraft, Self::Error>> + Send + '_;

  /// Append the two audit rows for one completed chat exchange — the
  /// composed user turn and the assistant reply — sharing a single
  /// timestamp assigned here, after the exchange succeeded.
  fn record_exchange<'a>(
    &'a self,
    participant_id: &'a str,
    scenario: &'a str,
    user_content: &'a str,
    assistant_content: &'a str,
  ) -> impl Future<Output = Result<(MessageRecord, MessageRecord), Self::Error>>
  + Send
  + 'a;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Retrieve a participant by id. Returns `None` if not found.
  fn get_participant<'a>(
    &'a self,
    participant_id: &'a str,
  ) -> impl Future<Output = Result<Option<Participant>, Self::Error>> + Send + 'a;

  /// Retrieve the current demographics record for a participant.
  fn get_demographics<'a>(
    &'a self,
    participant_id: &'a str,
  ) -> impl Future<Output = Result<Option<Demographics>, Self::Error>> + Send + 'a;

  /// All audit rows for one (participant, scenario) pair, oldest first.
  fn list_messages<'a>(
    &'a self,
    participant_id: &'a str,
    scenario: &'a str,
  ) -> impl Future<Output = Result<Vec<MessageRecord>, Self::Error>> + Send + 'a;

  /// All survey responses for a participant, oldest first.
  fn list_survey_responses<'a>(
    &'a self,
    participant_id: &'a str,
  ) -> impl Future<Output = Result<Vec<SurveyResponse>, Self::Error>> + Send + 'a;

  /// All final drafts for a participant, oldest first.
  fn list_final_drafts<'a>(
    &'a self,
    participant_id: &'a str,
  ) -> impl Future<Output = Result<Vec<FinalDraft>, Self::Error>> + Send + 'a;
}

// ─── Conversation history ────────────────────────────────────────────────────

/// Abstraction over per-(participant, scenario) conversation history.
///
/// The handler contract relies on a fixed call order: `ensure`, append the
/// user turn, call the gateway with `history`, append the assistant turn.
pub trait ConversationStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Create the conversation for the key if it does not exist, seeded with
  /// a single system turn for `scenario`. Idempotent — an existing
  /// conversation is returned untouched, never reset.
  fn ensure<'a>(
    &'a self,
    participant_id: &'a str,
    scenario: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Append one turn. Callers normally `ensure` first; a missing key is
  /// created empty rather than rejected.
  fn append<'a>(
    &'a self,
    participant_id: &'a str,
    scenario: &'a str,
    turn: ChatTurn,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Snapshot of the ordered turns for the key; empty if never ensured.
  fn history<'a>(
    &'a self,
    participant_id: &'a str,
    scenario: &'a str,
  ) -> impl Future<Output = Result<Vec<ChatTurn>, Self::Error>> + Send + 'a;
}
