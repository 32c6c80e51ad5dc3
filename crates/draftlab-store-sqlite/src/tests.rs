//! Integration tests for `SqliteStore` against an in-memory database.

use draftlab_core::{
  conversation::Role,
  record::{NewDemographics, NewFinalDraft, NewSurveyResponse},
  store::StudyStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn demographics(participant_id: &str) -> NewDemographics {
  NewDemographics {
    participant_id:      participant_id.into(),
    native_language:     Some("es".into()),
    english_proficiency: Some(4),
    years_in_us:         Some(2.0),
    ai_usage_frequency:  Some(3),
  }
}

fn survey(participant_id: &str, scenario: &str) -> NewSurveyResponse {
  NewSurveyResponse {
    participant_id:      participant_id.into(),
    scenario:            scenario.into(),
    draft_text:          Some("Dear Professor,".into()),
    used_ai_self_report: Some("used it for tone".into()),
    used_ai_behavioral:  Some(true),
    perceived_risk:      Some(2),
    authenticity:        Some(4),
  }
}

// ─── Demographics ────────────────────────────────────────────────────────────

#[tokio::test]
async fn upsert_and_get_demographics() {
  let s = store().await;

  s.upsert_demographics(demographics("p1")).await.unwrap();

  let fetched = s.get_demographics("p1").await.unwrap().unwrap();
  assert_eq!(fetched.participant_id, "p1");
  assert_eq!(fetched.native_language.as_deref(), Some("es"));
  assert_eq!(fetched.english_proficiency, Some(4));
  assert_eq!(fetched.years_in_us, Some(2.0));
  assert_eq!(fetched.ai_usage_frequency, Some(3));
}

#[tokio::test]
async fn resubmission_replaces_the_whole_record() {
  let s = store().await;

  s.upsert_demographics(demographics("p1")).await.unwrap();

  // Second submission omits the language — the old value must not survive.
  let mut second = demographics("p1");
  second.english_proficiency = Some(5);
  second.native_language = None;
  s.upsert_demographics(second).await.unwrap();

  let fetched = s.get_demographics("p1").await.unwrap().unwrap();
  assert_eq!(fetched.english_proficiency, Some(5));
  assert_eq!(fetched.native_language, None);
}

#[tokio::test]
async fn get_demographics_missing_returns_none() {
  let s = store().await;
  let result = s.get_demographics("nobody").await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn demographics_creates_the_participant_once() {
  let s = store().await;

  s.upsert_demographics(demographics("p1")).await.unwrap();
  let first = s.get_participant("p1").await.unwrap().unwrap();

  s.upsert_demographics(demographics("p1")).await.unwrap();
  let second = s.get_participant("p1").await.unwrap().unwrap();

  assert_eq!(first.created_at, second.created_at);
}

// ─── Survey responses ────────────────────────────────────────────────────────

#[tokio::test]
async fn survey_submissions_append() {
  let s = store().await;

  s.insert_survey_response(survey("p1", "email_to_professor"))
    .await
    .unwrap();
  s.insert_survey_response(survey("p1", "email_to_professor"))
    .await
    .unwrap();

  let responses = s.list_survey_responses("p1").await.unwrap();
  assert_eq!(responses.len(), 2);
  assert!(responses[0].response_id < responses[1].response_id);
}

#[tokio::test]
async fn survey_submission_creates_the_participant() {
  let s = store().await;

  s.insert_survey_response(survey("p1", "email_to_professor"))
    .await
    .unwrap();

  assert!(s.get_participant("p1").await.unwrap().is_some());
}

#[tokio::test]
async fn survey_behavioral_flag_survives_the_integer_column() {
  let s = store().await;

  let mut input = survey("p1", "email_to_professor");
  input.used_ai_behavioral = Some(false);
  s.insert_survey_response(input).await.unwrap();

  let mut input = survey("p1", "email_to_professor");
  input.used_ai_behavioral = None;
  s.insert_survey_response(input).await.unwrap();

  let responses = s.list_survey_responses("p1").await.unwrap();
  assert_eq!(responses[0].used_ai_behavioral, Some(false));
  assert_eq!(responses[1].used_ai_behavioral, None);
}

// ─── Final drafts ────────────────────────────────────────────────────────────

#[tokio::test]
async fn final_drafts_append() {
  let s = store().await;

  for text in ["v1", "v2"] {
    s.insert_final_draft(NewFinalDraft {
      participant_id: "p1".into(),
      scenario:       "email_to_professor".into(),
      draft_text:     text.into(),
    })
    .await
    .unwrap();
  }

  let drafts = s.list_final_drafts("p1").await.unwrap();
  assert_eq!(drafts.len(), 2);
  assert_eq!(drafts[0].draft_text, "v1");
  assert_eq!(drafts[1].draft_text, "v2");
}

#[tokio::test]
async fn final_draft_does_not_create_a_participant() {
  let s = store().await;

  s.insert_final_draft(NewFinalDraft {
    participant_id: "p1".into(),
    scenario:       "email_to_professor".into(),
    draft_text:     "Dear Professor,".into(),
  })
  .await
  .unwrap();

  assert!(s.get_participant("p1").await.unwrap().is_none());
}

// ─── Message audit trail ─────────────────────────────────────────────────────

#[tokio::test]
async fn record_exchange_writes_user_then_assistant_with_one_timestamp() {
  let s = store().await;

  let (user_row, assistant_row) = s
    .record_exchange("p1", "email_to_professor", "my draft + request", "Certainly...")
    .await
    .unwrap();

  assert_eq!(user_row.role, Role::User);
  assert_eq!(assistant_row.role, Role::Assistant);
  assert_eq!(user_row.recorded_at, assistant_row.recorded_at);
  // The pair commits as one unit, so its row ids are adjacent.
  assert_eq!(assistant_row.message_id, user_row.message_id + 1);

  let rows = s.list_messages("p1", "email_to_professor").await.unwrap();
  assert_eq!(rows.len(), 2);
  assert_eq!(rows[0].role, Role::User);
  assert_eq!(rows[0].content, "my draft + request");
  assert_eq!(rows[1].role, Role::Assistant);
  assert_eq!(rows[1].content, "Certainly...");
  assert_eq!(rows[0].recorded_at, rows[1].recorded_at);
}

#[tokio::test]
async fn exchanges_accumulate_in_order() {
  let s = store().await;

  s.record_exchange("p1", "email_to_professor", "first ask", "first reply")
    .await
    .unwrap();
  s.record_exchange("p1", "email_to_professor", "second ask", "second reply")
    .await
    .unwrap();

  let rows = s.list_messages("p1", "email_to_professor").await.unwrap();
  assert_eq!(rows.len(), 4);
  let contents: Vec<&str> = rows.iter().map(|r| r.content.as_str()).collect();
  assert_eq!(
    contents,
    ["first ask", "first reply", "second ask", "second reply"]
  );
}

#[tokio::test]
async fn list_messages_is_scoped_to_participant_and_scenario() {
  let s = store().await;

  s.record_exchange("p1", "email_to_professor", "a", "b")
    .await
    .unwrap();
  s.record_exchange("p1", "email_to_advisor", "c", "d")
    .await
    .unwrap();
  s.record_exchange("p2", "email_to_professor", "e", "f")
    .await
    .unwrap();

  let rows = s.list_messages("p1", "email_to_professor").await.unwrap();
  assert_eq!(rows.len(), 2);
  assert!(rows.iter().all(|r| r.participant_id == "p1"));
  assert!(rows.iter().all(|r| r.scenario == "email_to_professor"));
}
