//! [`SqliteStore`] — the SQLite implementation of [`StudyStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use draftlab_core::{
  conversation::Role,
  record::{
    Demographics, FinalDraft, MessageRecord, NewDemographics, NewFinalDraft,
    NewSurveyResponse, Participant, SurveyResponse,
  },
  store::StudyStore,
};

use crate::{
  encode::{
    encode_dt, encode_flag, encode_role, RawDemographics, RawFinalDraft,
    RawMessage, RawParticipant, RawSurveyResponse,
  },
  schema::SCHEMA,
  Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A study store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── StudyStore impl ─────────────────────────────────────────────────────────

impl StudyStore for SqliteStore {
  type Error = crate::Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn upsert_demographics(
    &self,
    input: NewDemographics,
  ) -> Result<Demographics> {
    let record = Demographics {
      participant_id:      input.participant_id,
      native_language:     input.native_language,
      english_proficiency: input.english_proficiency,
      years_in_us:         input.years_in_us,
      ai_usage_frequency:  input.ai_usage_frequency,
      submitted_at:        Utc::now(),
    };

    let participant_id      = record.participant_id.clone();
    let native_language     = record.native_language.clone();
    let english_proficiency = record.english_proficiency;
    let years_in_us         = record.years_in_us;
    let ai_usage_frequency  = record.ai_usage_frequency;
    let at_str              = encode_dt(record.submitted_at);

    self
      .conn
      .call(move |conn| {
        // INSERT OR IGNORE keeps the original created_at on resubmission.
        conn.execute(
          "INSERT OR IGNORE INTO participants (participant_id, created_at)
           VALUES (?1, ?2)",
          rusqlite::params![participant_id, at_str],
        )?;
        // INSERT OR REPLACE: the whole row is swapped, never merged.
        conn.execute(
          "INSERT OR REPLACE INTO demographics (
             participant_id, native_language, english_proficiency,
             years_in_us, ai_usage_frequency, submitted_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            participant_id,
            native_language,
            english_proficiency,
            years_in_us,
            ai_usage_frequency,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(record)
  }

  async fn insert_survey_response(
    &self,
    input: NewSurveyResponse,
  ) -> Result<SurveyResponse> {
    let submitted_at = Utc::now();

    let participant_id = input.participant_id.clone();
    let scenario       = input.scenario.clone();
    let draft_text     = input.draft_text.clone();
    let self_report    = input.used_ai_self_report.clone();
    let behavioral     = encode_flag(input.used_ai_behavioral);
    let perceived_risk = input.perceived_risk;
    let authenticity   = input.authenticity;
    let at_str         = encode_dt(submitted_at);

    let response_id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO participants (participant_id, created_at)
           VALUES (?1, ?2)",
          rusqlite::params![participant_id, at_str],
        )?;
        conn.execute(
          "INSERT INTO survey_responses (
             participant_id, scenario, draft_text, used_ai_self_report,
             used_ai_behavioral, perceived_risk, authenticity, submitted_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            participant_id,
            scenario,
            draft_text,
            self_report,
            behavioral,
            perceived_risk,
            authenticity,
            at_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(SurveyResponse {
      response_id,
      participant_id:      input.participant_id,
      scenario:            input.scenario,
      draft_text:          input.draft_text,
      used_ai_self_report: input.used_ai_self_report,
      used_ai_behavioral:  input.used_ai_behavioral,
      perceived_risk:      input.perceived_risk,
      authenticity:        input.authenticity,
      submitted_at,
    })
  }

  async fn insert_final_draft(
    &self,
    input: NewFinalDraft,
  ) -> Result<FinalDraft> {
    let saved_at = Utc::now();

    let participant_id = input.participant_id.clone();
    let scenario       = input.scenario.clone();
    let draft_text     = input.draft_text.clone();
    let at_str         = encode_dt(saved_at);

    let draft_id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO final_drafts (participant_id, scenario, draft_text, saved_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![participant_id, scenario, draft_text, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(FinalDraft {
      draft_id,
      participant_id: input.participant_id,
      scenario:       input.scenario,
      draft_text:     input.draft_text,
      saved_at,
    })
  }

  async fn record_exchange(
    &self,
    participant_id: &str,
    scenario: &str,
    user_content: &str,
    assistant_content: &str,
  ) -> Result<(MessageRecord, MessageRecord)> {
    // One timestamp for both rows, captured here — after the gateway call
    // has already returned.
    let recorded_at = Utc::now();

    let id_owned        = participant_id.to_owned();
    let scenario_owned  = scenario.to_owned();
    let user_owned      = user_content.to_owned();
    let assistant_owned = assistant_content.to_owned();
    let at_str          = encode_dt(recorded_at);

    let (user_id, assistant_id) = self
      .conn
      .call(move |conn| {
        // One transaction: both rows land, or neither does.
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO messages (participant_id, scenario, role, content, recorded_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            id_owned,
            scenario_owned,
            encode_role(Role::User),
            user_owned,
            at_str,
          ],
        )?;
        let user_id = tx.last_insert_rowid();

        tx.execute(
          "INSERT INTO messages (participant_id, scenario, role, content, recorded_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            id_owned,
            scenario_owned,
            encode_role(Role::Assistant),
            assistant_owned,
            at_str,
          ],
        )?;
        let assistant_id = tx.last_insert_rowid();

        tx.commit()?;
        Ok((user_id, assistant_id))
      })
      .await?;

    let user_row = MessageRecord {
      message_id:     user_id,
      participant_id: participant_id.to_owned(),
      scenario:       scenario.to_owned(),
      role:           Role::User,
      content:        user_content.to_owned(),
      recorded_at,
    };
    let assistant_row = MessageRecord {
      message_id:     assistant_id,
      participant_id: participant_id.to_owned(),
      scenario:       scenario.to_owned(),
      role:           Role::Assistant,
      content:        assistant_content.to_owned(),
      recorded_at,
    };

    Ok((user_row, assistant_row))
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn get_participant(
    &self,
    participant_id: &str,
  ) -> Result<Option<Participant>> {
    let id = participant_id.to_owned();

    let raw: Option<RawParticipant> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT participant_id, created_at FROM participants
               WHERE participant_id = ?1",
              rusqlite::params![id],
              |row| {
                Ok(RawParticipant {
                  participant_id: row.get(0)?,
                  created_at:     row.get(1)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawParticipant::into_participant).transpose()
  }

  async fn get_demographics(
    &self,
    participant_id: &str,
  ) -> Result<Option<Demographics>> {
    let id = participant_id.to_owned();

    let raw: Option<RawDemographics> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT participant_id, native_language, english_proficiency,
                      years_in_us, ai_usage_frequency, submitted_at
               FROM demographics WHERE participant_id = ?1",
              rusqlite::params![id],
              |row| {
                Ok(RawDemographics {
                  participant_id:      row.get(0)?,
                  native_language:     row.get(1)?,
                  english_proficiency: row.get(2)?,
                  years_in_us:         row.get(3)?,
                  ai_usage_frequency:  row.get(4)?,
                  submitted_at:        row.get(5)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawDemographics::into_demographics).transpose()
  }

  async fn list_messages(
    &self,
    participant_id: &str,
    scenario: &str,
  ) -> Result<Vec<MessageRecord>> {
    let id   = participant_id.to_owned();
    let scen = scenario.to_owned();

    let raws: Vec<RawMessage> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT message_id, participant_id, scenario, role, content, recorded_at
           FROM messages
           WHERE participant_id = ?1 AND scenario = ?2
           ORDER BY message_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id, scen], |row| {
            Ok(RawMessage {
              message_id:     row.get(0)?,
              participant_id: row.get(1)?,
              scenario:       row.get(2)?,
              role:           row.get(3)?,
              content:        row.get(4)?,
              recorded_at:    row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMessage::into_record).collect()
  }

  async fn list_survey_responses(
    &self,
    participant_id: &str,
  ) -> Result<Vec<SurveyResponse>> {
    let id = participant_id.to_owned();

    let raws: Vec<RawSurveyResponse> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT response_id, participant_id, scenario, draft_text,
                  used_ai_self_report, used_ai_behavioral, perceived_risk,
                  authenticity, submitted_at
           FROM survey_responses
           WHERE participant_id = ?1
           ORDER BY response_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id], |row| {
            Ok(RawSurveyResponse {
              response_id:         row.get(0)?,
              participant_id:      row.get(1)?,
              scenario:            row.get(2)?,
              draft_text:          row.get(3)?,
              used_ai_self_report: row.get(4)?,
              used_ai_behavioral:  row.get(5)?,
              perceived_risk:      row.get(6)?,
              authenticity:        row.get(7)?,
              submitted_at:        row.get(8)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSurveyResponse::into_response).collect()
  }

  async fn list_final_drafts(
    &self,
    participant_id: &str,
  ) -> Result<Vec<FinalDraft>> {
    let id = participant_id.to_owned();

    let raws: Vec<RawFinalDraft> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT draft_id, participant_id, scenario, draft_text, saved_at
           FROM final_drafts
           WHERE participant_id = ?1
           ORDER BY draft_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id], |row| {
            Ok(RawFinalDraft {
              draft_id:       row.get(0)?,
              participant_id: row.get(1)?,
              scenario:       row.get(2)?,
              draft_text:     row.get(3)?,
              saved_at:       row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawFinalDraft::into_draft).collect()
  }
}
