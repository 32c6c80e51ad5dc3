//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings, roles as lowercase
//! strings, and the behavioural AI-use flag as 0/1.

use chrono::{DateTime, Utc};
use draftlab_core::{
  conversation::Role,
  record::{
    Demographics, FinalDraft, MessageRecord, Participant, SurveyResponse,
  },
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Role ────────────────────────────────────────────────────────────────────

pub fn encode_role(r: Role) -> &'static str {
  match r {
    Role::System => "system",
    Role::User => "user",
    Role::Assistant => "assistant",
  }
}

pub fn decode_role(s: &str) -> Result<Role> {
  match s {
    "system" => Ok(Role::System),
    "user" => Ok(Role::User),
    "assistant" => Ok(Role::Assistant),
    other => Err(Error::UnknownRole(other.to_owned())),
  }
}

// ─── Behavioural flag ────────────────────────────────────────────────────────

pub fn encode_flag(b: Option<bool>) -> Option<i64> { b.map(i64::from) }

pub fn decode_flag(v: Option<i64>) -> Option<bool> { v.map(|v| v != 0) }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `participants` row.
pub struct RawParticipant {
  pub participant_id: String,
  pub created_at:     String,
}

impl RawParticipant {
  pub fn into_participant(self) -> Result<Participant> {
    Ok(Participant {
      participant_id: self.participant_id,
      created_at:     decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read directly from a `demographics` row.
pub struct RawDemographics {
  pub participant_id:      String,
  pub native_language:     Option<String>,
  pub english_proficiency: Option<i64>,
  pub years_in_us:         Option<f64>,
  pub ai_usage_frequency:  Option<i64>,
  pub submitted_at:        String,
}

impl RawDemographics {
  pub fn into_demographics(self) -> Result<Demographics> {
    Ok(Demographics {
      participant_id:      self.participant_id,
      native_language:     self.native_language,
      english_proficiency: self.english_proficiency,
      years_in_us:         self.years_in_us,
      ai_usage_frequency:  self.ai_usage_frequency,
      submitted_at:        decode_dt(&self.submitted_at)?,
    })
  }
}

/// Raw values read directly from a `messages` row.
pub struct RawMessage {
  pub message_id:     i64,
  pub participant_id: String,
  pub scenario:       String,
  pub role:           String,
  pub content:        String,
  pub recorded_at:    String,
}

impl RawMessage {
  pub fn into_record(self) -> Result<MessageRecord> {
    Ok(MessageRecord {
      message_id:     self.message_id,
      participant_id: self.participant_id,
      scenario:       self.scenario,
      role:           decode_role(&self.role)?,
      content:        self.content,
      recorded_at:    decode_dt(&self.recorded_at)?,
    })
  }
}

/// Raw values read directly from a `survey_responses` row.
pub struct RawSurveyResponse {
  pub response_id:         i64,
  pub participant_id:      String,
  pub scenario:            String,
  pub draft_text:          Option<String>,
  pub used_ai_self_report: Option<String>,
  pub used_ai_behavioral:  Option<i64>,
  pub perceived_risk:      Option<i64>,
  pub authenticity:        Option<i64>,
  pub submitted_at:        String,
}

impl RawSurveyResponse {
  pub fn into_response(self) -> Result<SurveyResponse> {
    Ok(SurveyResponse {
      response_id:         self.response_id,
      participant_id:      self.participant_id,
      scenario:            self.scenario,
      draft_text:          self.draft_text,
      used_ai_self_report: self.used_ai_self_report,
      used_ai_behavioral:  decode_flag(self.used_ai_behavioral),
      perceived_risk:      self.perceived_risk,
      authenticity:        self.authenticity,
      submitted_at:        decode_dt(&self.submitted_at)?,
    })
  }
}

/// Raw values read directly from a `final_drafts` row.
pub struct RawFinalDraft {
  pub draft_id:       i64,
  pub participant_id: String,
  pub scenario:       String,
  pub draft_text:     String,
  pub saved_at:       String,
}

impl RawFinalDraft {
  pub fn into_draft(self) -> Result<FinalDraft> {
    Ok(FinalDraft {
      draft_id:       self.draft_id,
      participant_id: self.participant_id,
      scenario:       self.scenario,
      draft_text:     self.draft_text,
      saved_at:       decode_dt(&self.saved_at)?,
    })
  }
}
