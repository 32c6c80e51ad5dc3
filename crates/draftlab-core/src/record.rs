//! Persisted record types for the five study collections.
//!
//! `participants` and `demographics` are keyed by the externally supplied
//! participant id. The remaining collections are append-only: rows carry
//! store-assigned auto-increment ids and timestamps and are never updated
//! or deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::conversation::Role;

// ─── Participant ─────────────────────────────────────────────────────────────

/// A study participant, identified by an opaque externally supplied id.
/// Created on first demographic or survey submission; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
  pub participant_id: String,
  pub created_at:     DateTime<Utc>,
}

// ─── Demographics ────────────────────────────────────────────────────────────

/// One demographics record per participant. A resubmission replaces the
/// prior record wholesale — no merge, no version history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Demographics {
  pub participant_id:      String,
  pub native_language:     Option<String>,
  /// Self-reported English proficiency, ordinal scale.
  pub english_proficiency: Option<i64>,
  pub years_in_us:         Option<f64>,
  /// How often the participant uses AI tools, ordinal scale.
  pub ai_usage_frequency:  Option<i64>,
  pub submitted_at:        DateTime<Utc>,
}

/// Input to [`crate::store::StudyStore::upsert_demographics`].
/// `submitted_at` is always set by the store; it is not accepted from
/// callers.
#[derive(Debug, Clone)]
pub struct NewDemographics {
  pub participant_id:      String,
  pub native_language:     Option<String>,
  pub english_proficiency: Option<i64>,
  pub years_in_us:         Option<f64>,
  pub ai_usage_frequency:  Option<i64>,
}

// ─── Message audit trail ─────────────────────────────────────────────────────

/// Append-only audit row mirroring one side of one chat exchange. Every
/// exchange writes two rows (user, then assistant) sharing one timestamp;
/// system turns are never mirrored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRecord {
  pub message_id:     i64,
  pub participant_id: String,
  pub scenario:       String,
  pub role:           Role,
  pub content:        String,
  pub recorded_at:    DateTime<Utc>,
}

// ─── Survey responses ────────────────────────────────────────────────────────

/// Append-only record of a reflection submission. A participant may submit
/// any number of these for the same scenario; all are retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyResponse {
  pub response_id:         i64,
  pub participant_id:      String,
  pub scenario:            String,
  pub draft_text:          Option<String>,
  /// Free-text answer to "did you use the AI assistant?".
  pub used_ai_self_report: Option<String>,
  /// Behavioural flag set by the front end; stored as 0/1.
  pub used_ai_behavioral:  Option<bool>,
  pub perceived_risk:      Option<i64>,
  pub authenticity:        Option<i64>,
  pub submitted_at:        DateTime<Utc>,
}

/// Input to [`crate::store::StudyStore::insert_survey_response`].
#[derive(Debug, Clone)]
pub struct NewSurveyResponse {
  pub participant_id:      String,
  pub scenario:            String,
  pub draft_text:          Option<String>,
  pub used_ai_self_report: Option<String>,
  pub used_ai_behavioral:  Option<bool>,
  pub perceived_risk:      Option<i64>,
  pub authenticity:        Option<i64>,
}

// ─── Final drafts ────────────────────────────────────────────────────────────

/// Append-only record of a submitted final draft. Repeated submissions for
/// the same (participant, scenario) all become separate rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalDraft {
  pub draft_id:       i64,
  pub participant_id: String,
  pub scenario:       String,
  pub draft_text:     String,
  pub saved_at:       DateTime<Utc>,
}

/// Input to [`crate::store::StudyStore::insert_final_draft`].
#[derive(Debug, Clone)]
pub struct NewFinalDraft {
  pub participant_id: String,
  pub scenario:       String,
  pub draft_text:     String,
}
