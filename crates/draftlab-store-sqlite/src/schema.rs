//! SQL schema for the draftlab SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Participants are created on first demographic or survey submission and
-- never mutated afterwards.
CREATE TABLE IF NOT EXISTS participants (
    participant_id TEXT PRIMARY KEY,
    created_at     TEXT NOT NULL     -- ISO 8601 UTC; server-assigned
);

-- One row per participant. Resubmission replaces the row wholesale.
CREATE TABLE IF NOT EXISTS demographics (
    participant_id      TEXT PRIMARY KEY REFERENCES participants(participant_id),
    native_language     TEXT,
    english_proficiency INTEGER,
    years_in_us         REAL,
    ai_usage_frequency  INTEGER,
    submitted_at        TEXT NOT NULL
);

-- Chat audit trail. Strictly append-only: no UPDATE or DELETE is ever
-- issued against this table. participant_id is a plain column, not a
-- foreign key — a chat may begin before any demographic submission.
CREATE TABLE IF NOT EXISTS messages (
    message_id     INTEGER PRIMARY KEY AUTOINCREMENT,
    participant_id TEXT NOT NULL,
    scenario       TEXT NOT NULL,
    role           TEXT NOT NULL,    -- 'user' | 'assistant'
    content        TEXT NOT NULL,
    recorded_at    TEXT NOT NULL
);

-- Reflection submissions; append-only, repeats allowed.
CREATE TABLE IF NOT EXISTS survey_responses (
    response_id         INTEGER PRIMARY KEY AUTOINCREMENT,
    participant_id      TEXT NOT NULL REFERENCES participants(participant_id),
    scenario            TEXT NOT NULL,
    draft_text          TEXT,
    used_ai_self_report TEXT,
    used_ai_behavioral  INTEGER,     -- boolean stored as 0/1
    perceived_risk      INTEGER,
    authenticity        INTEGER,
    submitted_at        TEXT NOT NULL
);

-- Submitted final drafts; append-only, repeats allowed. No foreign key for
-- the same reason as messages.
CREATE TABLE IF NOT EXISTS final_drafts (
    draft_id       INTEGER PRIMARY KEY AUTOINCREMENT,
    participant_id TEXT NOT NULL,
    scenario       TEXT NOT NULL,
    draft_text     TEXT NOT NULL,
    saved_at       TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS messages_key_idx       ON messages(participant_id, scenario);
CREATE INDEX IF NOT EXISTS survey_participant_idx ON survey_responses(participant_id);
CREATE INDEX IF NOT EXISTS drafts_participant_idx ON final_drafts(participant_id);

PRAGMA user_version = 1;
";
