//! Handler for `POST /save-draft`.

use std::sync::Arc;

use axum::{Json, extract::State};
use draftlab_core::{record::NewFinalDraft, store::StudyStore};
use serde::Deserialize;

use crate::{
  ApiJson, Saved,
  error::{ApiError, require_nonempty},
};

#[derive(Debug, Deserialize)]
pub struct SaveDraftBody {
  pub participant_id: String,
  pub scenario:       String,
  pub draft_text:     String,
}

/// `POST /save-draft` — append one final-draft row. All three fields are
/// required and non-empty.
pub async fn save<S>(
  State(store): State<Arc<S>>,
  ApiJson(body): ApiJson<SaveDraftBody>,
) -> Result<Json<Saved>, ApiError>
where
  S: StudyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  require_nonempty("participant_id", &body.participant_id)?;
  require_nonempty("scenario", &body.scenario)?;
  require_nonempty("draft_text", &body.draft_text)?;

  store
    .insert_final_draft(NewFinalDraft {
      participant_id: body.participant_id,
      scenario:       body.scenario,
      draft_text:     body.draft_text,
    })
    .await
    .map_err(|e| ApiError::store("Failed to save draft", e))?;

  Ok(Json(Saved::default()))
}
