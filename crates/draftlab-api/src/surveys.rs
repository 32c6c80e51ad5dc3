//! Handler for `POST /survey-response`.

use std::sync::Arc;

use axum::{Json, extract::State};
use draftlab_core::{record::NewSurveyResponse, store::StudyStore};
use serde::Deserialize;

use crate::{
  ApiJson, Saved,
  error::{ApiError, require_nonempty},
};

#[derive(Debug, Deserialize)]
pub struct SurveyResponseBody {
  pub participant_id:      String,
  pub scenario:            String,
  pub draft_text:          Option<String>,
  pub used_ai_self_report: Option<String>,
  pub used_ai_behavioral:  Option<bool>,
  pub perceived_risk:      Option<i64>,
  pub authenticity:        Option<i64>,
}

/// `POST /survey-response` — pure append; repeated submissions for the
/// same participant and scenario all become separate rows.
pub async fn save<S>(
  State(store): State<Arc<S>>,
  ApiJson(body): ApiJson<SurveyResponseBody>,
) -> Result<Json<Saved>, ApiError>
where
  S: StudyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  require_nonempty("participant_id", &body.participant_id)?;
  require_nonempty("scenario", &body.scenario)?;

  store
    .insert_survey_response(NewSurveyResponse {
      participant_id:      body.participant_id,
      scenario:            body.scenario,
      draft_text:          body.draft_text,
      used_ai_self_report: body.used_ai_self_report,
      used_ai_behavioral:  body.used_ai_behavioral,
      perceived_risk:      body.perceived_risk,
      authenticity:        body.authenticity,
    })
    .await
    .map_err(|e| ApiError::store("Failed to save survey response", e))?;

  Ok(Json(Saved::default()))
}
