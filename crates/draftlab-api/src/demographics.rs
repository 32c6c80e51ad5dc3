//! Handler for `POST /demographics`.

use std::sync::Arc;

use axum::{Json, extract::State};
use draftlab_core::{record::NewDemographics, store::StudyStore};
use serde::Deserialize;

use crate::{
  ApiJson, Saved,
  error::{ApiError, require_nonempty},
};

#[derive(Debug, Deserialize)]
pub struct DemographicsBody {
  pub participant_id:      String,
  pub native_language:     Option<String>,
  pub english_proficiency: Option<i64>,
  pub years_in_us:         Option<f64>,
  pub ai_usage_frequency:  Option<i64>,
}

/// `POST /demographics` — upsert: the latest submission replaces the prior
/// record wholesale.
pub async fn save<S>(
  State(store): State<Arc<S>>,
  ApiJson(body): ApiJson<DemographicsBody>,
) -> Result<Json<Saved>, ApiError>
where
  S: StudyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  require_nonempty("participant_id", &body.participant_id)?;

  store
    .upsert_demographics(NewDemographics {
      participant_id:      body.participant_id,
      native_language:     body.native_language,
      english_proficiency: body.english_proficiency,
      years_in_us:         body.years_in_us,
      ai_usage_frequency:  body.ai_usage_frequency,
    })
    .await
    .map_err(|e| ApiError::store("Failed to save demographics", e))?;

  Ok(Json(Saved::default()))
}
