//! API error taxonomy and [`axum::response::IntoResponse`] implementation.
//!
//! Validation problems echo their message to the caller with a 400. The
//! 500 arms answer with a fixed generic message and log the underlying
//! detail server-side — internal error text never reaches the caller.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// A required field was missing or empty.
  #[error("{0}")]
  Validation(String),

  /// The language-model call failed or returned malformed data.
  #[error("gateway error: {0}")]
  Gateway(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// A store write failed. `public` is the fixed message the caller sees.
  #[error("store error: {public}")]
  Store {
    public: &'static str,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },
}

impl ApiError {
  pub fn gateway(
    source: impl std::error::Error + Send + Sync + 'static,
  ) -> Self {
    Self::Gateway(Box::new(source))
  }

  pub fn store(
    public: &'static str,
    source: impl std::error::Error + Send + Sync + 'static,
  ) -> Self {
    Self::Store { public, source: Box::new(source) }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::Validation(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Gateway(e) => {
        tracing::error!("language-model call failed: {e}");
        (StatusCode::INTERNAL_SERVER_ERROR, "Chat failed".to_owned())
      }
      ApiError::Store { public, source } => {
        tracing::error!("store write failed: {source}");
        (StatusCode::INTERNAL_SERVER_ERROR, (*public).to_owned())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}

/// Reject an empty required field. Absent fields never get this far — the
/// typed extractor already turned them into a [`ApiError::Validation`].
pub(crate) fn require_nonempty(
  name: &'static str,
  value: &str,
) -> Result<(), ApiError> {
  if value.is_empty() {
    return Err(ApiError::Validation(format!("{name} is required")));
  }
  Ok(())
}
