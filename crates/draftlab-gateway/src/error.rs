//! Error type for `draftlab-gateway`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Transport-level failure: connect, timeout, or an undecodable body.
  #[error("model request failed: {0}")]
  Request(#[from] reqwest::Error),

  /// The endpoint answered, but not with a completion.
  #[error("model endpoint returned {0}")]
  Status(reqwest::StatusCode),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
