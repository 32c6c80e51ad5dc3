//! The `ChatGateway` trait — the seam between the chat handler and the
//! external language-model service.
//!
//! Implemented over HTTP by `draftlab-gateway`; tests substitute a scripted
//! double. The handler never retries: one call per exchange, and a failure
//! surfaces to the caller exactly once.

use std::future::Future;

use crate::conversation::ChatTurn;

/// A synchronous request/response completion service: the entire
/// accumulated turn sequence goes out, one reply message comes back.
pub trait ChatGateway: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Request one completion for the given turn sequence and return the
  /// reply content.
  fn complete<'a>(
    &'a self,
    turns: &'a [ChatTurn],
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;
}
