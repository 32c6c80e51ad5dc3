//! HTTP client for the local language-model endpoint.
//!
//! Speaks the Ollama chat API: one POST per exchange carrying the full
//! accumulated turn sequence, no streaming, one reply message back.
//! Implements [`ChatGateway`] so the handlers stay independent of the wire
//! format.

pub mod error;

pub use error::{Error, Result};

use std::time::Duration;

use draftlab_core::{conversation::ChatTurn, gateway::ChatGateway};
use reqwest::Client;
use serde::{Deserialize, Serialize};

// ─── Config ──────────────────────────────────────────────────────────────────

/// Connection settings for the model endpoint.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
  /// Base URL of the model server, e.g. `http://127.0.0.1:11434`.
  pub base_url: String,
  /// Model identifier sent with every request.
  pub model:    String,
  /// Hard cap on one completion round-trip. Local models are slow; the
  /// default is generous.
  pub timeout:  Duration,
}

impl Default for GatewayConfig {
  fn default() -> Self {
    Self {
      base_url: "http://127.0.0.1:11434".into(),
      model:    "llama3".into(),
      timeout:  Duration::from_secs(120),
    }
  }
}

// ─── Wire format ─────────────────────────────────────────────────────────────

/// Request body for `POST /api/chat`. `ChatTurn` already serialises with
/// lowercase roles, which is exactly the wire shape.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
  model:    &'a str,
  messages: &'a [ChatTurn],
  stream:   bool,
}

/// The slice of the response body we care about; everything else the model
/// server sends is ignored.
#[derive(Debug, Deserialize)]
struct ChatResponse {
  message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
  content: String,
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// Gateway to an Ollama-compatible chat endpoint.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct OllamaGateway {
  client: Client,
  config: GatewayConfig,
}

impl OllamaGateway {
  pub fn new(config: GatewayConfig) -> Result<Self> {
    let client = Client::builder().timeout(config.timeout).build()?;
    Ok(Self { client, config })
  }

  fn url(&self) -> String {
    format!("{}/api/chat", self.config.base_url.trim_end_matches('/'))
  }
}

impl ChatGateway for OllamaGateway {
  type Error = Error;

  /// One completion round-trip. No retry: a failure here surfaces to the
  /// caller exactly once.
  async fn complete(&self, turns: &[ChatTurn]) -> Result<String> {
    let request = ChatRequest {
      model:    &self.config.model,
      messages: turns,
      stream:   false,
    };

    let resp = self.client.post(self.url()).json(&request).send().await?;

    let status = resp.status();
    if !status.is_success() {
      return Err(Error::Status(status));
    }

    let body: ChatResponse = resp.json().await?;
    Ok(body.message.content)
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn request_serialises_to_the_ollama_wire_shape() {
    let turns = vec![
      ChatTurn::system("stay on task"),
      ChatTurn::user("make this more formal"),
    ];
    let request = ChatRequest {
      model:    "llama3",
      messages: &turns,
      stream:   false,
    };

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(
      value,
      json!({
        "model": "llama3",
        "messages": [
          { "role": "system", "content": "stay on task" },
          { "role": "user", "content": "make this more formal" },
        ],
        "stream": false,
      })
    );
  }

  #[test]
  fn reply_is_read_from_message_content() {
    let body = json!({
      "model": "llama3",
      "created_at": "2024-05-01T10:00:00Z",
      "message": { "role": "assistant", "content": "Certainly..." },
      "done": true,
    });

    let parsed: ChatResponse = serde_json::from_value(body).unwrap();
    assert_eq!(parsed.message.content, "Certainly...");
  }

  #[test]
  fn url_tolerates_a_trailing_slash() {
    let gateway = OllamaGateway::new(GatewayConfig {
      base_url: "http://127.0.0.1:11434/".into(),
      ..GatewayConfig::default()
    })
    .unwrap();

    assert_eq!(gateway.url(), "http://127.0.0.1:11434/api/chat");
  }
}
