//! Generative Backend Adapter
//!
//! Sends a rendered prompt to an Ollama-style chat endpoint and hands back
//! the completion untouched.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use super::types::ConversionFailure;

/// Anything that turns a prompt into a completion.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Address of the service, for diagnostics.
    fn endpoint(&self) -> &str;

    async fn complete(&self, model: &str, prompt: String) -> Result<String, ConversionFailure>;
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    message: Option<ChatMessage>,
    #[serde(default)]
    error: Option<String>,
}

/// Blocking (non-streaming) client for `POST {base_url}/api/chat`.
pub struct OllamaChatBackend {
    client: Client,
    base_url: String,
}

impl OllamaChatBackend {
    pub fn new(base_url: impl Into<String>, connect_timeout: Duration) -> Self {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn unreachable(&self, err: impl std::fmt::Display) -> ConversionFailure {
        ConversionFailure::backend_unavailable(format!(
            "Failed to reach generative service at {}. Ensure Ollama is running. ({})",
            self.base_url, err
        ))
    }
}

#[async_trait]
impl GenerativeBackend for OllamaChatBackend {
    fn endpoint(&self) -> &str {
        &self.base_url
    }

    async fn complete(&self, model: &str, prompt: String) -> Result<String, ConversionFailure> {
        let body = ChatRequest {
            model,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            stream: false,
        };

        debug!("POST {}/api/chat (model={})", self.base_url, model);
        let res = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;

        let status = res.status();
        let text = res.text().await.map_err(|e| self.unreachable(e))?;
        let parsed: Option<ChatResponse> = serde_json::from_str(&text).ok();

        if !status.is_success() {
            let detail = parsed
                .and_then(|r| r.error)
                .unwrap_or_else(|| text.trim().to_string());
            return Err(ConversionFailure::backend_error(format!(
                "Generative service returned {}: {}",
                status, detail
            )));
        }

        match parsed {
            Some(ChatResponse { error: Some(err), .. }) => Err(ConversionFailure::backend_error(err)),
            Some(ChatResponse { message: Some(msg), .. }) => Ok(msg.content),
            _ => Err(ConversionFailure::backend_error(
                "Failed to parse content from generative service response",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_format() {
        let body = ChatRequest {
            model: "codellama",
            messages: vec![ChatMessage {
                role: "user".into(),
                content: "hi".into(),
            }],
            stream: false,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "codellama",
                "messages": [{ "role": "user", "content": "hi" }],
                "stream": false
            })
        );
    }

    #[test]
    fn test_base_url_is_normalized() {
        let backend = OllamaChatBackend::new("http://127.0.0.1:11434/", Duration::from_secs(1));
        assert_eq!(backend.endpoint(), "http://127.0.0.1:11434");
    }

    #[tokio::test]
    async fn test_connection_refused_is_unavailable() {
        // Port 1 is reserved and closed on any sane test host.
        let backend = OllamaChatBackend::new("http://127.0.0.1:1", Duration::from_secs(2));
        let err = backend.complete("codellama", "x".into()).await.unwrap_err();
        assert_eq!(err.kind, crate::conversion::FailureKind::BackendUnavailable);
        assert!(err.message.contains("127.0.0.1:1"));
    }
}
