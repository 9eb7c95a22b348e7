//! Completion client — the single point of entry for all text-completion
//! calls in the API.
//!
//! ARCHITECTURAL RULE: no other module may talk to the completion provider
//! directly. Callers depend on the `CompletionService` trait and treat every
//! failure mode the same way: `None`, which routes them onto their
//! deterministic fallback path. One attempt per operation, no retries —
//! verification happens after the full completion text is returned.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// The text-completion collaborator. `None` means the service is disabled,
/// unreachable, or returned a non-success response — callers fall back to
/// deterministic generation in every case.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage], temperature: f32) -> Option<String>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Chat-completions client. Holding no API key is a valid state: the client
/// reports every call as unavailable and the deterministic paths take over.
#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl ChatClient {
    pub fn new(api_key: Option<String>, base_url: String, model: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            base_url,
            model,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl CompletionService for ChatClient {
    async fn complete(&self, messages: &[ChatMessage], temperature: f32) -> Option<String> {
        let api_key = self.api_key.as_ref()?;

        let request_body = ChatRequest {
            model: &self.model,
            messages,
            temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(err) => {
                warn!("Completion request failed: {err}");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("Completion service returned {status}");
            return None;
        }

        let body: ChatResponse = match response.json().await {
            Ok(body) => body,
            Err(err) => {
                warn!("Completion response could not be decoded: {err}");
                return None;
            }
        };

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        debug!("Completion returned {} chars", content.len());
        Some(content)
    }
}
