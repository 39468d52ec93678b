/// LLM Client — the single point of entry for all completion-endpoint calls.
///
/// ARCHITECTURAL RULE: No other module may call the Groq API directly.
/// All LLM interactions MUST go through a `CompletionTransport`.
///
/// Model: llama3-8b-8192 (hardcoded — do not make configurable to prevent drift)
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

pub const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
/// The model used for every generation call.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "llama3-8b-8192";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: &'static str,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatRequest {
    /// A two-message exchange: fixed system instructions, then the user prompt.
    pub fn new(system: &str, prompt: String) -> Self {
        Self {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        }
    }
}

/// Raw outcome of one completion call. Status interpretation is left to the caller,
/// since non-2xx bodies carry an error envelope the caller wants to read.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Success envelope: `{ choices: [ { message: { content } } ] }`.
#[derive(Debug, Deserialize)]
pub struct ChatCompletion {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

impl ChatCompletion {
    /// Content string of the first choice, if any.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

/// Error envelope on non-2xx: `{ error?: { message?: string } }`.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
}

impl ErrorEnvelope {
    /// Extracts `error.message` from a raw body, when the body has that shape.
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorEnvelope>(body)
            .ok()
            .and_then(|e| e.error)
            .and_then(|e| e.message)
    }
}

/// The transport seam. `GroqClient` is the production implementation;
/// tests swap in a stub without touching the generator or handlers.
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    async fn complete(
        &self,
        request: &ChatRequest,
        credential: &str,
    ) -> Result<TransportResponse, LlmError>;
}

/// reqwest-backed client for the Groq OpenAI-compatible chat completion API.
/// No retries and no client-side timeout: each call is a single attempt.
#[derive(Clone, Default)]
pub struct GroqClient {
    client: Client,
}

impl GroqClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

#[async_trait]
impl CompletionTransport for GroqClient {
    async fn complete(
        &self,
        request: &ChatRequest,
        credential: &str,
    ) -> Result<TransportResponse, LlmError> {
        let response = self
            .client
            .post(GROQ_API_URL)
            .bearer_auth(credential)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!("Completion call returned {status} ({} bytes)", body.len());

        Ok(TransportResponse { status, body })
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));

    match inner {
        Some(rest) => {
            let rest = rest.trim_start();
            rest.strip_suffix("```").map(str::trim).unwrap_or(rest)
        }
        None => text,
    }
}
