//! LLM Client: the single point of entry for all chat-completion calls.
//!
//! ARCHITECTURAL RULE: No other module may call the provider API directly.
//! All LLM interactions MUST go through this module.
//!
//! No retries and no client-side timeout: a failed call is reported once, and a
//! hung call hangs only the submission that issued it.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

/// Approximate USD price per 1000 prompt tokens. Illustrative, not fetched from any pricing API.
pub const PROMPT_COST_PER_1K: f64 = 0.03;
/// Approximate USD price per 1000 completion tokens.
pub const COMPLETION_COST_PER_1K: f64 = 0.06;

const WARM_UP_MAX_TOKENS: u32 = 1;
const WARM_UP_TEMPERATURE: f32 = 0.5;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status} {status_text}): {body}")]
    Api {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("No choices returned from the chat completion API.")]
    EmptyChoices,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage<'a> {
    pub role: Role,
    pub content: &'a str,
}

impl<'a> ChatMessage<'a> {
    pub fn system(content: &'a str) -> Self {
        Self {
            role: Role::System,
            content,
        }
    }

    pub fn user(content: &'a str) -> Self {
        Self {
            role: Role::User,
            content,
        }
    }
}

/// A chat request as issued by callers. The model identifier is filled in by the client.
#[derive(Debug, Clone)]
pub struct ChatRequest<'a> {
    pub messages: Vec<ChatMessage<'a>>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Serialize)]
struct CompletionRequestBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage<'a>],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl ChatCompletion {
    /// Content of the first choice, trimmed. Empty when the model sent no content.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .map(|c| c.message.content.as_deref().unwrap_or_default().trim())
    }
}

/// Approximate cost of a call in USD from its token usage.
pub fn estimate_cost(usage: &Usage) -> f64 {
    let prompt_cost = usage.prompt_tokens as f64 / 1000.0 * PROMPT_COST_PER_1K;
    let completion_cost = usage.completion_tokens as f64 / 1000.0 * COMPLETION_COST_PER_1K;
    prompt_cost + completion_cost
}

/// Chat-completion client for an OpenAI-compatible endpoint.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_url: String,
    api_key: Option<String>,
    model: Option<String>,
}

impl LlmClient {
    pub fn new(api_url: String, api_key: Option<String>, model: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
            model,
        }
    }

    /// The configured model identifier, or `"<unset>"` for log lines.
    pub fn model_label(&self) -> &str {
        self.model.as_deref().unwrap_or("<unset>")
    }

    /// Makes a single chat-completion call. Fails on transport errors, non-2xx
    /// responses and responses without any choice.
    pub async fn chat(&self, request: &ChatRequest<'_>) -> Result<ChatCompletion, LlmError> {
        let model = self
            .model
            .as_deref()
            .ok_or(LlmError::NotConfigured("OPENAI_MODEL"))?;
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(LlmError::NotConfigured("OPENAI_API_KEY"))?;

        let body = CompletionRequestBody {
            model,
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            });
        }

        let completion: ChatCompletion = response.json().await?;
        if completion.choices.is_empty() {
            return Err(LlmError::EmptyChoices);
        }

        if let Some(usage) = &completion.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(completion)
    }

    /// Cheap 1-token call used at startup to pre-establish the connection.
    pub async fn warm_up(&self) -> Result<(), LlmError> {
        let request = ChatRequest {
            messages: vec![
                ChatMessage::system(prompts::WARM_UP_SYSTEM),
                ChatMessage::user(prompts::WARM_UP_USER),
            ],
            max_tokens: WARM_UP_MAX_TOKENS,
            temperature: WARM_UP_TEMPERATURE,
        };
        self.chat(&request).await.map(|_| ())
    }
}
