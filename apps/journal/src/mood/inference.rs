//! Mood Inference: pluggable, trait-based seam between the submission flow
//! and the chat-completion provider.
//!
//! Default: `LlmClient` (OpenAI-compatible chat completions).
//! `AppState` holds an `Arc<dyn MoodInference>` so tests can script replies.

use async_trait::async_trait;
use serde::Serialize;

use crate::llm_client::{ChatMessage, ChatRequest, LlmClient, LlmError, Usage};
use crate::mood::prompts::MOOD_SCORE_SYSTEM;

const MOOD_MAX_TOKENS: u32 = 50;
const MOOD_TEMPERATURE: f32 = 0.7;

/// Raw model reply plus token counters, when the provider reports them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodReply {
    pub text: String,
    pub usage: Option<Usage>,
}

#[async_trait]
pub trait MoodInference: Send + Sync {
    /// Sends the built prompt to the model and returns its raw reply.
    async fn infer(&self, prompt: &str) -> Result<MoodReply, LlmError>;

    /// Model identifier for log lines.
    fn model_label(&self) -> &str;
}

#[async_trait]
impl MoodInference for LlmClient {
    async fn infer(&self, prompt: &str) -> Result<MoodReply, LlmError> {
        let request = ChatRequest {
            messages: vec![
                ChatMessage::system(MOOD_SCORE_SYSTEM),
                ChatMessage::user(prompt),
            ],
            max_tokens: MOOD_MAX_TOKENS,
            temperature: MOOD_TEMPERATURE,
        };

        let completion = self.chat(&request).await?;
        let text = completion.text().ok_or(LlmError::EmptyChoices)?.to_string();

        Ok(MoodReply {
            text,
            usage: completion.usage,
        })
    }

    fn model_label(&self) -> &str {
        LlmClient::model_label(self)
    }
}
