//! Submission flow: validate → infer → extract → append → persist → report.
//!
//! The store lock is taken only after the model reply has been scored, so a
//! failed or slow inference call never touches the store, and an entry is
//! committed all-or-nothing. The lock is held through the file write so
//! concurrent submissions save in append order.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::journal::entry::{
    default_hours_slept, default_slider, JournalEntry, MetricValue, Metrics,
};
use crate::journal::store::{ChartSeries, EntryStore};
use crate::llm_client::{estimate_cost, LlmError, Usage};
use crate::mood::extractor::{extract_score, ScoreParseError, Sentiment};
use crate::mood::inference::MoodInference;
use crate::mood::prompts::build_prompt;

pub const EMPTY_TEXT_MESSAGE: &str = "Please write a journal entry first.";

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Inference(#[from] LlmError),

    #[error(transparent)]
    Parse(#[from] ScoreParseError),
}

/// What the presentation layer sends on "submit".
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "SubmitBody")]
pub struct SubmitRequest {
    pub text: String,
    pub metrics: Metrics,
}

/// Wire shape of a submit request. Omitted readings take the sliders'
/// resting positions; stored entries never get this leniency.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitBody {
    #[serde(default)]
    text: String,
    #[serde(default = "default_slider")]
    stress_quality: MetricValue,
    #[serde(default = "default_slider")]
    sleep_quality: MetricValue,
    #[serde(default = "default_slider")]
    productive: MetricValue,
    #[serde(default = "default_slider")]
    mood_level: MetricValue,
    #[serde(default = "default_hours_slept")]
    hours_slept: MetricValue,
}

impl From<SubmitBody> for SubmitRequest {
    fn from(body: SubmitBody) -> Self {
        Self {
            text: body.text,
            metrics: Metrics {
                stress_quality: body.stress_quality,
                sleep_quality: body.sleep_quality,
                productive: body.productive,
                mood_level: body.mood_level,
                hours_slept: body.hours_slept,
            },
        }
    }
}

/// What the presentation layer gets back after a scored submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutcome {
    pub index: usize,
    pub entry: JournalEntry,
    pub sentiment: Sentiment,
    pub interpretation: &'static str,
    pub chart: ChartSeries,
    pub usage: Option<Usage>,
    pub estimated_cost: Option<f64>,
    /// False when the entry was kept in memory but the file write failed.
    pub saved: bool,
    pub save_error: Option<String>,
}

/// Runs one submission end to end.
///
/// `timestamp` is called once, after the reply has been scored, to date the entry.
pub async fn submit<F>(
    store: &Mutex<EntryStore>,
    inference: &dyn MoodInference,
    request: SubmitRequest,
    timestamp: F,
) -> Result<SubmitOutcome, SubmitError>
where
    F: FnOnce() -> String,
{
    if request.text.is_empty() {
        info!("Attempted to analyze mood with empty journal entry.");
        return Err(SubmitError::Validation(EMPTY_TEXT_MESSAGE.to_string()));
    }

    let prompt = build_prompt(&request.text, &request.metrics);

    let model = inference.model_label();
    info!("Requesting mood score from model: {model}");

    let reply = inference.infer(&prompt).await.map_err(|e| {
        error!("Error fetching AI mood analysis: {e}");
        SubmitError::from(e)
    })?;

    let mood_score = extract_score(&reply.text).map_err(|e| {
        error!("Error fetching AI mood analysis: {e}");
        SubmitError::from(e)
    })?;
    let sentiment = Sentiment::of(mood_score);

    let estimated_cost = reply.usage.as_ref().map(estimate_cost);
    match (&reply.usage, estimated_cost) {
        (Some(usage), Some(cost)) => info!(
            "Mood API call succeeded. Model: {model}. Prompt tokens: {}, Completion tokens: {}, \
             Total tokens: {}. Approximate price: ${cost:.4}.",
            usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
        ),
        _ => info!("Mood API call succeeded. Model: {model}. No usage reported."),
    }

    let entry = JournalEntry {
        date: timestamp(),
        text: request.text,
        mood_score,
        metrics: request.metrics,
    };

    let mut store = store.lock().await;
    let index = store.append(entry.clone());
    let save_error = store.persist_in_background().await.err().map(|e| e.to_string());
    let chart = store.chart();
    drop(store);

    Ok(SubmitOutcome {
        index,
        entry,
        sentiment,
        interpretation: sentiment.description(),
        chart,
        usage: reply.usage,
        estimated_cost,
        saved: save_error.is_none(),
        save_error,
    })
}
