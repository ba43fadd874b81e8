//! Score Extractor: pulls the first signed decimal out of a model reply.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Optional leading minus, integer part, optional fractional part.
static SCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+(\.\d+)?").expect("valid regex"));

#[derive(Debug, Error, PartialEq)]
#[error("Unable to parse mood score from AI output: \"{raw}\"")]
pub struct ScoreParseError {
    pub raw: String,
}

/// Coarse reading of a mood score, derived on display and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
}

impl Sentiment {
    pub fn of(score: f64) -> Self {
        if score < 0.0 {
            Sentiment::Negative
        } else if score == 0.0 {
            Sentiment::Neutral
        } else {
            Sentiment::Positive
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Sentiment::Negative => "Negative sentiment.",
            Sentiment::Neutral => "Neutral sentiment.",
            Sentiment::Positive => "Positive sentiment.",
        }
    }
}

/// Parses the first number in `reply`. First match wins, surrounding words are ignored.
///
/// A digit run too long for `f64` overflows to infinity, which JSON cannot
/// store; it is rejected like a reply with no number at all.
pub fn extract_score(reply: &str) -> Result<f64, ScoreParseError> {
    SCORE_RE
        .find(reply)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|score| score.is_finite())
        .ok_or_else(|| ScoreParseError {
            raw: reply.to_string(),
        })
}
