// All LLM prompt text for mood scoring.

use crate::journal::entry::Metrics;

/// Lower bound of the mood score the model is asked for.
pub const MOOD_SCORE_MIN: i32 = -10;
/// Upper bound of the mood score the model is asked for.
pub const MOOD_SCORE_MAX: i32 = 10;

/// System message for mood scoring. Must agree with the range in `build_prompt`.
pub const MOOD_SCORE_SYSTEM: &str = "You are an AI that extracts a single numeric mood score \
    between -10 and 10 from the provided data. \
    Return ONLY the numeric value with no additional text, punctuation, or formatting.";

/// Builds the user message for mood scoring from the journal text and slider metrics.
///
/// Pure and deterministic. Empty text is accepted; rejecting it is the caller's job.
pub fn build_prompt(journal_text: &str, metrics: &Metrics) -> String {
    format!(
        "Analyze the following journal entry and metrics. \
Return ONLY a single numeric value (a number between {MOOD_SCORE_MIN} and {MOOD_SCORE_MAX}) \
that represents the overall mood. \
Do not include any words, punctuation, or additional data. Output ONLY the number.

Journal Entry:
{journal_text}

Metrics:
- Stress Quality: {}
- Sleep Quality: {}
- Productivity: {}
- Mood Level: {}
- Hours Slept: {}",
        metrics.stress_quality,
        metrics.sleep_quality,
        metrics.productive,
        metrics.mood_level,
        metrics.hours_slept,
    )
}
