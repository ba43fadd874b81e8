// Mood scoring: prompt building, model inference, score extraction, and the
// submission flow that ties them to the journal.
// All model calls go through llm_client; nothing here talks HTTP directly.

pub mod extractor;
pub mod handlers;
pub mod inference;
pub mod prompts;
pub mod submission;
