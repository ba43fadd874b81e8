//! Axum route handlers for mood scoring.

use axum::{extract::State, Json};
use chrono::Local;

use crate::errors::AppError;
use crate::journal::entry::entry_timestamp;
use crate::mood::submission::{submit, SubmitOutcome, SubmitRequest};
use crate::state::AppState;

/// POST /api/v1/entries
///
/// Scores a journal entry with the model and appends it to the journal.
/// Returns the stored entry, its sentiment, and the updated chart series.
pub async fn handle_submit(
    State(state): State<AppState>,
    Json(request): Json<SubmitRequest>,
) -> Result<Json<SubmitOutcome>, AppError> {
    let outcome = submit(&state.store, state.inference.as_ref(), request, || {
        entry_timestamp(&Local::now())
    })
    .await?;

    Ok(Json(outcome))
}
