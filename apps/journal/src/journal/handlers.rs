use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::journal::entry::JournalEntry;
use crate::journal::store::ChartSeries;
use crate::mood::extractor::Sentiment;
use crate::state::AppState;

#[derive(Serialize)]
pub struct EntryListResponse {
    pub entries: Vec<JournalEntry>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDetailResponse {
    pub index: usize,
    pub entry: JournalEntry,
    pub sentiment: Sentiment,
    pub interpretation: &'static str,
}

/// GET /api/v1/entries
pub async fn handle_list_entries(State(state): State<AppState>) -> Json<EntryListResponse> {
    let store = state.store.lock().await;
    Json(EntryListResponse {
        entries: store.entries().to_vec(),
    })
}

/// GET /api/v1/entries/:index
///
/// Backs the "select point" interaction of the chart.
pub async fn handle_get_entry(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<EntryDetailResponse>, AppError> {
    let store = state.store.lock().await;
    let entry = store
        .get(index)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Entry {index} not found")))?;
    drop(store);

    info!("Opened journal entry for {}", entry.date);

    let sentiment = Sentiment::of(entry.mood_score);
    Ok(Json(EntryDetailResponse {
        index,
        entry,
        sentiment,
        interpretation: sentiment.description(),
    }))
}

/// GET /api/v1/chart
pub async fn handle_chart(State(state): State<AppState>) -> Json<ChartSeries> {
    Json(state.store.lock().await.chart())
}
