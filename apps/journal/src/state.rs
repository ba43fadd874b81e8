use std::sync::Arc;

use tokio::sync::Mutex;

use crate::journal::store::EntryStore;
use crate::mood::inference::MoodInference;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Mutated only by the submission flow, after the model reply is in.
    pub store: Arc<Mutex<EntryStore>>,
    /// Pluggable inference backend. Default: `LlmClient`.
    pub inference: Arc<dyn MoodInference>,
}

impl AppState {
    pub fn new(store: EntryStore, inference: Arc<dyn MoodInference>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            inference,
        }
    }
}
