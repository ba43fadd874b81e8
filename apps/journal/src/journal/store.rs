//! Entry Store: the single owned, append-only sequence of journal entries,
//! mirrored to a flat JSON file.
//!
//! The chart projections (scores, date labels) are derived from the entry
//! sequence on demand, so they can never drift from it.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{error, info};

use crate::journal::entry::JournalEntry;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize entries: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("background write task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Parallel score/label sequences handed to the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub scores: Vec<f64>,
    pub labels: Vec<String>,
}

#[derive(Debug)]
pub struct EntryStore {
    path: PathBuf,
    entries: Vec<JournalEntry>,
}

impl EntryStore {
    /// An empty store backed by `path`. Nothing is read or written.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
        }
    }

    /// Loads entries from `path`. A missing file yields an empty store; an
    /// unreadable or malformed file is logged and also yields an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let mut store = Self::empty(path);
        match read_entries(&store.path) {
            Ok(Some(entries)) => {
                info!("Loaded {} journal entries from disk.", entries.len());
                store.entries = entries;
            }
            Ok(None) => {}
            Err(e) => error!("Error loading journal entries: {e}"),
        }
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Adds a fully-populated entry to the end of the sequence and returns its index.
    pub fn append(&mut self, entry: JournalEntry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    /// Overwrites the backing file with the whole sequence.
    ///
    /// Returns the number of entries written. Failures are logged here and
    /// returned to the caller; they are never retried.
    pub fn persist(&self) -> Result<usize, StoreError> {
        save_entries(&self.path, &self.entries)
    }

    /// [`persist`](Self::persist) for async callers: the file write runs on
    /// the blocking pool against a snapshot of the current sequence.
    ///
    /// Callers holding the store lock across the await keep writes ordered.
    pub async fn persist_in_background(&self) -> Result<usize, StoreError> {
        let path = self.path.clone();
        let entries = self.entries.clone();
        tokio::task::spawn_blocking(move || save_entries(&path, &entries)).await?
    }

    pub fn get(&self, index: usize) -> Option<&JournalEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn scores(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.mood_score).collect()
    }

    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.date.clone()).collect()
    }

    pub fn chart(&self) -> ChartSeries {
        ChartSeries {
            scores: self.scores(),
            labels: self.labels(),
        }
    }
}

fn read_entries(path: &Path) -> Result<Option<Vec<JournalEntry>>, StoreError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&data)
        .map(Some)
        .map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

fn save_entries(path: &Path, entries: &[JournalEntry]) -> Result<usize, StoreError> {
    match write_entries(path, entries) {
        Ok(()) => {
            info!("Saved {} journal entries to disk.", entries.len());
            Ok(entries.len())
        }
        Err(e) => {
            error!("Error saving journal entries: {e}");
            Err(e)
        }
    }
}

/// Writes into a sibling temp file, then renames it over `path`.
fn write_entries(path: &Path, entries: &[JournalEntry]) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(entries)?;

    let write_err = |source: io::Error| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(json.as_bytes()).map_err(write_err)?;
    tmp.flush().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::entry::Metrics;

    fn entry(date: &str, text: &str, score: f64) -> JournalEntry {
        JournalEntry {
            date: date.to_string(),
            text: text.to_string(),
            mood_score: score,
            metrics: Metrics {
                stress_quality: "3".into(),
                sleep_quality: "8".into(),
                productive: "7".into(),
                mood_level: "8".into(),
                hours_slept: "7".into(),
            },
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = EntryStore::load(dir.path().join("journalEntries.json"));
        assert!(store.is_empty());
        assert!(store.chart().scores.is_empty());
    }

    #[test]
    fn test_load_malformed_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journalEntries.json");
        fs::write(&path, "{ not json").unwrap();

        let store = EntryStore::load(&path);
        assert!(store.is_empty());
        // the bad file is left alone
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn test_load_non_array_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journalEntries.json");
        fs::write(&path, r#"{"date": "x"}"#).unwrap();

        assert!(EntryStore::load(&path).is_empty());
    }

    #[test]
    fn test_persist_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journalEntries.json");

        let mut store = EntryStore::load(&path);
        store.append(entry("1/1/2026 9:00:00 AM", "first", 3.0));
        store.append(entry("1/2/2026 9:00:00 AM", "second", -2.5));
        assert_eq!(store.persist().unwrap(), 2);

        let reloaded = EntryStore::load(&path);
        assert_eq!(reloaded.entries(), store.entries());
    }

    #[test]
    fn test_append_preserves_existing_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journalEntries.json");

        let mut store = EntryStore::empty(&path);
        store.append(entry("1/1/2026 9:00:00 AM", "a", 1.0));
        store.append(entry("1/2/2026 9:00:00 AM", "b", 2.0));
        store.persist().unwrap();

        let mut store = EntryStore::load(&path);
        let idx_c = store.append(entry("1/3/2026 9:00:00 AM", "c", 0.0));
        let idx_d = store.append(entry("1/4/2026 9:00:00 AM", "d", -4.0));
        assert_eq!((idx_c, idx_d), (2, 3));
        store.persist().unwrap();

        let texts: Vec<_> = EntryStore::load(&path)
            .entries()
            .iter()
            .map(|e| e.text.clone())
            .collect();
        assert_eq!(texts, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_chart_projections_follow_entries() {
        let mut store = EntryStore::empty("unused.json");
        store.append(entry("1/1/2026 9:00:00 AM", "a", 1.5));
        store.append(entry("1/2/2026 9:00:00 AM", "b", -3.0));

        let chart = store.chart();
        assert_eq!(chart.scores, vec![1.5, -3.0]);
        assert_eq!(
            chart.labels,
            vec!["1/1/2026 9:00:00 AM", "1/2/2026 9:00:00 AM"]
        );
    }

    #[test]
    fn test_persist_writes_pretty_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journalEntries.json");

        let mut store = EntryStore::empty(&path);
        store.append(entry("1/1/2026 9:00:00 AM", "a", 1.0));
        store.persist().unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("[\n  {"));
        assert!(raw.contains("\"moodScore\": 1.0"));
    }

    #[test]
    fn test_entry_missing_metric_fails_whole_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journalEntries.json");
        fs::write(
            &path,
            r#"[{"date": "1/1/2026 9:00:00 AM", "text": "a", "moodScore": 1.0,
                "stressQuality": "3", "sleepQuality": "8", "productive": "7",
                "moodLevel": "8"}]"#,
        )
        .unwrap();

        assert!(EntryStore::load(&path).is_empty());
    }

    #[tokio::test]
    async fn test_persist_in_background_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journalEntries.json");

        let mut store = EntryStore::empty(&path);
        store.append(entry("1/1/2026 9:00:00 AM", "a", 1.0));
        store.append(entry("1/2/2026 9:00:00 AM", "b", -1.0));
        assert_eq!(store.persist_in_background().await.unwrap(), 2);

        assert_eq!(EntryStore::load(&path).entries(), store.entries());
    }

    #[tokio::test]
    async fn test_persist_in_background_failure_is_returned() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("journalEntries.json");

        let mut store = EntryStore::empty(&path);
        store.append(entry("1/1/2026 9:00:00 AM", "a", 1.0));

        let err = store.persist_in_background().await.unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_persist_failure_is_returned() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("journalEntries.json");

        let mut store = EntryStore::empty(&path);
        store.append(entry("1/1/2026 9:00:00 AM", "a", 1.0));

        let err = store.persist().unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
        // in-memory sequence is unaffected
        assert_eq!(store.len(), 1);
    }
}
