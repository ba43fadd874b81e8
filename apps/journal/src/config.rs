use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Application configuration loaded from environment variables.
///
/// The model identifier and API key are deliberately optional: a missing value
/// is not rejected here, it surfaces later as an inference error on the first call.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_model: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_api_url: String,
    pub journal_path: PathBuf,
    pub log_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            openai_model: non_empty("OPENAI_MODEL"),
            openai_api_key: non_empty("OPENAI_API_KEY"),
            openai_api_url: non_empty("OPENAI_API_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_API_URL.to_string()),
            journal_path: non_empty("JOURNAL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("journalEntries.json")),
            log_path: non_empty("JOURNAL_LOG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("app.log")),
            host: non_empty("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: non_empty("PORT")
                .unwrap_or_else(|| "8787".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: non_empty("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
