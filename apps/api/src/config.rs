use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; startup fails only on unparseable values.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Where the saved API key lives between restarts.
    pub credential_store_path: PathBuf,
    /// Fallback credential when neither the request nor the store supplies one.
    pub groq_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            credential_store_path: std::env::var("CREDENTIAL_STORE_PATH")
                .unwrap_or_else(|_| "data/credentials.json".to_string())
                .into(),
            groq_api_key: optional_env("GROQ_API_KEY"),
        })
    }
}

/// Reads an env var, treating unset and blank alike.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
