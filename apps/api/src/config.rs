use anyhow::{Context, Result};

/// Application configuration loaded from environment variables. Everything
/// has a default; credentials are never read from the environment, they
/// live in the settings store.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub storage_path: String,
    pub generation_timeout_secs: u64,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            storage_path: std::env::var("STORAGE_PATH")
                .unwrap_or_else(|_| "settings.json".to_string()),
            generation_timeout_secs: std::env::var("GENERATION_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse::<u64>()
                .context("GENERATION_TIMEOUT_SECS must be a number of seconds")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
