use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Nothing is required: without an API key the service runs fully local.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub analyzer_enabled: bool,
    pub analyzer_timeout_ms: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            analyzer_enabled: !matches!(
                std::env::var("ANALYZER_ENABLED").as_deref(),
                Ok("false") | Ok("0")
            ),
            analyzer_timeout_ms: std::env::var("ANALYZER_TIMEOUT_MS")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u64>()
                .context("ANALYZER_TIMEOUT_MS must be a duration in milliseconds")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
