use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Discord bot token.
    pub discord_token: String,
    /// Base URL of the quote API, overridable for testing.
    pub quote_api_base: Option<String>,
    /// Directory where per-request chart files are written.
    pub chart_dir: PathBuf,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let discord_token =
            std::env::var("DISCORD_TOKEN").map_err(|_| ConfigError::MissingVar("DISCORD_TOKEN"))?;
        let quote_api_base = std::env::var("QUOTE_API_BASE").ok();
        let chart_dir = std::env::var("CHART_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| std::env::temp_dir());

        Ok(Self {
            discord_token,
            quote_api_base,
            chart_dir,
        })
    }
}
