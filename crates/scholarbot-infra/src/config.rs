//! Bot configuration loader.
//!
//! Reads and validates `scholarbot.toml`. Unlike ambient settings, this
//! config has required fields (the subreddit list, the reply message), so a
//! missing or malformed file is an error rather than a silent default.

use std::path::Path;

use scholarbot_types::config::BotConfig;
use scholarbot_types::error::ConfigError;

/// Load [`BotConfig`] from a TOML file and validate it.
pub async fn load_bot_config(path: &Path) -> Result<BotConfig, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|err| ConfigError::Read {
            path: path.display().to_string(),
            source: err,
        })?;

    let config: BotConfig =
        toml::from_str(&content).map_err(|err| ConfigError::Parse(err.to_string()))?;
    config.validate()?;

    tracing::debug!(
        path = %path.display(),
        subreddits = config.subreddits.len(),
        keywords = config.trigger_keywords.len(),
        "bot config loaded"
    );
    Ok(config)
}
