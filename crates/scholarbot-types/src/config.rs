//! Bot configuration.
//!
//! `BotConfig` is the top-level `scholarbot.toml` controlling which channels
//! are monitored, what triggers a reply, and the loop timing. Everything the
//! reference behavior hardcoded is an explicit field here. Credentials are
//! deliberately NOT part of this file; they come from the environment (see
//! `scholarbot_types::credentials`).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;

/// Top-level configuration for the bot.
///
/// All timing fields have defaults matching the reference behavior:
/// 600s reply cooldown, 60s poll interval, 60s error backoff, batches of 10.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Whether the submission poller runs.
    #[serde(default = "default_true")]
    pub enable_submission_replies: bool,

    /// Whether the comment poller runs.
    #[serde(default)]
    pub enable_comment_replies: bool,

    /// Channels (subreddits) to monitor. Must be non-empty.
    pub subreddits: Vec<String>,

    /// Case-insensitive substrings that trigger a reply. An empty list
    /// matches nothing (the bot idles).
    #[serde(default)]
    pub trigger_keywords: Vec<String>,

    /// The reply body, sent verbatim. No per-item templating.
    pub reply_message: String,

    /// How many recent submissions each fetch cycle examines.
    #[serde(default = "default_poll_limit")]
    pub poll_limit: u32,

    /// Minimum seconds between consecutive replies, per poller.
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,

    /// Seconds between submission fetch cycles.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Seconds to wait after a fetch/reply error before resuming.
    #[serde(default = "default_error_backoff_secs")]
    pub error_backoff_secs: u64,

    /// Path of the append-only replied-id log.
    #[serde(default = "default_replied_log")]
    pub replied_log: PathBuf,
}

fn default_true() -> bool {
    true
}

fn default_poll_limit() -> u32 {
    10
}

fn default_cooldown_secs() -> u64 {
    600
}

fn default_poll_interval_secs() -> u64 {
    60
}

fn default_error_backoff_secs() -> u64 {
    60
}

fn default_replied_log() -> PathBuf {
    PathBuf::from("replied.txt")
}

impl BotConfig {
    /// Check the invariants a loaded config must satisfy before the bot
    /// starts. Called once at startup; a failure here is fatal.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.subreddits.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one subreddit must be configured".to_string(),
            ));
        }
        if self.subreddits.iter().any(|s| s.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "subreddit names must not be blank".to_string(),
            ));
        }
        if self.reply_message.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "reply_message must not be empty".to_string(),
            ));
        }
        if self.poll_limit == 0 {
            return Err(ConfigError::Invalid(
                "poll_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_toml() -> &'static str {
        r#"
subreddits = ["scholarships"]
reply_message = "Try Scholar Search, a free scholarship finder."
"#
    }

    #[test]
    fn test_config_defaults_applied() {
        let config: BotConfig = toml::from_str(minimal_toml()).unwrap();
        assert!(config.enable_submission_replies);
        assert!(!config.enable_comment_replies);
        assert_eq!(config.poll_limit, 10);
        assert_eq!(config.cooldown_secs, 600);
        assert_eq!(config.poll_interval_secs, 60);
        assert_eq!(config.error_backoff_secs, 60);
        assert_eq!(config.replied_log, PathBuf::from("replied.txt"));
        assert!(config.trigger_keywords.is_empty());
    }

    #[test]
    fn test_config_full_parse() {
        let toml_str = r#"
enable_submission_replies = false
enable_comment_replies = true
subreddits = ["scholarships", "financialaid"]
trigger_keywords = ["scholarship", "fly-in", "tuition"]
reply_message = "message"
poll_limit = 25
cooldown_secs = 300
poll_interval_secs = 30
error_backoff_secs = 120
replied_log = "/var/lib/scholarbot/replied.txt"
"#;
        let config: BotConfig = toml::from_str(toml_str).unwrap();
        assert!(!config.enable_submission_replies);
        assert!(config.enable_comment_replies);
        assert_eq!(config.subreddits.len(), 2);
        assert_eq!(config.trigger_keywords.len(), 3);
        assert_eq!(config.cooldown_secs, 300);
        assert_eq!(
            config.replied_log,
            PathBuf::from("/var/lib/scholarbot/replied.txt")
        );
    }

    #[test]
    fn test_config_missing_subreddits_fails_parse() {
        let result = toml::from_str::<BotConfig>(r#"reply_message = "hi""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_accepts_minimal_config() {
        let config: BotConfig = toml::from_str(minimal_toml()).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_subreddit_list() {
        let mut config: BotConfig = toml::from_str(minimal_toml()).unwrap();
        config.subreddits.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_subreddit_name() {
        let mut config: BotConfig = toml::from_str(minimal_toml()).unwrap();
        config.subreddits.push("  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_reply_message() {
        let mut config: BotConfig = toml::from_str(minimal_toml()).unwrap();
        config.reply_message = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_poll_limit() {
        let mut config: BotConfig = toml::from_str(minimal_toml()).unwrap();
        config.poll_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config: BotConfig = toml::from_str(minimal_toml()).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: BotConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.subreddits, config.subreddits);
        assert_eq!(parsed.cooldown_secs, 600);
    }
}
