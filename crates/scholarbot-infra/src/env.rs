//! Environment credential loading.
//!
//! Credentials never live in the config file. The Reddit bundle is required
//! for the bot to start; the agent-side keys belong to the excluded agent
//! subsystem and are only checked for presence.

use secrecy::SecretString;

use scholarbot_types::credentials::{AgentCredentials, RedditCredentials};
use scholarbot_types::error::ConfigError;

/// Load the Reddit script-app bundle from the environment.
///
/// Required variables: `REDDIT_CLIENT_ID`, `REDDIT_CLIENT_SECRET`,
/// `REDDIT_USERNAME`, `REDDIT_PASSWORD`, `REDDIT_USER_AGENT`.
pub fn load_reddit_credentials() -> Result<RedditCredentials, ConfigError> {
    Ok(RedditCredentials {
        client_id: require_env("REDDIT_CLIENT_ID")?,
        client_secret: SecretString::from(require_env("REDDIT_CLIENT_SECRET")?),
        username: require_env("REDDIT_USERNAME")?,
        password: SecretString::from(require_env("REDDIT_PASSWORD")?),
        user_agent: require_env("REDDIT_USER_AGENT")?,
    })
}

/// Load the agent collaborator keys (`GOOGLE_API_KEY`, `TAVILY_API_KEY`).
pub fn load_agent_credentials() -> Result<AgentCredentials, ConfigError> {
    Ok(AgentCredentials {
        language_model_key: SecretString::from(require_env("GOOGLE_API_KEY")?),
        search_tool_key: SecretString::from(require_env("TAVILY_API_KEY")?),
    })
}

fn require_env(name: &str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        // Present but blank is as useless as absent
        Ok(_) => Err(ConfigError::MissingEnv(name.to_string())),
        Err(_) => Err(ConfigError::MissingEnv(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_env_present() {
        // SAFETY: unique variable name, set and removed within this test.
        unsafe { std::env::set_var("SCHOLARBOT_TEST_ENV_1", "value-1") };
        assert_eq!(require_env("SCHOLARBOT_TEST_ENV_1").unwrap(), "value-1");
        unsafe { std::env::remove_var("SCHOLARBOT_TEST_ENV_1") };
    }

    #[test]
    fn test_require_env_missing() {
        let err = require_env("SCHOLARBOT_TEST_ENV_MISSING_XYZ").unwrap_err();
        assert!(err.to_string().contains("SCHOLARBOT_TEST_ENV_MISSING_XYZ"));
    }

    #[test]
    fn test_require_env_blank_rejected() {
        // SAFETY: unique variable name, set and removed within this test.
        unsafe { std::env::set_var("SCHOLARBOT_TEST_ENV_BLANK", "   ") };
        assert!(require_env("SCHOLARBOT_TEST_ENV_BLANK").is_err());
        unsafe { std::env::remove_var("SCHOLARBOT_TEST_ENV_BLANK") };
    }
}
