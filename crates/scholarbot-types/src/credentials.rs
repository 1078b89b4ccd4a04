//! Credential bundles for the external collaborators.
//!
//! Secret values are wrapped in [`secrecy::SecretString`] so they never show
//! up in `Debug` output or log lines. Loading from the environment lives in
//! `scholarbot-infra`; this module only defines the shapes.

use secrecy::SecretString;

/// Reddit script-app credentials (OAuth2 password grant).
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: SecretString,
    pub username: String,
    pub password: SecretString,
    /// Descriptive User-Agent, required by the Reddit API.
    pub user_agent: String,
}

// No Debug derive: even with SecretString fields redacted, the username and
// client id identify the bot account and stay out of accidental dumps.

/// API keys for the excluded agent subsystem's collaborators.
///
/// The agent executor itself is external; these keys are only plumbed
/// through the environment at startup.
pub struct AgentCredentials {
    /// Language-model collaborator key (`GOOGLE_API_KEY`).
    pub language_model_key: SecretString,
    /// Search-tool collaborator key (`TAVILY_API_KEY`).
    pub search_tool_key: SecretString,
}
