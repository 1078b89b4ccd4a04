//! Error enums, one per concern.

use thiserror::Error;

/// Errors from the content source (Reddit).
///
/// `Auth` during startup identity verification is the only fatal error in
/// the system; everything else is logged and followed by a fixed backoff.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("api error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("unexpected response shape: {0}")]
    Decode(String),
}

impl SourceError {
    /// Whether this error aborts startup rather than triggering a backoff.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SourceError::Auth(_))
    }
}

/// Errors from the replied-id ledger.
///
/// Always non-fatal to the pollers: a failed `record` means the item may be
/// reprocessed after a restart, which is the accepted degraded behavior.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("failed to open replied log '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to append to replied log: {0}")]
    Append(#[from] std::io::Error),
}

/// Errors from the external agent executor collaborator.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent invocation failed: {0}")]
    Invocation(String),
}

/// Errors from configuration and credential loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("missing environment variable: {0}")]
    MissingEnv(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_display() {
        let err = SourceError::Api {
            status: 429,
            message: "too many requests".to_string(),
        };
        assert_eq!(err.to_string(), "api error (status 429): too many requests");
    }

    #[test]
    fn test_only_auth_is_fatal() {
        assert!(SourceError::Auth("bad password".to_string()).is_fatal());
        assert!(!SourceError::Network("timeout".to_string()).is_fatal());
        assert!(
            !SourceError::Api {
                status: 500,
                message: "oops".to_string()
            }
            .is_fatal()
        );
        assert!(!SourceError::Decode("not json".to_string()).is_fatal());
    }

    #[test]
    fn test_ledger_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: LedgerError = io.into();
        assert!(err.to_string().contains("append"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingEnv("REDDIT_CLIENT_ID".to_string());
        assert_eq!(
            err.to_string(),
            "missing environment variable: REDDIT_CLIENT_ID"
        );
    }
}
