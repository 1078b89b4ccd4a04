//! `RedditSource` -- concrete [`ContentSource`] over the Reddit JSON API.
//!
//! Authentication is the OAuth2 password grant for script apps: client id
//! and secret as HTTP basic auth, username and password in the form body.
//! The bearer token is cached and refreshed shortly before expiry. The
//! client secret and account password are wrapped in
//! [`secrecy::SecretString`] and only exposed when request headers are
//! built.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use scholarbot_core::source::{CommentStream, ContentSource};
use scholarbot_types::content::ContentItem;
use scholarbot_types::credentials::RedditCredentials;
use scholarbot_types::error::SourceError;

use super::stream::SeenWindow;
use super::types::{
    CommentData, CommentPostResponse, Listing, MeResponse, SubmissionData, TokenResponse,
};

/// Refresh the token this many seconds before Reddit's stated expiry.
const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;

/// Batch size for each poll of the comment listing.
const STREAM_FETCH_LIMIT: u32 = 100;

/// Pause between polls of the comment listing.
const STREAM_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Seen-window capacity; must comfortably exceed `STREAM_FETCH_LIMIT` so
/// consecutive polls overlap inside the window.
const SEEN_WINDOW_CAPACITY: usize = 300;

struct AuthToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

struct Inner {
    http: reqwest::Client,
    credentials: RedditCredentials,
    /// Multireddit path segment, e.g. `scholarships+financialaid`.
    subreddit_path: String,
    token_url: String,
    api_base: String,
    token: Mutex<Option<AuthToken>>,
}

/// Reddit-backed [`ContentSource`]. Cheap to clone; clones share the HTTP
/// client and the cached token.
#[derive(Clone)]
pub struct RedditSource {
    inner: Arc<Inner>,
}

// RedditSource intentionally does not derive Debug: the credentials inside
// identify the bot account.

impl RedditSource {
    /// Create a source monitoring the given subreddits.
    pub fn new(credentials: RedditCredentials, subreddits: &[String]) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(credentials.user_agent.clone())
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to create reqwest client");

        Self {
            inner: Arc::new(Inner {
                http,
                credentials,
                subreddit_path: subreddits.join("+"),
                token_url: "https://www.reddit.com/api/v1/access_token".to_string(),
                api_base: "https://oauth.reddit.com".to_string(),
                token: Mutex::new(None),
            }),
        }
    }

    /// Override both endpoints (useful for tests and proxies).
    #[allow(dead_code)]
    pub fn with_endpoints(mut self, api_base: String, token_url: String) -> Self {
        let inner = Arc::get_mut(&mut self.inner)
            .expect("with_endpoints must be called before the source is shared");
        inner.api_base = api_base;
        inner.token_url = token_url;
        self
    }

    /// The multireddit path segment this source polls.
    pub fn subreddit_path(&self) -> &str {
        &self.inner.subreddit_path
    }

    /// Return a valid bearer token, requesting a fresh one when the cached
    /// token is absent or about to expire.
    async fn bearer_token(&self) -> Result<String, SourceError> {
        let mut guard = self.inner.token.lock().await;
        if let Some(token) = guard.as_ref()
            && token.expires_at > Utc::now()
        {
            return Ok(token.access_token.clone());
        }

        let token = self.request_token().await?;
        let access = token.access_token.clone();
        *guard = Some(token);
        Ok(access)
    }

    async fn request_token(&self) -> Result<AuthToken, SourceError> {
        let creds = &self.inner.credentials;
        let form = [
            ("grant_type", "password"),
            ("username", creds.username.as_str()),
            ("password", creds.password.expose_secret()),
        ];

        let response = self
            .inner
            .http
            .post(&self.inner.token_url)
            .basic_auth(&creds.client_id, Some(creds.client_secret.expose_secret()))
            .form(&form)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(SourceError::Auth(format!(
                "token request rejected (status {status})"
            )));
        }
        if !status.is_success() {
            return Err(SourceError::Api {
                status: status.as_u16(),
                message: "token request failed".to_string(),
            });
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))?;

        // A bad username/password comes back as 200 + {"error": "..."}
        if let Some(error) = body.error {
            return Err(SourceError::Auth(format!("token request failed: {error}")));
        }
        if body.access_token.is_empty() {
            return Err(SourceError::Auth(
                "token response carried no access token".to_string(),
            ));
        }

        tracing::debug!(expires_in = body.expires_in, "obtained access token");
        Ok(AuthToken {
            access_token: body.access_token,
            expires_at: Utc::now()
                + chrono::Duration::seconds(
                    body.expires_in as i64 - TOKEN_EXPIRY_MARGIN_SECS,
                ),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path_and_query: &str) -> Result<T, SourceError> {
        let token = self.bearer_token().await?;
        let url = format!("{}{}", self.inner.api_base, path_and_query);

        let response = self
            .inner
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            // Token may have been revoked early; drop it so the next call
            // re-authenticates
            self.inner.token.lock().await.take();
        }
        if !status.is_success() {
            return Err(SourceError::Api {
                status: status.as_u16(),
                message: format!("GET {path_and_query} failed"),
            });
        }

        response
            .json()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))
    }

    /// The `limit` newest comments across the monitored subreddits,
    /// most recent first.
    async fn latest_comments(&self, limit: u32) -> Result<Vec<ContentItem>, SourceError> {
        let listing: Listing<CommentData> = self
            .get_json(&format!(
                "/r/{}/comments?limit={limit}&raw_json=1",
                self.inner.subreddit_path
            ))
            .await?;
        Ok(listing
            .data
            .children
            .into_iter()
            .map(|thing| thing.data.into())
            .collect())
    }
}

impl ContentSource for RedditSource {
    async fn verify_identity(&self) -> Result<String, SourceError> {
        let me: MeResponse = self.get_json("/api/v1/me").await?;
        Ok(me.name)
    }

    async fn latest_submissions(&self, limit: u32) -> Result<Vec<ContentItem>, SourceError> {
        let listing: Listing<SubmissionData> = self
            .get_json(&format!(
                "/r/{}/new?limit={limit}&raw_json=1",
                self.inner.subreddit_path
            ))
            .await?;
        Ok(listing
            .data
            .children
            .into_iter()
            .map(|thing| thing.data.into())
            .collect())
    }

    fn comment_stream(&self, skip_existing: bool) -> CommentStream {
        let source = self.clone();
        Box::pin(async_stream::stream! {
            let mut window = SeenWindow::new(SEEN_WINDOW_CAPACITY);
            let mut primed = !skip_existing;

            loop {
                match source.latest_comments(STREAM_FETCH_LIMIT).await {
                    Ok(mut items) => {
                        // Listing is newest-first; the stream yields in
                        // creation order
                        items.reverse();
                        for item in items {
                            if !window.insert(&item.id) {
                                continue;
                            }
                            if primed {
                                yield Ok(item);
                            }
                        }
                        primed = true;
                    }
                    Err(err) => {
                        // End the subscription; the poller backs off and
                        // re-subscribes
                        yield Err(err);
                        return;
                    }
                }
                tokio::time::sleep(STREAM_POLL_INTERVAL).await;
            }
        })
    }

    async fn reply(&self, parent_id: &str, body: &str) -> Result<(), SourceError> {
        let token = self.bearer_token().await?;
        let url = format!("{}/api/comment", self.inner.api_base);
        let form = [
            ("api_type", "json"),
            ("thing_id", parent_id),
            ("text", body),
        ];

        let response = self
            .inner
            .http
            .post(&url)
            .bearer_auth(token)
            .form(&form)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Api {
                status: status.as_u16(),
                message: format!("reply to {parent_id} failed"),
            });
        }

        let body: CommentPostResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))?;
        if !body.json.errors.is_empty() {
            // Ratelimit and similar failures come back inside a 200
            return Err(SourceError::Api {
                status: status.as_u16(),
                message: body.json.error_summary(),
            });
        }
        Ok(())
    }
}
