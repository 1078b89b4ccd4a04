//! Wire types for the Reddit JSON API.
//!
//! Only the fields the bot reads are modeled; everything else in the
//! payloads is ignored by serde.

use serde::Deserialize;

use scholarbot_types::content::{ContentItem, ItemKind};

/// Response of `POST /api/v1/access_token`.
///
/// Reddit reports a bad password grant as HTTP 200 with an `error` field,
/// so both shapes live in one struct.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub expires_in: u64,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response of `GET /api/v1/me`.
#[derive(Debug, Deserialize)]
pub struct MeResponse {
    pub name: String,
}

/// Generic listing envelope: `{"data": {"children": [{"data": ...}]}}`.
#[derive(Debug, Deserialize)]
pub struct Listing<T> {
    pub data: ListingData<T>,
}

#[derive(Debug, Deserialize)]
pub struct ListingData<T> {
    pub children: Vec<Thing<T>>,
}

#[derive(Debug, Deserialize)]
pub struct Thing<T> {
    pub data: T,
}

/// A submission as returned by `/r/{subs}/new`.
#[derive(Debug, Deserialize)]
pub struct SubmissionData {
    /// Fullname, e.g. `t3_abc123`.
    pub name: String,
    pub title: String,
    pub author: Option<String>,
    pub subreddit: String,
}

/// A comment as returned by `/r/{subs}/comments`.
#[derive(Debug, Deserialize)]
pub struct CommentData {
    /// Fullname, e.g. `t1_xyz789`.
    pub name: String,
    pub body: String,
    pub author: Option<String>,
    pub subreddit: String,
}

/// Response of `POST /api/comment` with `api_type=json`.
#[derive(Debug, Deserialize)]
pub struct CommentPostResponse {
    pub json: CommentPostJson,
}

#[derive(Debug, Deserialize)]
pub struct CommentPostJson {
    /// Error tuples like `["RATELIMIT", "you are doing that too much", "ratelimit"]`.
    #[serde(default)]
    pub errors: Vec<Vec<serde_json::Value>>,
}

impl CommentPostJson {
    /// Render the API error tuples into one log-friendly string.
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|tuple| {
                tuple
                    .iter()
                    .filter_map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(": ")
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

const DELETED_AUTHOR: &str = "[deleted]";

impl From<SubmissionData> for ContentItem {
    fn from(data: SubmissionData) -> Self {
        ContentItem {
            id: data.name,
            author: data.author.unwrap_or_else(|| DELETED_AUTHOR.to_string()),
            channel: data.subreddit,
            text: data.title,
            kind: ItemKind::Submission,
        }
    }
}

impl From<CommentData> for ContentItem {
    fn from(data: CommentData) -> Self {
        ContentItem {
            id: data.name,
            author: data.author.unwrap_or_else(|| DELETED_AUTHOR.to_string()),
            channel: data.subreddit,
            text: data.body,
            kind: ItemKind::Comment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_response_success() {
        let json = r#"{"access_token": "abc-token", "token_type": "bearer",
                       "expires_in": 86400, "scope": "*"}"#;
        let parsed: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.access_token, "abc-token");
        assert_eq!(parsed.expires_in, 86400);
        assert!(parsed.error.is_none());
    }

    #[test]
    fn test_parse_token_response_invalid_grant() {
        let json = r#"{"error": "invalid_grant"}"#;
        let parsed: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.error.as_deref(), Some("invalid_grant"));
        assert!(parsed.access_token.is_empty());
    }

    #[test]
    fn test_parse_submission_listing() {
        let json = r#"{
            "kind": "Listing",
            "data": {"children": [
                {"kind": "t3", "data": {"name": "t3_abc", "title": "Need scholarship help",
                                          "author": "student42", "subreddit": "scholarships"}},
                {"kind": "t3", "data": {"name": "t3_def", "title": "Dorm question",
                                          "author": null, "subreddit": "college"}}
            ]}
        }"#;
        let listing: Listing<SubmissionData> = serde_json::from_str(json).unwrap();
        assert_eq!(listing.data.children.len(), 2);

        let first: ContentItem = listing.data.children.into_iter().next().unwrap().data.into();
        assert_eq!(first.id, "t3_abc");
        assert_eq!(first.author, "student42");
        assert_eq!(first.channel, "scholarships");
        assert_eq!(first.text, "Need scholarship help");
        assert_eq!(first.kind, ItemKind::Submission);
    }

    #[test]
    fn test_deleted_author_mapped() {
        let data = SubmissionData {
            name: "t3_x".to_string(),
            title: "t".to_string(),
            author: None,
            subreddit: "s".to_string(),
        };
        let item: ContentItem = data.into();
        assert_eq!(item.author, "[deleted]");
    }

    #[test]
    fn test_parse_comment_listing() {
        let json = r#"{
            "data": {"children": [
                {"kind": "t1", "data": {"name": "t1_xyz", "body": "tuition is rough",
                                          "author": "someone", "subreddit": "financialaid"}}
            ]}
        }"#;
        let listing: Listing<CommentData> = serde_json::from_str(json).unwrap();
        let item: ContentItem = listing.data.children.into_iter().next().unwrap().data.into();
        assert_eq!(item.id, "t1_xyz");
        assert_eq!(item.text, "tuition is rough");
        assert_eq!(item.kind, ItemKind::Comment);
    }

    #[test]
    fn test_parse_comment_post_errors() {
        let json = r#"{"json": {"errors": [["RATELIMIT", "you are doing that too much", "ratelimit"]]}}"#;
        let parsed: CommentPostResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed.json.error_summary(),
            "RATELIMIT: you are doing that too much: ratelimit"
        );
    }

    #[test]
    fn test_parse_comment_post_success_has_no_errors() {
        let json = r#"{"json": {"errors": [], "data": {"things": []}}}"#;
        let parsed: CommentPostResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.json.errors.is_empty());
        assert_eq!(parsed.json.error_summary(), "");
    }
}
