//! Content items fetched from the monitored source.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether an item is a top-level post or a comment under one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Submission,
    Comment,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Submission => write!(f, "submission"),
            ItemKind::Comment => write!(f, "comment"),
        }
    }
}

/// A submission or comment observed in a monitored channel.
///
/// Read-only from the bot's perspective; never mutated after fetch. The `id`
/// is the source's fullname (`t3_*` for submissions, `t1_*` for comments), so
/// ids never collide across the two pollers even though they share one
/// ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    /// Source-assigned unique id (fullname).
    pub id: String,
    /// Author name. `[deleted]` when the account is gone.
    pub author: String,
    /// The channel (subreddit) the item was posted in.
    pub channel: String,
    /// The text the trigger matcher runs against: title for submissions,
    /// body for comments.
    pub text: String,
    /// What kind of item this is.
    pub kind: ItemKind,
}

impl ContentItem {
    /// Short preview of the item text for log lines.
    pub fn preview(&self) -> &str {
        let end = self
            .text
            .char_indices()
            .nth(80)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len());
        &self.text[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(text: &str) -> ContentItem {
        ContentItem {
            id: "t3_abc123".to_string(),
            author: "student42".to_string(),
            channel: "scholarships".to_string(),
            text: text.to_string(),
            kind: ItemKind::Submission,
        }
    }

    #[test]
    fn test_preview_short_text_unchanged() {
        let it = item("need help paying tuition");
        assert_eq!(it.preview(), "need help paying tuition");
    }

    #[test]
    fn test_preview_truncates_long_text() {
        let it = item(&"x".repeat(200));
        assert_eq!(it.preview().len(), 80);
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        let it = item(&"é".repeat(100));
        // Must not panic on multi-byte boundaries
        assert_eq!(it.preview().chars().count(), 80);
    }

    #[test]
    fn test_item_kind_display() {
        assert_eq!(ItemKind::Submission.to_string(), "submission");
        assert_eq!(ItemKind::Comment.to_string(), "comment");
    }

    #[test]
    fn test_content_item_serde_roundtrip() {
        let it = item("scholarship question");
        let json = serde_json::to_string(&it).unwrap();
        let parsed: ContentItem = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, "t3_abc123");
        assert_eq!(parsed.kind, ItemKind::Submission);
    }
}
