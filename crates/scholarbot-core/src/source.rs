//! Content source abstraction.
//!
//! The bot's view of the monitored platform: list recent submissions,
//! subscribe to a live comment stream, and reply to an item. The concrete
//! Reddit adapter lives in `scholarbot-infra`; tests use hand-rolled fakes.

use std::pin::Pin;

use futures_util::Stream;

use scholarbot_types::content::ContentItem;
use scholarbot_types::error::SourceError;

/// Unbounded, ordered stream of newly created comments.
///
/// Boxed (not RPITIT) so fakes and the Reddit adapter can return differently
/// shaped streams behind one type.
pub type CommentStream = Pin<Box<dyn Stream<Item = Result<ContentItem, SourceError>> + Send>>;

/// A platform the bot monitors and replies on.
///
/// `reply` is at-most-once from the caller's side only: the caller enforces
/// dedup through the ledger, the source makes no idempotency promise.
pub trait ContentSource: Send + Sync {
    /// Confirm the credentials work. Returns the authenticated account name.
    ///
    /// A failure here is fatal to startup; nothing else in this trait is.
    fn verify_identity(
        &self,
    ) -> impl std::future::Future<Output = Result<String, SourceError>> + Send;

    /// The `limit` most recent submissions across the configured channels,
    /// in the order the source returns them (most recent first).
    fn latest_submissions(
        &self,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<ContentItem>, SourceError>> + Send;

    /// Subscribe to newly created comments across the configured channels.
    ///
    /// With `skip_existing`, comments that already existed when the
    /// subscription started are not replayed. The stream ends after yielding
    /// an error; the caller re-subscribes after its backoff.
    fn comment_stream(&self, skip_existing: bool) -> CommentStream;

    /// Post `body` as a reply to the item with the given fullname.
    fn reply(
        &self,
        parent_id: &str,
        body: &str,
    ) -> impl std::future::Future<Output = Result<(), SourceError>> + Send;
}
