//! The two long-lived posting loops.
//!
//! [`SubmissionPoller`] fetches a bounded batch of recent submissions each
//! cycle; [`CommentPoller`] consumes a live comment stream. Both apply the
//! same per-item pipeline: skip if already in the ledger, skip if no keyword
//! match, otherwise reply, record the id, and sleep the reply cooldown. The
//! cooldown serializes replies within a poller: at most one reply per
//! cooldown window regardless of how many matches a batch held.
//!
//! Every sleep (poll interval, cooldown, error backoff) races the shared
//! [`CancellationToken`], so shutdown is observed at each suspension point.
//! Errors never terminate a loop; they are logged and followed by a fixed
//! backoff.

use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use tokio_util::sync::CancellationToken;

use scholarbot_types::config::BotConfig;
use scholarbot_types::content::ContentItem;
use scholarbot_types::error::SourceError;

use crate::ledger::ReplyLedger;
use crate::matcher::KeywordMatcher;
use crate::source::ContentSource;

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

/// Loop timing knobs shared by both pollers.
#[derive(Debug, Clone, Copy)]
pub struct PollerTiming {
    /// Batch size for submission fetch cycles.
    pub poll_limit: u32,
    /// Minimum interval between consecutive replies.
    pub cooldown: Duration,
    /// Sleep between submission fetch cycles.
    pub poll_interval: Duration,
    /// Sleep after a fetch/reply/stream error.
    pub error_backoff: Duration,
}

impl PollerTiming {
    pub fn from_config(config: &BotConfig) -> Self {
        Self {
            poll_limit: config.poll_limit,
            cooldown: Duration::from_secs(config.cooldown_secs),
            poll_interval: Duration::from_secs(config.poll_interval_secs),
            error_backoff: Duration::from_secs(config.error_backoff_secs),
        }
    }
}

/// Sleep for `duration` unless the token is cancelled first.
///
/// Returns false when cancelled, true when the sleep completed.
async fn sleep_or_cancel(shutdown: &CancellationToken, duration: Duration) -> bool {
    tokio::select! {
        _ = shutdown.cancelled() => false,
        _ = tokio::time::sleep(duration) => true,
    }
}

// ---------------------------------------------------------------------------
// Shared per-item pipeline
// ---------------------------------------------------------------------------

/// Outcome of handling one fetched item.
enum Handled {
    /// Item was skipped (seen, or no keyword match).
    Skipped,
    /// Reply was sent; the caller owes a cooldown sleep.
    Replied,
}

/// Dedup check, keyword match, reply, record. Shared by both pollers.
///
/// A reply failure propagates (the caller backs off); a record failure is
/// logged and swallowed, since the worst case is one duplicate reply after a
/// restart.
async fn handle_item<S, L>(
    source: &S,
    ledger: &L,
    matcher: &KeywordMatcher,
    reply_message: &str,
    item: &ContentItem,
) -> Result<Handled, SourceError>
where
    S: ContentSource,
    L: ReplyLedger,
{
    if ledger.contains(&item.id).await {
        return Ok(Handled::Skipped);
    }
    if !matcher.matches(&item.text) {
        return Ok(Handled::Skipped);
    }

    source.reply(&item.id, reply_message).await?;
    tracing::info!(
        id = %item.id,
        kind = %item.kind,
        author = %item.author,
        channel = %item.channel,
        text = item.preview(),
        "replied"
    );

    if let Err(err) = ledger.record(&item.id).await {
        tracing::warn!(
            id = %item.id,
            error = %err,
            "failed to record replied id; item may be re-replied after a restart"
        );
    }

    Ok(Handled::Replied)
}

// ---------------------------------------------------------------------------
// SubmissionPoller
// ---------------------------------------------------------------------------

/// Periodic poller over the most recent submissions.
pub struct SubmissionPoller<S, L> {
    source: Arc<S>,
    ledger: Arc<L>,
    matcher: KeywordMatcher,
    reply_message: String,
    timing: PollerTiming,
}

impl<S, L> SubmissionPoller<S, L>
where
    S: ContentSource,
    L: ReplyLedger,
{
    pub fn new(
        source: Arc<S>,
        ledger: Arc<L>,
        matcher: KeywordMatcher,
        reply_message: String,
        timing: PollerTiming,
    ) -> Self {
        Self {
            source,
            ledger,
            matcher,
            reply_message,
            timing,
        }
    }

    /// Run until the token is cancelled. Never returns on error.
    pub async fn run(self, shutdown: CancellationToken) {
        tracing::info!("submission poller started");

        while !shutdown.is_cancelled() {
            let pause = match self.cycle(&shutdown).await {
                Ok(()) => self.timing.poll_interval,
                Err(err) => {
                    tracing::error!(error = %err, "submission cycle failed");
                    self.timing.error_backoff
                }
            };
            if !sleep_or_cancel(&shutdown, pause).await {
                break;
            }
        }

        tracing::info!("submission poller stopped");
    }

    /// One fetch-filter-reply pass over the latest batch.
    async fn cycle(&self, shutdown: &CancellationToken) -> Result<(), SourceError> {
        let items = self.source.latest_submissions(self.timing.poll_limit).await?;
        tracing::debug!(count = items.len(), "fetched submission batch");

        for item in &items {
            if shutdown.is_cancelled() {
                return Ok(());
            }
            match handle_item(
                self.source.as_ref(),
                self.ledger.as_ref(),
                &self.matcher,
                &self.reply_message,
                item,
            )
            .await?
            {
                Handled::Skipped => {}
                Handled::Replied => {
                    if !sleep_or_cancel(shutdown, self.timing.cooldown).await {
                        return Ok(());
                    }
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// CommentPoller
// ---------------------------------------------------------------------------

/// Streaming poller over newly created comments.
pub struct CommentPoller<S, L> {
    source: Arc<S>,
    ledger: Arc<L>,
    matcher: KeywordMatcher,
    reply_message: String,
    timing: PollerTiming,
}

impl<S, L> CommentPoller<S, L>
where
    S: ContentSource,
    L: ReplyLedger,
{
    pub fn new(
        source: Arc<S>,
        ledger: Arc<L>,
        matcher: KeywordMatcher,
        reply_message: String,
        timing: PollerTiming,
    ) -> Self {
        Self {
            source,
            ledger,
            matcher,
            reply_message,
            timing,
        }
    }

    /// Run until the token is cancelled, re-subscribing after any stream
    /// error or unexpected end-of-stream.
    pub async fn run(self, shutdown: CancellationToken) {
        tracing::info!("comment poller started");

        while !shutdown.is_cancelled() {
            // skip_existing: comments from before this subscription are not
            // replayed. Re-subscribing after an error re-primes the window.
            match self.consume(&shutdown).await {
                Ok(()) => {
                    if shutdown.is_cancelled() {
                        break;
                    }
                    tracing::warn!("comment stream ended; re-subscribing");
                }
                Err(err) => {
                    tracing::error!(error = %err, "comment stream failed");
                }
            }
            if !sleep_or_cancel(&shutdown, self.timing.error_backoff).await {
                break;
            }
        }

        tracing::info!("comment poller stopped");
    }

    /// Drain one subscription until it ends, errors, or shutdown.
    async fn consume(&self, shutdown: &CancellationToken) -> Result<(), SourceError> {
        let mut stream = self.source.comment_stream(true);

        loop {
            let next = tokio::select! {
                _ = shutdown.cancelled() => return Ok(()),
                next = stream.next() => next,
            };
            let item = match next {
                Some(result) => result?,
                None => return Ok(()),
            };

            match handle_item(
                self.source.as_ref(),
                self.ledger.as_ref(),
                &self.matcher,
                &self.reply_message,
                &item,
            )
            .await?
            {
                Handled::Skipped => {}
                Handled::Replied => {
                    if !sleep_or_cancel(shutdown, self.timing.cooldown).await {
                        return Ok(());
                    }
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
