//! Replied-id ledger abstraction.
//!
//! The ledger answers "has this id been handled?" and durably records new
//! handled ids. It is the only mutable state shared between the two pollers,
//! so implementations must be safe for concurrent `contains`/`record` calls.
//!
//! The durable implementation (append-only text log) lives in
//! `scholarbot-infra`; [`MemoryLedger`] here backs tests and dry runs.

use std::collections::HashSet;

use tokio::sync::Mutex;

use scholarbot_types::error::LedgerError;

/// Durable record of item ids already replied to.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition), consistent
/// with the rest of the workspace. `record` must make the id durable before
/// returning; callers treat a failure as non-fatal (the item may be
/// reprocessed after a restart).
pub trait ReplyLedger: Send + Sync {
    /// O(1) membership check against the in-memory set.
    fn contains(&self, id: &str) -> impl std::future::Future<Output = bool> + Send;

    /// Durably append `id` and add it to the in-memory set.
    ///
    /// Recording an id that is already present is a no-op, not an error.
    fn record(&self, id: &str) -> impl std::future::Future<Output = Result<(), LedgerError>> + Send;

    /// Number of recorded ids.
    fn len(&self) -> impl std::future::Future<Output = usize> + Send;
}

/// In-memory ledger with no durability. Test and dry-run backend.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    seen: Mutex<HashSet<String>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the ledger, mirroring a log loaded at startup.
    pub async fn with_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ledger = Self::new();
        {
            let mut seen = ledger.seen.lock().await;
            seen.extend(ids.into_iter().map(Into::into));
        }
        ledger
    }
}

impl ReplyLedger for MemoryLedger {
    async fn contains(&self, id: &str) -> bool {
        self.seen.lock().await.contains(id)
    }

    async fn record(&self, id: &str) -> Result<(), LedgerError> {
        self.seen.lock().await.insert(id.to_string());
        Ok(())
    }

    async fn len(&self) -> usize {
        self.seen.lock().await.len()
    }
}
