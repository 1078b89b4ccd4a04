//! File-backed replied-id ledger.
//!
//! The durable log is a plain text file, one id per line, append-only. No
//! header, no checksum, no rotation: it grows for the lifetime of the
//! deployment. At startup the whole file is loaded into an in-memory set,
//! which is then the single source of truth for `contains`.
//!
//! One mutex guards both the set and the file handle, so the two pollers
//! can call `record` at overlapping times without a concurrent reader ever
//! observing a half-applied record. The append is flushed before the set is
//! updated; crash-atomicity of the pair is not promised (a crash between the
//! two effects means at worst one duplicate reply after restart).

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use scholarbot_core::ledger::ReplyLedger;
use scholarbot_types::error::LedgerError;

struct LedgerInner {
    seen: HashSet<String>,
    log: File,
}

/// Durable [`ReplyLedger`] over an append-only text log.
pub struct FileReplyLedger {
    inner: Mutex<LedgerInner>,
    path: PathBuf,
}

impl FileReplyLedger {
    /// Open (or create) the log at `path` and load every recorded id.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let path = path.as_ref();

        let seen: HashSet<String> = match tokio::fs::read_to_string(path).await {
            Ok(content) => content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect(),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashSet::new(),
            Err(err) => {
                return Err(LedgerError::Open {
                    path: path.display().to_string(),
                    source: err,
                });
            }
        };

        let log = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map_err(|err| LedgerError::Open {
                path: path.display().to_string(),
                source: err,
            })?;

        tracing::info!(
            path = %path.display(),
            loaded = seen.len(),
            "replied log loaded"
        );

        Ok(Self {
            inner: Mutex::new(LedgerInner { seen, log }),
            path: path.to_path_buf(),
        })
    }

    /// Path of the underlying log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReplyLedger for FileReplyLedger {
    async fn contains(&self, id: &str) -> bool {
        self.inner.lock().await.seen.contains(id)
    }

    async fn record(&self, id: &str) -> Result<(), LedgerError> {
        let mut inner = self.inner.lock().await;
        if inner.seen.contains(id) {
            return Ok(());
        }

        // Durable first, then the in-memory mirror
        inner.log.write_all(format!("{id}\n").as_bytes()).await?;
        inner.log.flush().await?;
        inner.seen.insert(id.to_string());
        Ok(())
    }

    async fn len(&self) -> usize {
        self.inner.lock().await.seen.len()
    }
}
