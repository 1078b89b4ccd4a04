//! Application state wiring the adapters together.
//!
//! The pollers are generic over source/ledger traits; `AppState` pins them
//! to the Reddit client and the file-backed ledger.

use std::path::Path;
use std::sync::Arc;

use scholarbot_core::matcher::KeywordMatcher;
use scholarbot_core::poller::PollerTiming;
use scholarbot_infra::config::load_bot_config;
use scholarbot_infra::env::load_reddit_credentials;
use scholarbot_infra::ledger::FileReplyLedger;
use scholarbot_infra::reddit::RedditSource;
use scholarbot_types::config::BotConfig;

/// Everything a command needs: validated config plus concrete adapters.
pub struct AppState {
    pub config: BotConfig,
    pub source: Arc<RedditSource>,
    pub ledger: Arc<FileReplyLedger>,
    pub matcher: KeywordMatcher,
    pub timing: PollerTiming,
}

impl AppState {
    /// Load config and credentials, open the ledger, build the source.
    ///
    /// Does not touch the network; `verify_identity` is the caller's first
    /// networked step.
    pub async fn init(config_path: &Path) -> anyhow::Result<Self> {
        let config = load_bot_config(config_path).await?;
        let credentials = load_reddit_credentials()?;

        let source = Arc::new(RedditSource::new(credentials, &config.subreddits));
        let ledger = Arc::new(FileReplyLedger::open(&config.replied_log).await?);
        let matcher = KeywordMatcher::new(&config.trigger_keywords);
        let timing = PollerTiming::from_config(&config);

        Ok(Self {
            config,
            source,
            ledger,
            matcher,
            timing,
        })
    }
}
