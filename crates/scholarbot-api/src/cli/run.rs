//! `sbot run`: start the enabled pollers and block until shutdown.
//!
//! Each enabled poller runs in its own task. A shared [`CancellationToken`]
//! is cancelled on Ctrl+C or SIGTERM; the pollers observe it at every sleep
//! and are joined before exit, so a reply in flight completes.

use std::path::Path;
use std::sync::Arc;

use anyhow::bail;
use tokio_util::sync::CancellationToken;

use scholarbot_core::ledger::ReplyLedger;
use scholarbot_core::poller::{CommentPoller, SubmissionPoller};
use scholarbot_core::source::ContentSource;

use crate::state::AppState;

pub async fn run(config_path: &Path) -> anyhow::Result<()> {
    let state = AppState::init(config_path).await?;

    if !state.config.enable_submission_replies && !state.config.enable_comment_replies {
        bail!("both pollers are disabled in the config; nothing to run");
    }

    let username = state.source.verify_identity().await?;
    tracing::info!(%username, "authenticated");

    println!(
        "  {} Logged in as {}",
        console::style("✓").green(),
        console::style(format!("/u/{username}")).cyan()
    );
    println!(
        "  {} Monitoring r/{} ({} keywords, {} ids already replied)",
        console::style("✓").green(),
        state.source.subreddit_path(),
        state.matcher.len(),
        state.ledger.len().await,
    );
    println!("  {}", console::style("Press Ctrl+C to stop").dim());

    let shutdown = CancellationToken::new();
    let mut tasks = Vec::new();

    if state.config.enable_submission_replies {
        let poller = SubmissionPoller::new(
            Arc::clone(&state.source),
            Arc::clone(&state.ledger),
            state.matcher.clone(),
            state.config.reply_message.clone(),
            state.timing,
        );
        tasks.push(tokio::spawn(poller.run(shutdown.clone())));
    }

    if state.config.enable_comment_replies {
        let poller = CommentPoller::new(
            Arc::clone(&state.source),
            Arc::clone(&state.ledger),
            state.matcher.clone(),
            state.config.reply_message.clone(),
            state.timing,
        );
        tasks.push(tokio::spawn(poller.run(shutdown.clone())));
    }

    shutdown_signal().await;
    tracing::info!("shutdown requested");
    shutdown.cancel();

    for task in tasks {
        task.await?;
    }

    println!("\n  Bot stopped.");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
