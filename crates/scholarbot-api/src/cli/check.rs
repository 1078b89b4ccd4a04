//! `sbot check`: startup diagnostics without starting the pollers.
//!
//! Walks the same startup path as `run` one step at a time and reports each
//! outcome, so a broken deployment fails here with a named cause instead of
//! a poller loop stuck in backoff.

use std::path::Path;

use anyhow::bail;

use scholarbot_core::ledger::ReplyLedger;
use scholarbot_core::matcher::KeywordMatcher;
use scholarbot_core::source::ContentSource;
use scholarbot_infra::config::load_bot_config;
use scholarbot_infra::env::{load_agent_credentials, load_reddit_credentials};
use scholarbot_infra::ledger::FileReplyLedger;
use scholarbot_infra::reddit::RedditSource;

fn check_mark(ok: bool) -> String {
    if ok {
        format!("{}", console::style("✓").green())
    } else {
        format!("{}", console::style("✗").red())
    }
}

pub async fn check(config_path: &Path) -> anyhow::Result<()> {
    println!();
    println!(
        "  {} Startup checks ({})",
        console::style("🔍").bold(),
        console::style(config_path.display()).cyan()
    );
    println!();

    let mut healthy = true;

    // Config file
    let config = match load_bot_config(config_path).await {
        Ok(config) => {
            println!(
                "  {} Config valid: {} subreddit(s), {} keyword(s)",
                check_mark(true),
                config.subreddits.len(),
                config.trigger_keywords.len()
            );
            if config.trigger_keywords.is_empty() {
                println!(
                    "  {} No trigger keywords configured; the bot will idle",
                    console::style("!").yellow()
                );
            }
            Some(config)
        }
        Err(err) => {
            println!("  {} Config failed: {err}", check_mark(false));
            None
        }
    };
    healthy &= config.is_some();

    // Reddit credentials + login
    match load_reddit_credentials() {
        Ok(credentials) => {
            println!("  {} Reddit credentials present", check_mark(true));
            if let Some(config) = &config {
                let source = RedditSource::new(credentials, &config.subreddits);
                match source.verify_identity().await {
                    Ok(username) => {
                        println!(
                            "  {} Logged in as {}",
                            check_mark(true),
                            console::style(format!("/u/{username}")).cyan()
                        );
                    }
                    Err(err) => {
                        println!("  {} Reddit login failed: {err}", check_mark(false));
                        healthy = false;
                    }
                }
            }
        }
        Err(err) => {
            println!("  {} Reddit credentials: {err}", check_mark(false));
            healthy = false;
        }
    }

    // Replied-id ledger
    if let Some(config) = &config {
        match FileReplyLedger::open(&config.replied_log).await {
            Ok(ledger) => {
                println!(
                    "  {} Replied log at {} ({} id(s) recorded)",
                    check_mark(true),
                    ledger.path().display(),
                    ledger.len().await
                );
            }
            Err(err) => {
                println!("  {} Replied log: {err}", check_mark(false));
                healthy = false;
            }
        }

        let matcher = KeywordMatcher::new(&config.trigger_keywords);
        println!(
            "  {} Keyword matcher built ({} active)",
            check_mark(true),
            matcher.len()
        );
    }

    // Agent keys are optional; their absence only disables agent-backed
    // replies, not the bot
    match load_agent_credentials() {
        Ok(_) => println!("  {} Agent API keys present", check_mark(true)),
        Err(err) => println!("  {} Agent API keys: {err}", console::style("-").dim()),
    }

    println!();
    if !healthy {
        bail!("startup checks failed");
    }
    println!("  {} All required checks passed", check_mark(true));
    println!();
    Ok(())
}
