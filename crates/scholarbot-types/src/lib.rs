//! Shared domain types for Scholarbot.
//!
//! This crate has no I/O and no async code. It defines the data shapes the
//! rest of the workspace agrees on: monitored content items, bot
//! configuration, credential bundles, chat messages for the agent boundary,
//! and the error enums for each concern.

pub mod chat;
pub mod config;
pub mod content;
pub mod credentials;
pub mod error;
