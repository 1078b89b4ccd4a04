//! Infrastructure adapters for Scholarbot.
//!
//! Concrete implementations of the abstractions in `scholarbot-core`:
//! the append-only file ledger, the Reddit HTTP adapter, and the loaders
//! for configuration files and environment credentials.

pub mod config;
pub mod env;
pub mod ledger;
pub mod reddit;
