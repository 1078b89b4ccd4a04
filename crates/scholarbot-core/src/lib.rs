//! Domain logic for Scholarbot.
//!
//! The retained core of the system: the trigger matcher, the replied-id
//! ledger abstraction, the content-source abstraction, and the two pollers
//! that tie them together. Also carries the thin glue around the external
//! agent executor (message normalization and response extraction).
//!
//! Concrete adapters (file-backed ledger, Reddit HTTP client) live in
//! `scholarbot-infra`.

pub mod agent;
pub mod ledger;
pub mod matcher;
pub mod poller;
pub mod source;
