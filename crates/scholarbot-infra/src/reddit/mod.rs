//! Reddit adapter.
//!
//! Implements `scholarbot_core::source::ContentSource` against the Reddit
//! JSON API with an OAuth2 script-app (password grant) flow. The comment
//! "stream" is an emulation: the listing endpoint is polled and a bounded
//! window of already-seen fullnames turns the polls into an ordered stream
//! of new items.

mod client;
mod stream;
mod types;

pub use client::RedditSource;
