//! Trello API client.
//!
//! A thin blocking wrapper around the Trello REST API. Upstream records
//! (boards, cards, lists, labels, comments) are passed through as raw
//! JSON; the schema is externally owned and may gain fields at any time,
//! so it is deliberately not modeled here.

mod client;

pub use client::{TrelloClient, WatchResult};

use crate::config::HttpConfig;
use std::time::Duration;

/// Builds a blocking HTTP client with configured timeouts.
#[must_use]
pub fn build_http_client(config: HttpConfig) -> reqwest::blocking::Client {
    let mut builder = reqwest::blocking::Client::builder();
    if config.timeout_ms > 0 {
        builder = builder.timeout(Duration::from_millis(config.timeout_ms));
    }
    if config.connect_timeout_ms > 0 {
        builder = builder.connect_timeout(Duration::from_millis(config.connect_timeout_ms));
    }

    builder.build().unwrap_or_else(|err| {
        tracing::warn!("Failed to build Trello HTTP client: {err}");
        reqwest::blocking::Client::new()
    })
}
