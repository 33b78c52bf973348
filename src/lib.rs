//! # trello-mcp
//!
//! A Model Context Protocol server for the Trello API.
//!
//! trello-mcp exposes a small catalogue of Trello operations (boards,
//! cards, labels, comments, and a label poll) as MCP tools so that AI
//! agents can read and update a board directly.
//!
//! ## Features
//!
//! - Single-binary stdio MCP server (JSON-RPC 2.0, line-delimited)
//! - Thin blocking client for the Trello REST API
//! - Stateless label watch with an optional since-timestamp filter
//! - Credentials from the environment (or a `.env` file), never logged
//!
//! ## Example
//!
//! ```rust,ignore
//! use trello_mcp::{TrelloClient, TrelloConfig};
//!
//! let config = TrelloConfig::from_env()?;
//! let client = TrelloClient::new(config);
//! let boards = client.list_boards()?;
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
// multiple_crate_versions is inherently crate-level (detects duplicate transitive dependencies).
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod config;
pub mod mcp;
pub mod trello;

// Re-exports for convenience
pub use config::{HttpConfig, TrelloConfig};
pub use mcp::McpServer;
pub use trello::{TrelloClient, WatchResult};

/// Error type for trello-mcp operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `Config` | A required credential is missing or blank at startup |
/// | `InvalidInput` | Malformed tool arguments, unknown tool names, an update with no fields, an unparseable since-timestamp |
/// | `Api` | The Trello API answered with a non-2xx status |
/// | `Transport` | The request never produced a response (DNS, connect, timeout) or the body could not be decoded |
#[derive(Debug, ThisError)]
pub enum Error {
    /// A required configuration value is missing.
    ///
    /// Raised when:
    /// - `TRELLO_API_KEY` or `TRELLO_TOKEN` is absent or blank
    ///
    /// Fatal at startup; nothing is retried.
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - An update supplies neither `name` nor `desc`
    /// - A tool call is missing a required argument or names an unknown tool
    /// - A since-timestamp is not a valid RFC 3339 instant
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The Trello API rejected the request.
    ///
    /// Carries the HTTP status code and its canonical reason phrase.
    /// Callers are responsible for resubmission; nothing is retried.
    #[error("Trello API error: {status} {reason}")]
    Api {
        /// HTTP status code of the upstream response.
        status: u16,
        /// Canonical reason phrase for the status.
        reason: String,
    },

    /// The request failed below the HTTP layer.
    ///
    /// Raised when:
    /// - DNS resolution or the TCP/TLS connect fails
    /// - The configured timeout elapses
    /// - The response body is not valid JSON
    #[error("request failed ({kind}): {cause}")]
    Transport {
        /// Failure classification: `timeout`, `connect`, `request`, `decode`, `stdio`, or `unknown`.
        kind: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for trello-mcp operations.
pub type Result<T> = std::result::Result<T, Error>;
