//! MCP server implementation.
//!
//! Provides a Model Context Protocol server exposing Trello operations
//! as tools.
//!
//! ## Tools
//!
//! `trello_list_boards`, `trello_list_cards`, `trello_get_card`,
//! `trello_update_card`, `trello_add_comment`, `trello_create_card`,
//! `trello_get_board_lists`, `trello_get_board_labels`,
//! `trello_get_cards_by_label`, `trello_watch_label`
//!
//! ## Usage
//!
//! ### Stdio Transport (Claude Desktop)
//!
//! ```bash
//! trello-mcp serve
//! ```
//!
//! ### Claude Desktop Configuration
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "trello": {
//!       "command": "trello-mcp",
//!       "args": ["serve"],
//!       "env": {
//!         "TRELLO_API_KEY": "...",
//!         "TRELLO_TOKEN": "..."
//!       }
//!     }
//!   }
//! }
//! ```

// Allow unused_self for handlers kept as methods for API consistency.
#![allow(clippy::unused_self)]
// Allow unnecessary wraps for methods that return Result for API consistency.
#![allow(clippy::unnecessary_wraps)]

mod dispatch;
mod server;
mod tools;

pub use server::McpServer;
pub use tools::{ToolContent, ToolDefinition, ToolRegistry, ToolResult};
