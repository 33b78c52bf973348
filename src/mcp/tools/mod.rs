//! MCP tool implementations.
//!
//! Provides tool handlers for the Model Context Protocol.
//!
//! # Module Structure
//!
//! - [`definitions`]: Tool schema definitions (JSON Schema for input validation)
//! - [`handlers`]: Tool execution logic (argument extraction + client calls)

mod definitions;
mod handlers;

use crate::trello::TrelloClient;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of MCP tools.
///
/// Holds the static tool table and the injected Trello client that the
/// handlers execute against. The client is constructed once at startup
/// and shared read-only between calls.
pub struct ToolRegistry {
    /// Available tools.
    tools: HashMap<String, ToolDefinition>,
    /// Trello API client shared by all handlers.
    client: Arc<TrelloClient>,
}

impl ToolRegistry {
    /// Creates a new tool registry with all Trello tools.
    #[must_use]
    pub fn new(client: Arc<TrelloClient>) -> Self {
        let mut tools = HashMap::new();

        tools.insert(
            "trello_list_boards".to_string(),
            definitions::list_boards_tool(),
        );
        tools.insert(
            "trello_list_cards".to_string(),
            definitions::list_cards_tool(),
        );
        tools.insert("trello_get_card".to_string(), definitions::get_card_tool());
        tools.insert(
            "trello_update_card".to_string(),
            definitions::update_card_tool(),
        );
        tools.insert(
            "trello_add_comment".to_string(),
            definitions::add_comment_tool(),
        );
        tools.insert(
            "trello_create_card".to_string(),
            definitions::create_card_tool(),
        );
        tools.insert(
            "trello_get_board_lists".to_string(),
            definitions::get_board_lists_tool(),
        );
        tools.insert(
            "trello_get_board_labels".to_string(),
            definitions::get_board_labels_tool(),
        );
        tools.insert(
            "trello_get_cards_by_label".to_string(),
            definitions::get_cards_by_label_tool(),
        );
        tools.insert(
            "trello_watch_label".to_string(),
            definitions::watch_label_tool(),
        );

        Self { tools, client }
    }

    /// Returns all tool definitions.
    #[must_use]
    pub fn list_tools(&self) -> Vec<&ToolDefinition> {
        self.tools.values().collect()
    }

    /// Gets a tool definition by name.
    #[must_use]
    pub fn get_tool(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }

    /// Executes a tool with the given arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if the tool name is unknown, the arguments are
    /// malformed, or the upstream call fails.
    pub fn execute(&self, name: &str, arguments: &Value) -> Result<ToolResult> {
        match name {
            "trello_list_boards" => handlers::execute_list_boards(&self.client, arguments),
            "trello_list_cards" => handlers::execute_list_cards(&self.client, arguments),
            "trello_get_card" => handlers::execute_get_card(&self.client, arguments),
            "trello_update_card" => handlers::execute_update_card(&self.client, arguments),
            "trello_add_comment" => handlers::execute_add_comment(&self.client, arguments),
            "trello_create_card" => handlers::execute_create_card(&self.client, arguments),
            "trello_get_board_lists" => handlers::execute_get_board_lists(&self.client, arguments),
            "trello_get_board_labels" => {
                handlers::execute_get_board_labels(&self.client, arguments)
            },
            "trello_get_cards_by_label" => {
                handlers::execute_get_cards_by_label(&self.client, arguments)
            },
            "trello_watch_label" => handlers::execute_watch_label(&self.client, arguments),
            _ => Err(Error::InvalidInput(format!("Unknown tool: {name}"))),
        }
    }
}

/// Definition of an MCP tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name.
    pub name: String,
    /// Tool description.
    pub description: String,
    /// JSON Schema for input validation.
    pub input_schema: Value,
}

/// Result of a tool execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Content returned by the tool.
    pub content: Vec<ToolContent>,
    /// Whether the result represents an error.
    #[serde(default)]
    pub is_error: bool,
}

impl ToolResult {
    /// Creates a successful text result.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: false,
        }
    }
}

/// Content types that can be returned by tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    /// Text content.
    Text {
        /// The text content.
        text: String,
    },
}
