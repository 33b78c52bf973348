//! Tool definitions for MCP tools.
//!
//! Contains the JSON Schema definitions for all Trello tools. Parameter
//! names are camelCase on the wire, matching the Trello API's own field
//! naming.

use super::ToolDefinition;

/// Defines the `trello_list_boards` tool.
pub fn list_boards_tool() -> ToolDefinition {
    ToolDefinition {
        name: "trello_list_boards".to_string(),
        description: "List all Trello boards accessible to the authenticated user".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {},
        }),
    }
}

/// Defines the `trello_list_cards` tool.
pub fn list_cards_tool() -> ToolDefinition {
    ToolDefinition {
        name: "trello_list_cards".to_string(),
        description: "List all cards on a specific Trello board".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "boardId": {
                    "type": "string",
                    "description": "The ID of the board"
                }
            },
            "required": ["boardId"]
        }),
    }
}

/// Defines the `trello_get_card` tool.
pub fn get_card_tool() -> ToolDefinition {
    ToolDefinition {
        name: "trello_get_card".to_string(),
        description: "Get detailed information about a specific card".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "cardId": {
                    "type": "string",
                    "description": "The ID of the card"
                }
            },
            "required": ["cardId"]
        }),
    }
}

/// Defines the `trello_update_card` tool.
pub fn update_card_tool() -> ToolDefinition {
    ToolDefinition {
        name: "trello_update_card".to_string(),
        description: "Update a card's properties (name, description, etc.)".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "cardId": {
                    "type": "string",
                    "description": "The ID of the card"
                },
                "name": {
                    "type": "string",
                    "description": "New name for the card (optional)"
                },
                "desc": {
                    "type": "string",
                    "description": "New description for the card (optional)"
                }
            },
            "required": ["cardId"]
        }),
    }
}

/// Defines the `trello_add_comment` tool.
pub fn add_comment_tool() -> ToolDefinition {
    ToolDefinition {
        name: "trello_add_comment".to_string(),
        description: "Add a comment to a card".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "cardId": {
                    "type": "string",
                    "description": "The ID of the card"
                },
                "text": {
                    "type": "string",
                    "description": "The comment text"
                }
            },
            "required": ["cardId", "text"]
        }),
    }
}

/// Defines the `trello_create_card` tool.
pub fn create_card_tool() -> ToolDefinition {
    ToolDefinition {
        name: "trello_create_card".to_string(),
        description: "Create a new card in a Trello list".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "listId": {
                    "type": "string",
                    "description": "The ID of the list to add the card to"
                },
                "name": {
                    "type": "string",
                    "description": "Title of the card"
                },
                "desc": {
                    "type": "string",
                    "description": "Description/body of the card (optional)"
                },
                "labelIds": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "List of label IDs to attach (optional)"
                }
            },
            "required": ["listId", "name"]
        }),
    }
}

/// Defines the `trello_get_board_lists` tool.
pub fn get_board_lists_tool() -> ToolDefinition {
    ToolDefinition {
        name: "trello_get_board_lists".to_string(),
        description: "Get all lists on a Trello board".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "boardId": {
                    "type": "string",
                    "description": "The ID of the board"
                }
            },
            "required": ["boardId"]
        }),
    }
}

/// Defines the `trello_get_board_labels` tool.
pub fn get_board_labels_tool() -> ToolDefinition {
    ToolDefinition {
        name: "trello_get_board_labels".to_string(),
        description: "Get all labels defined on a Trello board".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "boardId": {
                    "type": "string",
                    "description": "The ID of the board"
                }
            },
            "required": ["boardId"]
        }),
    }
}

/// Defines the `trello_get_cards_by_label` tool.
pub fn get_cards_by_label_tool() -> ToolDefinition {
    ToolDefinition {
        name: "trello_get_cards_by_label".to_string(),
        description: "Get all cards on a board that have a specific label".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "boardId": {
                    "type": "string",
                    "description": "The ID of the board"
                },
                "labelName": {
                    "type": "string",
                    "description": "The name of the label to filter by"
                }
            },
            "required": ["boardId", "labelName"]
        }),
    }
}

/// Defines the `trello_watch_label` tool.
pub fn watch_label_tool() -> ToolDefinition {
    ToolDefinition {
        name: "trello_watch_label".to_string(),
        description: "Poll for cards with a specific label (e.g., 'doing') and return new ones since last check".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "boardId": {
                    "type": "string",
                    "description": "The ID of the board"
                },
                "labelName": {
                    "type": "string",
                    "description": "The name of the label to watch for"
                },
                "sinceTimestamp": {
                    "type": "string",
                    "description": "ISO timestamp - only return cards modified after this time (optional)"
                }
            },
            "required": ["boardId", "labelName"]
        }),
    }
}
