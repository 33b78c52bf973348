//! Tool execution handlers.
//!
//! Each handler extracts its arguments from the raw JSON value, calls
//! the Trello client, and renders the result as formatted JSON text.
//! Mutating tools prefix a short confirmation line so the agent sees at
//! a glance that the write landed.

use super::ToolResult;
use crate::trello::TrelloClient;
use crate::{Error, Result};
use serde::Serialize;
use serde_json::Value;

/// Extracts a required string argument.
fn require_str<'a>(arguments: &'a Value, key: &str) -> Result<&'a str> {
    arguments
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| Error::InvalidInput(format!("missing required argument: {key}")))
}

/// Extracts an optional string argument.
fn optional_str<'a>(arguments: &'a Value, key: &str) -> Option<&'a str> {
    arguments.get(key).and_then(Value::as_str)
}

/// Extracts an optional array-of-strings argument.
fn optional_str_list(arguments: &Value, key: &str) -> Result<Option<Vec<String>>> {
    let Some(raw) = arguments.get(key) else {
        return Ok(None);
    };

    let items = raw
        .as_array()
        .ok_or_else(|| Error::InvalidInput(format!("argument '{key}' must be an array")))?;

    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                Error::InvalidInput(format!("argument '{key}' must contain only strings"))
            })
        })
        .collect::<Result<Vec<String>>>()
        .map(Some)
}

/// Pretty-prints a serializable value for the tool response.
fn pretty<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
}

/// Handles `trello_list_boards`.
pub fn execute_list_boards(client: &TrelloClient, _arguments: &Value) -> Result<ToolResult> {
    let boards = client.list_boards()?;
    Ok(ToolResult::text(pretty(&boards)))
}

/// Handles `trello_list_cards`.
pub fn execute_list_cards(client: &TrelloClient, arguments: &Value) -> Result<ToolResult> {
    let board_id = require_str(arguments, "boardId")?;
    let cards = client.list_cards(board_id)?;
    Ok(ToolResult::text(pretty(&cards)))
}

/// Handles `trello_get_card`.
pub fn execute_get_card(client: &TrelloClient, arguments: &Value) -> Result<ToolResult> {
    let card_id = require_str(arguments, "cardId")?;
    let card = client.get_card(card_id)?;
    Ok(ToolResult::text(pretty(&card)))
}

/// Handles `trello_update_card`.
pub fn execute_update_card(client: &TrelloClient, arguments: &Value) -> Result<ToolResult> {
    let card_id = require_str(arguments, "cardId")?;
    let name = optional_str(arguments, "name");
    let desc = optional_str(arguments, "desc");

    let card = client.update_card(card_id, name, desc)?;
    Ok(ToolResult::text(format!(
        "Card updated successfully:\n{}",
        pretty(&card)
    )))
}

/// Handles `trello_add_comment`.
pub fn execute_add_comment(client: &TrelloClient, arguments: &Value) -> Result<ToolResult> {
    let card_id = require_str(arguments, "cardId")?;
    let text = require_str(arguments, "text")?;

    let comment = client.add_comment(card_id, text)?;
    Ok(ToolResult::text(format!(
        "Comment added successfully:\n{}",
        pretty(&comment)
    )))
}

/// Handles `trello_create_card`.
pub fn execute_create_card(client: &TrelloClient, arguments: &Value) -> Result<ToolResult> {
    let list_id = require_str(arguments, "listId")?;
    let name = require_str(arguments, "name")?;
    let desc = optional_str(arguments, "desc");
    let label_ids = optional_str_list(arguments, "labelIds")?;

    let card = client.create_card(list_id, name, desc, label_ids.as_deref())?;
    let short_url = card
        .get("shortUrl")
        .and_then(Value::as_str)
        .unwrap_or_default();
    Ok(ToolResult::text(format!(
        "Card created: {short_url}\n{}",
        pretty(&card)
    )))
}

/// Handles `trello_get_board_lists`.
pub fn execute_get_board_lists(client: &TrelloClient, arguments: &Value) -> Result<ToolResult> {
    let board_id = require_str(arguments, "boardId")?;
    let lists = client.get_board_lists(board_id)?;
    Ok(ToolResult::text(pretty(&lists)))
}

/// Handles `trello_get_board_labels`.
pub fn execute_get_board_labels(client: &TrelloClient, arguments: &Value) -> Result<ToolResult> {
    let board_id = require_str(arguments, "boardId")?;
    let labels = client.get_board_labels(board_id)?;
    Ok(ToolResult::text(pretty(&labels)))
}

/// Handles `trello_get_cards_by_label`.
pub fn execute_get_cards_by_label(client: &TrelloClient, arguments: &Value) -> Result<ToolResult> {
    let board_id = require_str(arguments, "boardId")?;
    let label_name = require_str(arguments, "labelName")?;

    let cards = client.get_cards_by_label(board_id, label_name)?;
    Ok(ToolResult::text(pretty(&cards)))
}

/// Handles `trello_watch_label`.
pub fn execute_watch_label(client: &TrelloClient, arguments: &Value) -> Result<ToolResult> {
    let board_id = require_str(arguments, "boardId")?;
    let label_name = require_str(arguments, "labelName")?;
    let since = optional_str(arguments, "sinceTimestamp");

    let result = client.watch_label(board_id, label_name, since)?;
    Ok(ToolResult::text(pretty(&result)))
}
