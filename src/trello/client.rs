//! Trello REST API client.

use super::build_http_client;
use crate::config::{HttpConfig, TrelloConfig};
use crate::{Error, Result};
use chrono::{DateTime, FixedOffset, Utc};
use reqwest::Method;
use serde::Serialize;
use serde_json::{Map, Value};

/// Client for the Trello REST API.
///
/// Each operation issues exactly one blocking HTTP request with the
/// configured `key`/`token` pair appended as query parameters. There are
/// no retries; a failed call surfaces its cause and the caller decides
/// whether to resubmit.
pub struct TrelloClient {
    /// API configuration (credentials, base URL, timeouts).
    config: TrelloConfig,
    /// HTTP client.
    client: reqwest::blocking::Client,
}

impl TrelloClient {
    /// Creates a new Trello client from a loaded configuration.
    #[must_use]
    pub fn new(config: TrelloConfig) -> Self {
        let client = build_http_client(config.http());
        Self { config, client }
    }

    /// Replaces the HTTP timeout configuration, rebuilding the transport.
    #[must_use]
    pub fn with_http_config(mut self, http: HttpConfig) -> Self {
        self.config = self.config.with_http_config(http);
        self.client = build_http_client(http);
        self
    }

    /// Makes an authenticated request against the Trello API.
    fn request(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value> {
        let url = format!("{}{}", self.config.base_url(), path);

        let mut request = self
            .client
            .request(method, &url)
            .query(&self.config.auth_params());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().map_err(|e| {
            let kind = if e.is_timeout() {
                "timeout"
            } else if e.is_connect() {
                "connect"
            } else if e.is_request() {
                "request"
            } else {
                "unknown"
            };
            tracing::error!(path, error = %e, error_kind = kind, "Trello request failed");
            Error::Transport {
                kind: kind.to_string(),
                cause: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(path, status = %status, "Trello API returned error status");
            return Err(Error::Api {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        response.json().map_err(|e| {
            tracing::error!(path, error = %e, "Failed to decode Trello response");
            Error::Transport {
                kind: "decode".to_string(),
                cause: e.to_string(),
            }
        })
    }

    /// Fetches a path and interprets the response as an array.
    fn request_list(&self, path: &str) -> Result<Vec<Value>> {
        match self.request(Method::GET, path, None)? {
            Value::Array(items) => Ok(items),
            other => Err(Error::Transport {
                kind: "decode".to_string(),
                cause: format!("expected a JSON array, got: {other}"),
            }),
        }
    }

    /// Lists all boards accessible to the authenticated user.
    pub fn list_boards(&self) -> Result<Vec<Value>> {
        self.request_list("/members/me/boards")
    }

    /// Lists all cards on a board.
    pub fn list_cards(&self, board_id: &str) -> Result<Vec<Value>> {
        self.request_list(&format!("/boards/{board_id}/cards"))
    }

    /// Gets a card with all fields populated.
    pub fn get_card(&self, card_id: &str) -> Result<Value> {
        self.request(Method::GET, &format!("/cards/{card_id}?fields=all"), None)
    }

    /// Updates a card's name and/or description.
    ///
    /// Only the supplied fields are sent; at least one must be present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] before any network call when both
    /// fields are absent.
    pub fn update_card(
        &self,
        card_id: &str,
        name: Option<&str>,
        desc: Option<&str>,
    ) -> Result<Value> {
        let mut updates = Map::new();
        if let Some(name) = name {
            updates.insert("name".to_string(), Value::from(name));
        }
        if let Some(desc) = desc {
            updates.insert("desc".to_string(), Value::from(desc));
        }

        if updates.is_empty() {
            return Err(Error::InvalidInput(
                "at least one of 'name' or 'desc' must be provided".to_string(),
            ));
        }

        self.request(
            Method::PUT,
            &format!("/cards/{card_id}"),
            Some(&Value::Object(updates)),
        )
    }

    /// Adds a comment to a card, returning the created comment action.
    pub fn add_comment(&self, card_id: &str, text: &str) -> Result<Value> {
        self.request(
            Method::POST,
            &format!("/cards/{card_id}/actions/comments"),
            Some(&serde_json::json!({ "text": text })),
        )
    }

    /// Creates a card in a list, returning the created record.
    pub fn create_card(
        &self,
        list_id: &str,
        name: &str,
        desc: Option<&str>,
        label_ids: Option<&[String]>,
    ) -> Result<Value> {
        let mut card = Map::new();
        card.insert("idList".to_string(), Value::from(list_id));
        card.insert("name".to_string(), Value::from(name));
        if let Some(desc) = desc {
            card.insert("desc".to_string(), Value::from(desc));
        }
        if let Some(label_ids) = label_ids {
            card.insert("idLabels".to_string(), Value::from(label_ids.to_vec()));
        }

        self.request(Method::POST, "/cards", Some(&Value::Object(card)))
    }

    /// Lists the lists on a board.
    pub fn get_board_lists(&self, board_id: &str) -> Result<Vec<Value>> {
        self.request_list(&format!("/boards/{board_id}/lists"))
    }

    /// Lists the labels defined on a board.
    pub fn get_board_labels(&self, board_id: &str) -> Result<Vec<Value>> {
        self.request_list(&format!("/boards/{board_id}/labels"))
    }

    /// Gets all cards on a board carrying a label, matched by name.
    ///
    /// Matching is case-insensitive; upstream order is preserved.
    pub fn get_cards_by_label(&self, board_id: &str, label_name: &str) -> Result<Vec<Value>> {
        let cards = self.list_cards(board_id)?;
        Ok(filter_by_label(cards, label_name))
    }

    /// Polls a board once for cards carrying a label.
    ///
    /// With `since_timestamp`, only cards whose `dateLastActivity`
    /// strictly exceeds it are retained. The caller tracks the last-seen
    /// timestamp; nothing is stored between polls.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when `since_timestamp` is not a
    /// valid RFC 3339 instant (a trailing `Z` means UTC).
    pub fn watch_label(
        &self,
        board_id: &str,
        label_name: &str,
        since_timestamp: Option<&str>,
    ) -> Result<WatchResult> {
        let since = since_timestamp.map(parse_instant).transpose()?;

        let cards = self.list_cards(board_id)?;
        let mut cards = filter_by_label(cards, label_name);
        if let Some(since) = since {
            cards = filter_active_since(cards, since);
        }

        Ok(WatchResult {
            found: cards.len(),
            cards,
            checked_at: Utc::now(),
        })
    }
}

/// Result of a single label poll.
///
/// Constructed fresh on every call and never stored.
#[derive(Debug, Clone, Serialize)]
pub struct WatchResult {
    /// Number of cards that matched.
    pub found: usize,
    /// Matching cards, upstream order preserved.
    pub cards: Vec<Value>,
    /// When the poll ran (UTC).
    #[serde(rename = "checkedAt")]
    pub checked_at: DateTime<Utc>,
}

/// Retains cards whose label set contains a case-insensitive name match.
fn filter_by_label(cards: Vec<Value>, label_name: &str) -> Vec<Value> {
    let needle = label_name.to_lowercase();
    cards
        .into_iter()
        .filter(|card| card_has_label(card, &needle))
        .collect()
}

/// Checks whether a card carries a label matching the lowercased needle.
///
/// Cards without a `labels` array and labels without a `name` never match.
fn card_has_label(card: &Value, needle: &str) -> bool {
    card.get("labels")
        .and_then(Value::as_array)
        .is_some_and(|labels| {
            labels.iter().any(|label| {
                label
                    .get("name")
                    .and_then(Value::as_str)
                    .is_some_and(|name| name.to_lowercase() == needle)
            })
        })
}

/// Retains cards whose `dateLastActivity` strictly exceeds `since`.
///
/// Cards with a missing or unparseable timestamp are dropped.
fn filter_active_since(cards: Vec<Value>, since: DateTime<FixedOffset>) -> Vec<Value> {
    cards
        .into_iter()
        .filter(|card| {
            card.get("dateLastActivity")
                .and_then(Value::as_str)
                .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
                .is_some_and(|activity| activity > since)
        })
        .collect()
}

/// Parses a caller-supplied instant.
fn parse_instant(raw: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw)
        .map_err(|e| Error::InvalidInput(format!("invalid since timestamp {raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    fn card(id: &str, labels: Value) -> Value {
        json!({ "id": id, "name": format!("Card {id}"), "labels": labels })
    }

    fn offline_client() -> TrelloClient {
        // Connection-refused base URL; only used for calls that must fail
        // before reaching the network.
        TrelloClient::new(TrelloConfig::new("k", "t").with_base_url("http://127.0.0.1:1"))
    }

    #[test_case("urgent"; "exact match")]
    #[test_case("URGENT"; "uppercase query")]
    #[test_case("Urgent"; "mixed case query")]
    fn test_filter_by_label_is_case_insensitive(query: &str) {
        let cards = vec![
            card("c1", json!([{ "name": "urgent" }])),
            card("c2", json!([{ "name": "doing" }])),
            card("c3", json!([{ "name": "urgent" }])),
        ];

        let filtered = filter_by_label(cards, query);

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0]["id"], "c1");
        assert_eq!(filtered[1]["id"], "c3");
    }

    #[test]
    fn test_filter_by_label_ignores_malformed_cards() {
        let cards = vec![
            json!({ "id": "no-labels" }),
            card("nameless", json!([{ "color": "red" }])),
            card("match", json!([{ "name": "doing" }])),
        ];

        let filtered = filter_by_label(cards, "doing");

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0]["id"], "match");
    }

    #[test]
    fn test_filter_by_label_no_match() {
        let cards = vec![card("c1", json!([{ "name": "urgent" }]))];
        assert!(filter_by_label(cards, "done").is_empty());
    }

    #[test]
    fn test_filter_active_since_strictly_after() {
        let since = parse_instant("2025-06-01T00:00:00Z").unwrap();
        let cards = vec![
            json!({ "id": "old", "dateLastActivity": "2025-05-31T23:59:59Z" }),
            json!({ "id": "boundary", "dateLastActivity": "2025-06-01T00:00:00Z" }),
            json!({ "id": "new", "dateLastActivity": "2025-06-01T00:00:01Z" }),
        ];

        let filtered = filter_active_since(cards, since);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0]["id"], "new");
    }

    #[test]
    fn test_filter_active_since_drops_missing_timestamps() {
        let since = parse_instant("2025-06-01T00:00:00Z").unwrap();
        let cards = vec![
            json!({ "id": "no-activity" }),
            json!({ "id": "garbage", "dateLastActivity": "yesterday" }),
        ];

        assert!(filter_active_since(cards, since).is_empty());
    }

    #[test]
    fn test_filter_active_since_honors_offsets() {
        // 10:00+02:00 is 08:00Z; a card at 09:00Z is after it.
        let since = parse_instant("2025-06-01T10:00:00+02:00").unwrap();
        let cards = vec![json!({ "id": "c1", "dateLastActivity": "2025-06-01T09:00:00Z" })];

        assert_eq!(filter_active_since(cards, since).len(), 1);
    }

    #[test]
    fn test_parse_instant_accepts_trailing_z() {
        let parsed = parse_instant("2025-06-01T12:30:00Z").unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_parse_instant_rejects_garbage() {
        let err = parse_instant("not-a-timestamp").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(err.to_string().contains("not-a-timestamp"));
    }

    #[test]
    fn test_update_card_requires_a_field() {
        let client = offline_client();
        let err = client.update_card("card123", None, None).unwrap_err();

        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(err.to_string().contains("name"));
        assert!(err.to_string().contains("desc"));
    }

    #[test]
    fn test_watch_label_rejects_bad_since_before_fetching() {
        // The base URL is unreachable, so an Api/Transport error here would
        // mean the board was fetched before the timestamp was validated.
        let client = offline_client();
        let err = client
            .watch_label("board123", "urgent", Some("not-a-timestamp"))
            .unwrap_err();

        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_empty_desc_counts_as_supplied() {
        // Clearing a description is a valid partial update; the request is
        // attempted (and fails only because the endpoint is unreachable).
        let client = offline_client();
        let err = client.update_card("card123", None, Some("")).unwrap_err();

        assert!(matches!(err, Error::Transport { .. }));
    }

    #[test]
    fn test_watch_result_serializes_camel_case() {
        let result = WatchResult {
            found: 1,
            cards: vec![json!({ "id": "c1" })],
            checked_at: Utc::now(),
        };

        let serialized = serde_json::to_value(&result).unwrap();
        assert_eq!(serialized["found"], 1);
        assert!(serialized["checkedAt"].is_string());
        let raw = serialized["checkedAt"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(raw).is_ok());
    }
}
