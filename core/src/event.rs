//! The real-time event queue endpoints.
//!
//! The queue itself lives server-side; these are plain single-request
//! wrappers like every other operation. Polling with `dont_block: false`
//! long-polls for the duration of one request and nothing more.

use serde::{Deserialize, Serialize};
use serde_json::Map;

use crate::client::Client;
use crate::error::ApiError;
use crate::params;
use crate::response::{ApiResponse, NoData};

/// Parameters for registering an event queue.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RegisterQueueParams {
    /// Event types to deliver; unset means all types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_public_streams: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_markdown: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_gravatar: Option<bool>,
    /// Narrow restricting which message events are delivered, as
    /// `[operator, operand]` pairs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrow: Option<Vec<[String; 2]>>,
}

/// Success payload of queue registration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegisteredQueue {
    pub queue_id: String,
    /// `-1` until the first event arrives.
    pub last_event_id: i64,
}

/// Parameters for polling a registered queue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetEventsParams {
    pub queue_id: String,
    /// Highest event ID already processed; the server returns newer ones.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_event_id: Option<i64>,
    /// When true the request returns immediately instead of long-polling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dont_block: Option<bool>,
}

/// One event from the queue. Payloads vary per event type and are kept as
/// raw JSON for the caller to interpret.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Event {
    pub id: i64,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(flatten)]
    pub data: Map<String, serde_json::Value>,
}

/// Success payload of an event poll.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EventBatch {
    pub events: Vec<Event>,
}

impl Client {
    /// Register a new event queue and return its ID.
    pub fn register_event_queue(
        &self,
        params: &RegisterQueueParams,
    ) -> Result<ApiResponse<RegisteredQueue>, ApiError> {
        let body = params::encode_pairs(params)?;
        self.dispatch(&self.build_post_form("/register", body))
    }

    /// Poll a queue for events past `last_event_id`.
    pub fn get_events(
        &self,
        params: &GetEventsParams,
    ) -> Result<ApiResponse<EventBatch>, ApiError> {
        let query = params::encode_pairs(params)?;
        self.dispatch(&self.build_get("/events", query))
    }

    /// Delete a queue. Long-abandoned queues are garbage-collected
    /// server-side; deleting explicitly is still polite.
    pub fn delete_event_queue(&self, queue_id: &str) -> Result<ApiResponse<NoData>, ApiError> {
        let query = vec![("queue_id".to_string(), queue_id.to_string())];
        self.dispatch(&self.build_delete("/events", query, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::encode_pairs;

    #[test]
    fn event_types_encode_as_json_array() {
        let params = RegisterQueueParams {
            event_types: Some(vec!["message".to_string(), "reaction".to_string()]),
            all_public_streams: Some(true),
            ..Default::default()
        };
        let pairs = encode_pairs(&params).unwrap();
        assert_eq!(
            pairs,
            vec![
                (
                    "event_types".to_string(),
                    r#"["message","reaction"]"#.to_string()
                ),
                ("all_public_streams".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn poll_params_encode_queue_id_and_cursor() {
        let params = GetEventsParams {
            queue_id: "1517975029:0".to_string(),
            last_event_id: Some(-1),
            dont_block: Some(true),
        };
        let pairs = encode_pairs(&params).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("queue_id".to_string(), "1517975029:0".to_string()),
                ("last_event_id".to_string(), "-1".to_string()),
                ("dont_block".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn event_keeps_unknown_fields_as_raw_json() {
        let batch: EventBatch = serde_json::from_str(
            r#"{"events":[{"id":0,"type":"message","message":{"id":12},"flags":[]}]}"#,
        )
        .unwrap();
        assert_eq!(batch.events[0].event_type, "message");
        assert_eq!(batch.events[0].data["message"]["id"], 12);
    }
}
