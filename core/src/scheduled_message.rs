//! Messages scheduled for later delivery.

use serde::Deserialize;

use crate::client::Client;
use crate::error::ApiError;
use crate::response::ApiResponse;

/// Destination of a scheduled message, discriminated on `type`: a single
/// channel ID with a topic, or a list of user IDs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScheduledDestination {
    Stream { to: i64, topic: String },
    Private { to: Vec<i64> },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScheduledMessage {
    pub scheduled_message_id: i64,
    #[serde(flatten)]
    pub destination: ScheduledDestination,
    pub content: String,
    pub rendered_content: String,
    pub scheduled_delivery_timestamp: i64,
    /// True when a past delivery attempt failed.
    pub failed: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScheduledMessageList {
    pub scheduled_messages: Vec<ScheduledMessage>,
}

impl Client {
    /// List the current user's undelivered scheduled messages.
    pub fn get_scheduled_messages(&self) -> Result<ApiResponse<ScheduledMessageList>, ApiError> {
        self.dispatch(&self.build_get("/scheduled_messages", Vec::new()))
    }
}
