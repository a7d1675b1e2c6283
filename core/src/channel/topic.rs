//! Topics within a channel.

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::ApiError;
use crate::params;
use crate::response::ApiResponse;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GetChannelTopicsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_empty_topic_name: Option<bool>,
}

/// One topic with the highest message ID observed in it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TopicEntry {
    pub max_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TopicList {
    pub topics: Vec<TopicEntry>,
}

impl Client {
    /// List recent topics in a channel.
    pub fn get_channel_topics(
        &self,
        stream_id: i64,
        params: &GetChannelTopicsParams,
    ) -> Result<ApiResponse<TopicList>, ApiError> {
        let query = params::encode_pairs(params)?;
        self.dispatch(&self.build_get(&format!("/users/me/{stream_id}/topics"), query))
    }
}
