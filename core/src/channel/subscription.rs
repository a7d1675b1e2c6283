//! The current user's channel subscriptions.

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::ApiError;
use crate::params;
use crate::response::ApiResponse;
use crate::types::{GroupSetting, StreamPostPolicy, TopicsPolicy};

/// How much subscriber detail to include in the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriberDetail {
    /// Full subscriber IDs in `subscribers`.
    True,
    False,
    /// A sample of subscriber IDs in `partial_subscribers`.
    Partial,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GetSubscriptionsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_subscribers: Option<SubscriberDetail>,
}

/// A subscribed channel: the channel schema plus the user's personal
/// notification and display settings for it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Subscription {
    pub stream_id: i64,
    pub name: String,
    pub description: String,
    pub rendered_description: String,
    pub date_created: i64,
    pub creator_id: Option<i64>,
    pub invite_only: bool,
    /// Present only with `include_subscribers: True`.
    #[serde(default)]
    pub subscribers: Option<Vec<i64>>,
    /// Present only with `include_subscribers: Partial`.
    #[serde(default)]
    pub partial_subscribers: Option<Vec<i64>>,
    /// `None` falls back to the user-level default, here and for the other
    /// notification flags.
    pub desktop_notifications: Option<bool>,
    pub email_notifications: Option<bool>,
    pub wildcard_mentions_notify: Option<bool>,
    pub push_notifications: Option<bool>,
    pub audible_notifications: Option<bool>,
    pub pin_to_top: bool,
    pub is_muted: bool,
    /// Inverted legacy alias of `is_muted`.
    pub in_home_view: bool,
    pub is_announcement_only: bool,
    pub is_web_public: bool,
    /// The user's personal color for the channel.
    pub color: String,
    pub stream_post_policy: StreamPostPolicy,
    pub message_retention_days: Option<i64>,
    pub history_public_to_subscribers: bool,
    pub first_message_id: Option<i64>,
    pub folder_id: Option<i64>,
    pub topics_policy: TopicsPolicy,
    pub is_recently_active: bool,
    pub stream_weekly_traffic: Option<i64>,
    pub can_add_subscribers_group: GroupSetting,
    pub can_remove_subscribers_group: GroupSetting,
    pub can_administer_channel_group: GroupSetting,
    pub can_delete_any_message_group: GroupSetting,
    pub can_delete_own_message_group: GroupSetting,
    pub can_move_messages_out_of_channel_group: GroupSetting,
    pub can_move_messages_within_channel_group: GroupSetting,
    pub can_send_message_group: GroupSetting,
    pub can_subscribe_group: GroupSetting,
    pub can_resolve_topics_group: GroupSetting,
    pub can_create_topic_group: GroupSetting,
    pub is_archived: bool,
    pub subscriber_count: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubscriptionList {
    pub subscriptions: Vec<Subscription>,
}

impl Client {
    /// List channels the current user is subscribed to.
    pub fn get_subscriptions(
        &self,
        params: &GetSubscriptionsParams,
    ) -> Result<ApiResponse<SubscriptionList>, ApiError> {
        let query = params::encode_pairs(params)?;
        self.dispatch(&self.build_get("/users/me/subscriptions", query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::encode_pairs;

    #[test]
    fn subscriber_detail_uses_lowercase_wire_values() {
        let pairs = encode_pairs(&GetSubscriptionsParams {
            include_subscribers: Some(SubscriberDetail::Partial),
        })
        .unwrap();
        assert_eq!(
            pairs,
            vec![("include_subscribers".to_string(), "partial".to_string())]
        );
    }

    #[test]
    fn unset_detail_sends_nothing() {
        let pairs = encode_pairs(&GetSubscriptionsParams::default()).unwrap();
        assert!(pairs.is_empty());
    }
}
