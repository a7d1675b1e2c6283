//! Channel operations and schema.

pub mod folder;
pub mod subscription;
pub mod topic;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::client::Client;
use crate::error::ApiError;
use crate::params;
use crate::response::{ApiResponse, NoData};
use crate::types::{GroupSetting, GroupSettingUpdate, RetentionPolicy, StreamPostPolicy, TopicsPolicy};

/// Filters for listing channels. Every flag has a server-side default;
/// unset flags are simply not sent.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GetChannelsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_web_public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_subscribed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_archived: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_all: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_default: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_owner_subscribed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_can_access_content: Option<bool>,
    /// Deprecated server-side in favor of `include_all` + `exclude_archived`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_all_active: Option<bool>,
}

/// A channel as returned by the listing and lookup endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Channel {
    pub stream_id: i64,
    pub name: String,
    pub is_archived: bool,
    pub description: String,
    pub rendered_description: String,
    pub date_created: i64,
    /// Unset for channels too old to have recorded a creator.
    pub creator_id: Option<i64>,
    pub invite_only: bool,
    pub is_web_public: bool,
    pub stream_post_policy: StreamPostPolicy,
    /// `None` inherits the organization policy; `-1` means never expire.
    pub message_retention_days: Option<i64>,
    pub history_public_to_subscribers: bool,
    pub topics_policy: TopicsPolicy,
    pub first_message_id: Option<i64>,
    pub folder_id: Option<i64>,
    pub is_recently_active: bool,
    pub is_announcement_only: bool,
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
    pub subscriber_count: i64,
    pub stream_weekly_traffic: Option<i64>,
    /// Present only when the listing was requested with `include_default`.
    #[serde(default)]
    pub is_default: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChannelList {
    pub streams: Vec<Channel>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChannelById {
    pub stream: Channel,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChannelId {
    pub stream_id: i64,
}

/// Parameters for creating a channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateChannelParams {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// User IDs subscribed to the channel at creation.
    pub subscribers: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub announce: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_web_public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default_stream: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics_policy: Option<TopicsPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_public_to_subscribers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_retention_days: Option<RetentionPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_add_subscribers_group: Option<GroupSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_remove_subscribers_group: Option<GroupSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_administer_channel_group: Option<GroupSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_delete_any_message_group: Option<GroupSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_delete_own_message_group: Option<GroupSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_move_messages_out_of_channel_group: Option<GroupSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_move_messages_within_channel_group: Option<GroupSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_send_message_group: Option<GroupSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_subscribe_group: Option<GroupSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_resolve_topics_group: Option<GroupSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_create_topic_group: Option<GroupSetting>,
}

impl CreateChannelParams {
    /// Channel with the given name and initial subscribers; every policy
    /// field left to its server default.
    pub fn new(name: impl Into<String>, subscribers: Vec<i64>) -> Self {
        Self {
            name: name.into(),
            description: None,
            subscribers,
            announce: None,
            invite_only: None,
            is_web_public: None,
            is_default_stream: None,
            folder_id: None,
            topics_policy: None,
            history_public_to_subscribers: None,
            message_retention_days: None,
            can_add_subscribers_group: None,
            can_remove_subscribers_group: None,
            can_administer_channel_group: None,
            can_delete_any_message_group: None,
            can_delete_own_message_group: None,
            can_move_messages_out_of_channel_group: None,
            can_move_messages_within_channel_group: None,
            can_send_message_group: None,
            can_subscribe_group: None,
            can_resolve_topics_group: None,
            can_create_topic_group: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedChannel {
    pub id: i64,
}

/// One channel update per request: the remote endpoint accepts exactly one
/// mutually exclusive change, so the parameter type is a sum, not a bag of
/// options.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UpdateChannelParams {
    Description { description: String },
    Rename { new_name: String },
    Privacy { is_private: bool },
    WebPublic { is_web_public: bool },
    HistoryPublicToSubscribers { history_public_to_subscribers: bool },
    DefaultChannel { is_default_stream: bool },
    Retention { message_retention_days: RetentionPolicy },
    /// Only `false` is accepted here; archiving goes through
    /// [`Client::archive_channel`].
    Unarchive { is_archived: bool },
    Folder { folder_id: i64 },
    TopicsPolicy { topics_policy: TopicsPolicy },
    Permission(PermissionUpdate),
}

/// Which permission group of a channel an update targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionSetting {
    AddSubscribers,
    RemoveSubscribers,
    Administer,
    DeleteAnyMessage,
    DeleteOwnMessage,
    MoveMessagesOut,
    MoveMessagesWithin,
    SendMessage,
    Subscribe,
    ResolveTopics,
    CreateTopic,
}

impl PermissionSetting {
    fn key(self) -> &'static str {
        match self {
            PermissionSetting::AddSubscribers => "can_add_subscribers_group",
            PermissionSetting::RemoveSubscribers => "can_remove_subscribers_group",
            PermissionSetting::Administer => "can_administer_channel_group",
            PermissionSetting::DeleteAnyMessage => "can_delete_any_message_group",
            PermissionSetting::DeleteOwnMessage => "can_delete_own_message_group",
            PermissionSetting::MoveMessagesOut => "can_move_messages_out_of_channel_group",
            PermissionSetting::MoveMessagesWithin => "can_move_messages_within_channel_group",
            PermissionSetting::SendMessage => "can_send_message_group",
            PermissionSetting::Subscribe => "can_subscribe_group",
            PermissionSetting::ResolveTopics => "can_resolve_topics_group",
            PermissionSetting::CreateTopic => "can_create_topic_group",
        }
    }
}

/// A permission-group change. Serializes as a single-key object whose key
/// is the targeted setting, e.g. `{"can_subscribe_group": {"new": 5}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct PermissionUpdate {
    pub setting: PermissionSetting,
    pub update: GroupSettingUpdate,
}

impl Serialize for PermissionUpdate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.setting.key(), &self.update)?;
        map.end()
    }
}

impl Client {
    /// List channels visible to the current user.
    pub fn get_channels(
        &self,
        params: &GetChannelsParams,
    ) -> Result<ApiResponse<ChannelList>, ApiError> {
        let query = params::encode_pairs(params)?;
        self.dispatch(&self.build_get("/streams", query))
    }

    /// Fetch one channel by ID.
    pub fn get_channel_by_id(&self, stream_id: i64) -> Result<ApiResponse<ChannelById>, ApiError> {
        self.dispatch(&self.build_get(&format!("/streams/{stream_id}"), Vec::new()))
    }

    /// Resolve a channel name to its ID.
    pub fn get_channel_id(&self, stream: &str) -> Result<ApiResponse<ChannelId>, ApiError> {
        let query = vec![("stream".to_string(), stream.to_string())];
        self.dispatch(&self.build_get("/get_stream_id", query))
    }

    /// Create a channel.
    pub fn create_channel(
        &self,
        params: &CreateChannelParams,
    ) -> Result<ApiResponse<CreatedChannel>, ApiError> {
        let body = params::encode_pairs(params)?;
        self.dispatch(&self.build_post_form("/channels/create", body))
    }

    /// Apply one change to a channel.
    pub fn update_channel(
        &self,
        stream_id: i64,
        params: &UpdateChannelParams,
    ) -> Result<ApiResponse<NoData>, ApiError> {
        let body = params::encode_pairs(params)?;
        self.dispatch(&self.build_patch_form(&format!("/streams/{stream_id}"), body))
    }

    /// Archive a channel.
    pub fn archive_channel(&self, stream_id: i64) -> Result<ApiResponse<NoData>, ApiError> {
        self.dispatch(&self.build_delete(&format!("/streams/{stream_id}"), Vec::new(), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::encode_pairs;
    use crate::types::RetentionPreset;

    #[test]
    fn listing_filters_encode_only_set_flags() {
        let params = GetChannelsParams {
            include_web_public: Some(true),
            include_default: Some(false),
            ..Default::default()
        };
        let pairs = encode_pairs(&params).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("include_web_public".to_string(), "true".to_string()),
                ("include_default".to_string(), "false".to_string()),
            ]
        );
    }

    #[test]
    fn create_params_embed_subscribers_and_groups_as_json() {
        let mut params = CreateChannelParams::new("sandbox", vec![1, 2, 3]);
        params.invite_only = Some(true);
        params.can_subscribe_group = Some(GroupSetting::Group(14));
        let pairs = encode_pairs(&params).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("name".to_string(), "sandbox".to_string()),
                ("subscribers".to_string(), "[1,2,3]".to_string()),
                ("invite_only".to_string(), "true".to_string()),
                ("can_subscribe_group".to_string(), "14".to_string()),
            ]
        );
    }

    #[test]
    fn each_update_variant_encodes_exactly_one_key() {
        let cases: Vec<(UpdateChannelParams, (&str, &str))> = vec![
            (
                UpdateChannelParams::Description {
                    description: "docs".to_string(),
                },
                ("description", "docs"),
            ),
            (
                UpdateChannelParams::Rename {
                    new_name: "ops".to_string(),
                },
                ("new_name", "ops"),
            ),
            (
                UpdateChannelParams::Privacy { is_private: true },
                ("is_private", "true"),
            ),
            (
                UpdateChannelParams::Unarchive { is_archived: false },
                ("is_archived", "false"),
            ),
            (
                UpdateChannelParams::Retention {
                    message_retention_days: RetentionPolicy::Preset(RetentionPreset::Unlimited),
                },
                ("message_retention_days", "unlimited"),
            ),
            (
                UpdateChannelParams::Folder { folder_id: 8 },
                ("folder_id", "8"),
            ),
        ];
        for (params, (key, value)) in cases {
            let pairs = encode_pairs(&params).unwrap();
            assert_eq!(pairs, vec![(key.to_string(), value.to_string())]);
        }
    }

    #[test]
    fn permission_update_serializes_under_its_setting_key() {
        let params = UpdateChannelParams::Permission(PermissionUpdate {
            setting: PermissionSetting::Subscribe,
            update: GroupSettingUpdate {
                new: GroupSetting::Group(5),
                old: Some(GroupSetting::Members {
                    direct_members: vec![1],
                    direct_subgroups: vec![],
                }),
            },
        });
        let pairs = encode_pairs(&params).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0, "can_subscribe_group");
        assert_eq!(
            pairs[0].1,
            r#"{"new":5,"old":{"direct_members":[1],"direct_subgroups":[]}}"#
        );
    }
}
