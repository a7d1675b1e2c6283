//! Message operations: send, upload, edit, delete, fetch, react.

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::ApiError;
use crate::params;
use crate::response::{ApiResponse, NoData};
use crate::types::{AttachedMessage, PropagateMode, TopicVisibilityPolicy};

/// Where a message goes. The two destination kinds take mutually exclusive
/// parameter sets, so they are one tagged sum rather than a bag of options.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Destination {
    /// A channel message: channel by ID or name, plus a topic.
    Stream { to: StreamTarget, topic: String },
    /// A direct message to one or more users.
    Direct { to: Recipients },
}

/// A channel addressed by ID or by name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StreamTarget {
    Id(i64),
    Name(String),
}

/// Direct-message recipients, as user IDs or email addresses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Recipients {
    UserIds(Vec<i64>),
    Emails(Vec<String>),
}

/// Binding to a client-side event queue. `local_id` must not be sent
/// without `queue_id`, so the two travel together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueueBinding {
    pub queue_id: String,
    pub local_id: String,
}

/// Parameters for sending a message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendMessageParams {
    #[serde(flatten)]
    pub destination: Destination,
    pub content: String,
    /// Whether the sender sees the message as read. When unset the server
    /// applies a heuristic based on the client name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_by_sender: Option<bool>,
    #[serde(flatten)]
    pub queue: Option<QueueBinding>,
}

impl SendMessageParams {
    /// Channel message with no optional fields set.
    pub fn stream(to: StreamTarget, topic: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            destination: Destination::Stream {
                to,
                topic: topic.into(),
            },
            content: content.into(),
            read_by_sender: None,
            queue: None,
        }
    }

    /// Direct message with no optional fields set.
    pub fn direct(to: Recipients, content: impl Into<String>) -> Self {
        Self {
            destination: Destination::Direct { to },
            content: content.into(),
            read_by_sender: None,
            queue: None,
        }
    }
}

/// Success payload of the send-message operation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SentMessage {
    /// ID of the newly created message.
    pub id: i64,
    /// Set when sending triggered an automatic topic visibility change.
    #[serde(default)]
    pub automatic_new_visibility_policy: Option<TopicVisibilityPolicy>,
}

/// Success payload of the file upload operation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadedFile {
    /// Legacy path field, superseded by `url`.
    pub uri: String,
    pub url: String,
    pub filename: String,
}

/// The mutually exclusive part of a message edit: change the content, or
/// move the message to another channel — never both in one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EditMessageChange {
    Content { content: String },
    Move { stream_id: i64 },
}

/// Parameters for editing a message. A bare `Default` edit (everything
/// unset) is legal wire-wise but rejected remotely.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct EditMessageParams {
    #[serde(flatten)]
    pub change: Option<EditMessageChange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// Which messages a topic move applies to. Content-only edits must
    /// leave this unset or `ChangeOne`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub propagate_mode: Option<PropagateMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_notification_to_old_thread: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_notification_to_new_thread: Option<bool>,
    /// SHA-256 of the expected previous content; the server rejects the
    /// edit if the stored content does not match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_content_sha256: Option<String>,
}

/// An upload whose last reference was removed by a message edit.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DetachedUpload {
    pub id: i64,
    pub name: String,
    pub path_id: String,
    pub size: i64,
    pub create_time: i64,
    pub messages: Vec<AttachedMessage>,
}

/// Success payload of the edit-message operation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EditedMessage {
    #[serde(default)]
    pub detached_uploads: Option<Vec<DetachedUpload>>,
}

/// One filter term of a narrow expression. The operand shape depends on
/// the operator and is opaque to this client beyond serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Narrow {
    pub operator: String,
    pub operand: NarrowOperand,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negated: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NarrowOperand {
    Id(i64),
    Text(String),
    UserIds(Vec<i64>),
}

/// Pagination anchor for fetching messages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Anchor {
    MessageId(i64),
    Special(AnchorSpecial),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorSpecial {
    Newest,
    Oldest,
    FirstUnread,
}

/// Parameters for fetching a window of message history.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GetMessagesParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Anchor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_anchor: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_before: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_after: Option<u32>,
    /// Filter terms; serialized as a JSON array per the wire convention.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrow: Option<Vec<Narrow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_gravatar: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_markdown: Option<bool>,
}

/// A reaction attached to a message.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Reaction {
    pub emoji_name: String,
    pub emoji_code: String,
    pub reaction_type: String,
    pub user_id: i64,
}

/// Recipient of a direct message as echoed in fetched messages.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecipientUser {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub is_mirror_dummy: bool,
}

/// `display_recipient`: a channel name for channel messages, the user list
/// for direct messages.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DisplayRecipient {
    Stream(String),
    Users(Vec<RecipientUser>),
}

/// One message as returned by the history endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Message {
    pub id: i64,
    #[serde(rename = "type")]
    pub message_type: String,
    pub content: String,
    pub content_type: String,
    pub sender_id: i64,
    pub sender_email: String,
    pub sender_full_name: String,
    #[serde(default)]
    pub stream_id: Option<i64>,
    /// Topic name; empty for direct messages.
    pub subject: String,
    pub timestamp: i64,
    pub client: String,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
    pub recipient_id: i64,
    pub display_recipient: DisplayRecipient,
    #[serde(default)]
    pub last_edit_timestamp: Option<i64>,
    #[serde(default)]
    pub is_me_message: bool,
}

/// Success payload of the message history operation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageBatch {
    pub messages: Vec<Message>,
    pub found_anchor: bool,
    pub found_newest: bool,
    pub found_oldest: bool,
    pub history_limited: bool,
    #[serde(default)]
    pub anchor: Option<i64>,
}

/// Parameters identifying an emoji for reaction operations.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ReactionParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reaction_type: Option<String>,
}

impl ReactionParams {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            emoji_name: Some(name.into()),
            ..Self::default()
        }
    }
}

impl Client {
    /// Send a message to a channel or directly to users.
    pub fn send_message(
        &self,
        params: &SendMessageParams,
    ) -> Result<ApiResponse<SentMessage>, ApiError> {
        let body = params::encode_pairs(params)?;
        self.dispatch(&self.build_post_form("/messages", body))
    }

    /// Upload a file; the returned URL can be embedded in message content.
    pub fn upload_file(
        &self,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<ApiResponse<UploadedFile>, ApiError> {
        self.dispatch(&self.build_post_multipart("/user_uploads", file_name, content))
    }

    /// Edit a message's content or move it to another channel/topic.
    pub fn edit_message(
        &self,
        message_id: i64,
        params: &EditMessageParams,
    ) -> Result<ApiResponse<EditedMessage>, ApiError> {
        let body = params::encode_pairs(params)?;
        self.dispatch(&self.build_patch_form(&format!("/messages/{message_id}"), body))
    }

    /// Delete a message.
    pub fn delete_message(&self, message_id: i64) -> Result<ApiResponse<NoData>, ApiError> {
        self.dispatch(&self.build_delete(&format!("/messages/{message_id}"), Vec::new(), None))
    }

    /// Fetch a window of message history around an anchor, optionally
    /// filtered by a narrow expression.
    pub fn get_messages(
        &self,
        params: &GetMessagesParams,
    ) -> Result<ApiResponse<MessageBatch>, ApiError> {
        let query = params::encode_pairs(params)?;
        self.dispatch(&self.build_get("/messages", query))
    }

    /// Add an emoji reaction to a message.
    pub fn add_reaction(
        &self,
        message_id: i64,
        params: &ReactionParams,
    ) -> Result<ApiResponse<NoData>, ApiError> {
        let body = params::encode_pairs(params)?;
        self.dispatch(&self.build_post_form(&format!("/messages/{message_id}/reactions"), body))
    }

    /// Remove an emoji reaction. `None` issues a bodyless request — the
    /// server distinguishes that from an empty parameter object, so the
    /// two cases must not be conflated.
    pub fn remove_reaction(
        &self,
        message_id: i64,
        params: Option<&ReactionParams>,
    ) -> Result<ApiResponse<NoData>, ApiError> {
        let body = params.map(params::encode_pairs).transpose()?;
        self.dispatch(&self.build_delete(
            &format!("/messages/{message_id}/reactions"),
            Vec::new(),
            body,
        ))
    }
}
