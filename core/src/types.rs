//! Schema values shared across resources.
//!
//! Numeric wire enums (visibility policies, roles, post policies) carry
//! their protocol integer explicitly; a small macro supplies the serde
//! impls so the integer form is the only thing on the wire.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

macro_rules! numeric_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $( $(#[$vmeta:meta])* $variant:ident = $value:literal ),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $value, )+
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_u64(*self as u64)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = u64::deserialize(deserializer)?;
                match value {
                    $( $value => Ok($name::$variant), )+
                    other => Err(de::Error::custom(format!(
                        concat!("invalid ", stringify!($name), " value: {}"),
                        other
                    ))),
                }
            }
        }
    };
}

numeric_enum! {
    /// Per-user visibility policy for a topic. `None` removes a previously
    /// set policy.
    TopicVisibilityPolicy {
        None = 0,
        Muted = 1,
        Unmuted = 2,
        Followed = 3,
    }
}

numeric_enum! {
    /// Who may post to a channel. Deprecated server-side in favor of
    /// `can_send_message_group`, but still present in responses.
    StreamPostPolicy {
        Anyone = 1,
        Admins = 2,
        FullMembers = 3,
        Moderators = 4,
    }
}

numeric_enum! {
    /// Organization-level role of a user.
    UserRole {
        Owner = 100,
        Admin = 200,
        Moderator = 300,
        Member = 400,
        Guest = 600,
    }
}

numeric_enum! {
    /// Kind of bot account.
    BotType {
        Generic = 1,
        IncomingWebhook = 2,
        OutgoingWebhook = 3,
        Embedded = 4,
    }
}

/// A group-setting value: either a user-group ID or an anonymous group
/// listing members and subgroups directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupSetting {
    Group(i64),
    Members {
        direct_members: Vec<i64>,
        direct_subgroups: Vec<i64>,
    },
}

/// A group-setting change: the new value, optionally guarded by the
/// expected old value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSettingUpdate {
    pub new: GroupSetting,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old: Option<GroupSetting>,
}

/// Channel-level policy for empty-name topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicsPolicy {
    Inherit,
    AllowEmptyTopic,
    DisableEmptyTopic,
    EmptyTopicOnly,
}

/// Channel-level message retention policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RetentionPolicy {
    /// Retain for this many days.
    Days(i64),
    Preset(RetentionPreset),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetentionPreset {
    /// Inherit the organization-level policy.
    RealmDefault,
    /// Never delete by retention policy.
    Unlimited,
}

/// Reference from an uploaded file to a message that cites it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AttachedMessage {
    /// When the message was sent, as a UNIX timestamp.
    pub date_sent: i64,
    pub id: i64,
}

/// Which messages a topic edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropagateMode {
    ChangeOne,
    ChangeLater,
    ChangeAll,
}
