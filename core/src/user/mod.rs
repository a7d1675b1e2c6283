//! User lookup and related per-user resources.

pub mod attachment;
pub mod status;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::ApiError;
use crate::params;
use crate::response::ApiResponse;
use crate::types::{BotType, UserRole};

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GetUserParams {
    /// Whether the client can compute gravatar URLs itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_gravatar: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_custom_profile_fields: Option<bool>,
}

/// Value of one custom profile field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProfileFieldValue {
    pub value: String,
    /// Present only for fields that support markdown.
    #[serde(default)]
    pub rendered_value: Option<String>,
}

/// A user or bot account.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub user_id: i64,
    /// `None` when the acting user cannot see the real address.
    pub delivery_email: Option<String>,
    pub email: String,
    pub full_name: String,
    pub date_joined: String,
    pub is_active: bool,
    pub is_owner: bool,
    pub is_admin: bool,
    pub is_guest: bool,
    pub is_bot: bool,
    #[serde(default)]
    pub bot_type: Option<BotType>,
    #[serde(default)]
    pub bot_owner_id: Option<i64>,
    pub role: UserRole,
    pub timezone: String,
    pub avatar_url: Option<String>,
    pub avatar_version: i64,
    pub is_imported_stub: bool,
    /// Keyed by custom field ID; absent for bots.
    #[serde(default)]
    pub profile_data: Option<HashMap<String, ProfileFieldValue>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserById {
    pub user: User,
}

impl Client {
    /// Fetch one user by ID.
    pub fn get_user(
        &self,
        user_id: i64,
        params: &GetUserParams,
    ) -> Result<ApiResponse<UserById>, ApiError> {
        let query = params::encode_pairs(params)?;
        self.dispatch(&self.build_get(&format!("/users/{user_id}"), query))
    }
}
