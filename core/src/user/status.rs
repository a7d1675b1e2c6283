//! User status messages.

use serde::Deserialize;

use crate::client::Client;
use crate::error::ApiError;
use crate::response::ApiResponse;

/// A user's current status. All fields are absent when no status is set.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct UserStatus {
    /// Deprecated away marker; presence-based availability superseded it.
    #[serde(default)]
    pub away: Option<bool>,
    #[serde(default)]
    pub status_text: Option<String>,
    #[serde(default)]
    pub emoji_name: Option<String>,
    #[serde(default)]
    pub emoji_code: Option<String>,
    #[serde(default)]
    pub reaction_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserStatusById {
    pub status: UserStatus,
}

impl Client {
    /// Fetch a user's status message.
    pub fn get_user_status(&self, user_id: i64) -> Result<ApiResponse<UserStatusById>, ApiError> {
        self.dispatch(&self.build_get(&format!("/users/{user_id}/status"), Vec::new()))
    }
}
