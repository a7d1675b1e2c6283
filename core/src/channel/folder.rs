//! Channel folders.

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::ApiError;
use crate::params;
use crate::response::ApiResponse;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateChannelFolderParams {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedChannelFolder {
    pub channel_folder_id: i64,
}

impl Client {
    /// Create a channel folder.
    pub fn create_channel_folder(
        &self,
        params: &CreateChannelFolderParams,
    ) -> Result<ApiResponse<CreatedChannelFolder>, ApiError> {
        let body = params::encode_pairs(params)?;
        self.dispatch(&self.build_post_form("/channel_folders/create", body))
    }
}
