//! Files uploaded by the current user.

use serde::Deserialize;

use crate::client::Client;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::types::AttachedMessage;

/// One uploaded file and the messages referencing it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Attachment {
    pub id: i64,
    pub name: String,
    pub path_id: String,
    pub size: i64,
    pub create_time: i64,
    pub messages: Vec<AttachedMessage>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AttachmentList {
    pub attachments: Vec<Attachment>,
    /// Total bytes uploaded by all users in the organization.
    pub upload_space_used: i64,
}

impl Client {
    /// List all files the current user has uploaded.
    pub fn get_attachments(&self) -> Result<ApiResponse<AttachmentList>, ApiError> {
        self.dispatch(&self.build_get("/attachments", Vec::new()))
    }
}
