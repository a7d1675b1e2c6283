//! Message drafts.

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::ApiError;
use crate::params;
use crate::response::{ApiResponse, NoData};

/// Destination kind of a draft. The empty kind is a draft not yet
/// addressed to anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftKind {
    #[serde(rename = "")]
    Unaddressed,
    #[serde(rename = "stream")]
    Stream,
    #[serde(rename = "private")]
    Private,
}

/// The editable body of a draft. `to` holds a channel ID for channel
/// drafts and user IDs for direct ones; `topic` is empty for direct drafts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftContent {
    #[serde(rename = "type")]
    pub kind: DraftKind,
    pub to: Vec<i64>,
    pub topic: String,
    pub content: String,
}

/// A stored draft.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Draft {
    pub id: i64,
    #[serde(flatten)]
    pub content: DraftContent,
    /// Last modification time, as a UNIX timestamp.
    pub timestamp: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DraftList {
    pub count: i64,
    pub drafts: Vec<Draft>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct CreateDraftsParams<'a> {
    drafts: &'a [DraftContent],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct EditDraftParams<'a> {
    draft: &'a DraftContent,
}

/// IDs of newly created drafts, in request order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedDrafts {
    pub ids: Vec<i64>,
}

impl Client {
    /// List all drafts of the current user.
    pub fn get_drafts(&self) -> Result<ApiResponse<DraftList>, ApiError> {
        self.dispatch(&self.build_get("/drafts", Vec::new()))
    }

    /// Create one or more drafts in a single request.
    pub fn create_drafts(
        &self,
        drafts: &[DraftContent],
    ) -> Result<ApiResponse<CreatedDrafts>, ApiError> {
        let body = params::encode_pairs(&CreateDraftsParams { drafts })?;
        self.dispatch(&self.build_post_form("/drafts", body))
    }

    /// Replace a draft's content.
    pub fn edit_draft(
        &self,
        draft_id: i64,
        draft: &DraftContent,
    ) -> Result<ApiResponse<NoData>, ApiError> {
        let body = params::encode_pairs(&EditDraftParams { draft })?;
        self.dispatch(&self.build_patch_form(&format!("/drafts/{draft_id}"), body))
    }

    /// Delete a draft.
    pub fn delete_draft(&self, draft_id: i64) -> Result<ApiResponse<NoData>, ApiError> {
        self.dispatch(&self.build_delete(&format!("/drafts/{draft_id}"), Vec::new(), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::encode_pairs;

    fn sample() -> DraftContent {
        DraftContent {
            kind: DraftKind::Stream,
            to: vec![42],
            topic: "standup".to_string(),
            content: "notes".to_string(),
        }
    }

    #[test]
    fn drafts_list_is_embedded_as_one_json_value() {
        let drafts = [sample()];
        let pairs = encode_pairs(&CreateDraftsParams { drafts: &drafts }).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0, "drafts");
        assert_eq!(
            pairs[0].1,
            r#"[{"type":"stream","to":[42],"topic":"standup","content":"notes"}]"#
        );
    }

    #[test]
    fn unaddressed_kind_serializes_as_empty_string() {
        let mut draft = sample();
        draft.kind = DraftKind::Unaddressed;
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["type"], "");
    }

    #[test]
    fn stored_draft_flattens_content_fields() {
        let draft: Draft = serde_json::from_str(
            r#"{"id":7,"type":"private","to":[3,4],"topic":"","content":"hi","timestamp":1754000000.5}"#,
        )
        .unwrap();
        assert_eq!(draft.id, 7);
        assert_eq!(draft.content.kind, DraftKind::Private);
        assert_eq!(draft.content.to, vec![3, 4]);
    }
}
