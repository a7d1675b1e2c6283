//! Saved snippets of reusable message content.

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::ApiError;
use crate::params;
use crate::response::{ApiResponse, NoData};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Snippet {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// Creation time, as a UNIX timestamp.
    pub date_created: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SnippetList {
    pub saved_snippets: Vec<Snippet>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateSnippetParams {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedSnippet {
    pub saved_snippet_id: i64,
}

/// One edit to a snippet: either the title or the content changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EditSnippetParams {
    Title { title: String },
    Content { content: String },
}

impl Client {
    /// List the current user's saved snippets.
    pub fn get_snippets(&self) -> Result<ApiResponse<SnippetList>, ApiError> {
        self.dispatch(&self.build_get("/saved_snippets", Vec::new()))
    }

    /// Save a new snippet.
    pub fn create_snippet(
        &self,
        params: &CreateSnippetParams,
    ) -> Result<ApiResponse<CreatedSnippet>, ApiError> {
        let body = params::encode_pairs(params)?;
        self.dispatch(&self.build_post_form("/saved_snippets", body))
    }

    /// Change a snippet's title or content.
    pub fn edit_snippet(
        &self,
        snippet_id: i64,
        params: &EditSnippetParams,
    ) -> Result<ApiResponse<NoData>, ApiError> {
        let body = params::encode_pairs(params)?;
        self.dispatch(&self.build_patch_form(&format!("/saved_snippets/{snippet_id}"), body))
    }

    /// Delete a snippet.
    pub fn delete_snippet(&self, snippet_id: i64) -> Result<ApiResponse<NoData>, ApiError> {
        self.dispatch(&self.build_delete(
            &format!("/saved_snippets/{snippet_id}"),
            Vec::new(),
            None,
        ))
    }
}
