//! Custom navigation views in the left sidebar.

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::ApiError;
use crate::params;
use crate::response::{ApiResponse, NoData};

/// A sidebar view, identified by its URL fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationView {
    pub fragment: String,
    pub is_pinned: bool,
    /// Display name; absent for built-in views.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NavigationViewList {
    pub navigation_views: Vec<NavigationView>,
}

/// One edit to a view: either its pinned state or its name changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EditNavigationViewParams {
    Pinned { is_pinned: bool },
    Name { name: String },
}

impl Client {
    /// List the current user's navigation views.
    pub fn get_navigation_views(&self) -> Result<ApiResponse<NavigationViewList>, ApiError> {
        self.dispatch(&self.build_get("/navigation_views", Vec::new()))
    }

    /// Add a navigation view.
    pub fn add_navigation_view(
        &self,
        view: &NavigationView,
    ) -> Result<ApiResponse<NoData>, ApiError> {
        let body = params::encode_pairs(view)?;
        self.dispatch(&self.build_post_form("/navigation_views", body))
    }

    /// Change a navigation view's pinned state or name. The fragment is the
    /// view's identifier and may contain `/`, so it is escaped in the path.
    pub fn edit_navigation_view(
        &self,
        fragment: &str,
        params: &EditNavigationViewParams,
    ) -> Result<ApiResponse<NoData>, ApiError> {
        let body = params::encode_pairs(params)?;
        let path = format!("/navigation_views/{}", urlencoding::encode(fragment));
        self.dispatch(&self.build_patch_form(&path, body))
    }

    /// Remove a navigation view.
    pub fn remove_navigation_view(&self, fragment: &str) -> Result<ApiResponse<NoData>, ApiError> {
        let path = format!("/navigation_views/{}", urlencoding::encode(fragment));
        self.dispatch(&self.build_delete(&path, Vec::new(), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::encode_pairs;

    #[test]
    fn add_serializes_pinned_flag_as_literal_text() {
        let pairs = encode_pairs(&NavigationView {
            fragment: "narrow/is/starred".to_string(),
            is_pinned: true,
            name: None,
        })
        .unwrap();
        assert_eq!(
            pairs,
            vec![
                ("fragment".to_string(), "narrow/is/starred".to_string()),
                ("is_pinned".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn fragment_is_path_escaped() {
        assert_eq!(
            urlencoding::encode("narrow/is/starred"),
            "narrow%2Fis%2Fstarred"
        );
    }
}
