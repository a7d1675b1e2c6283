//! The credential-bound client handle.
//!
//! # Design
//! `Client` is an immutable value: a normalized base URL, the basic-auth
//! credential pair, and a ureq agent. Construction does no I/O and cannot
//! fail; bad credentials only surface when the server rejects a request.
//! Each endpoint wrapper builds one `HttpRequest` through the `build_*`
//! helpers here and hands it to [`Client::dispatch`], which performs exactly
//! one round trip and parses the response envelope. No state is retained
//! between calls, so clones of a handle can issue requests concurrently
//! without coordination.

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{self, HttpMethod, HttpRequest, RequestBody};
use crate::response::ApiResponse;

/// Reusable handle for issuing authenticated API requests.
#[derive(Clone)]
pub struct Client {
    api_base: String,
    email: String,
    api_key: String,
    agent: ureq::Agent,
}

impl Client {
    /// Bind a handle to one server and one credential pair.
    ///
    /// Trailing slashes on `server_url` are stripped before the versioned
    /// `/api/v1` prefix is attached, so `https://example.com`,
    /// `https://example.com/` and `https://example.com///` are equivalent.
    pub fn new(server_url: &str, email: &str, api_key: &str) -> Self {
        Self {
            api_base: format!("{}/api/v1", server_url.trim_end_matches('/')),
            email: email.to_string(),
            api_key: api_key.to_string(),
            agent: http::agent(),
        }
    }

    fn auth_header(&self) -> (String, String) {
        let credential = BASE64.encode(format!("{}:{}", self.email, self.api_key));
        ("Authorization".to_string(), format!("Basic {credential}"))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    pub(crate) fn build_get(&self, path: &str, query: Vec<(String, String)>) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.url(path),
            query,
            headers: vec![self.auth_header()],
            body: None,
        }
    }

    pub(crate) fn build_post_form(
        &self,
        path: &str,
        pairs: Vec<(String, String)>,
    ) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url: self.url(path),
            query: Vec::new(),
            headers: vec![self.auth_header()],
            body: Some(RequestBody::Form(pairs)),
        }
    }

    pub(crate) fn build_patch_form(
        &self,
        path: &str,
        pairs: Vec<(String, String)>,
    ) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Patch,
            url: self.url(path),
            query: Vec::new(),
            headers: vec![self.auth_header()],
            body: Some(RequestBody::Form(pairs)),
        }
    }

    /// DELETE with an optional body: `None` issues a bodyless request, which
    /// some remove-style endpoints require, while `Some` always sends a form
    /// body — even an empty one.
    pub(crate) fn build_delete(
        &self,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<Vec<(String, String)>>,
    ) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: self.url(path),
            query,
            headers: vec![self.auth_header()],
            body: body.map(RequestBody::Form),
        }
    }

    pub(crate) fn build_post_multipart(
        &self,
        path: &str,
        file_name: &str,
        content: Vec<u8>,
    ) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url: self.url(path),
            query: Vec::new(),
            headers: vec![self.auth_header()],
            body: Some(RequestBody::Multipart {
                file_name: file_name.to_string(),
                content,
            }),
        }
    }

    /// Perform one request and parse the response envelope.
    ///
    /// Any HTTP status is accepted; a 4xx body still carries the envelope
    /// and comes back as `ApiResponse::Error`. Transport failures propagate
    /// unmodified.
    pub(crate) fn dispatch<T: DeserializeOwned>(
        &self,
        req: &HttpRequest,
    ) -> Result<ApiResponse<T>, ApiError> {
        let resp = http::execute(&self.agent, req)?;
        serde_json::from_str(&resp.body)
            .map_err(|e| ApiError::Deserialization(format!("HTTP {}: {e}", resp.status)))
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("api_base", &self.api_base)
            .field("email", &self.email)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
