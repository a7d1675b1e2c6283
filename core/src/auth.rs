//! Credential acquisition: exchange login material for an API key.
//!
//! Three independent flows, each a single unauthenticated round trip. The
//! result is never cached — persist the key yourself and feed it to
//! [`Client::new`](crate::Client::new). Unlike regular wrappers, these
//! functions check the response discriminator and raise
//! [`ApiError::AuthFailed`] on an `"error"` envelope: a login that silently
//! returns no key would be indistinguishable from success otherwise.

use serde::Deserialize;

use crate::error::ApiError;
use crate::http::{self, HttpMethod, HttpRequest, RequestBody};
use crate::response::ApiResponse;

#[derive(Debug, Deserialize)]
struct ApiKeyPayload {
    api_key: String,
}

/// Exchange email + password for an API key.
pub fn fetch_api_key(server_url: &str, email: &str, password: &str) -> Result<String, ApiError> {
    exchange(
        server_url,
        "login",
        vec![
            ("username".to_string(), email.to_string()),
            ("password".to_string(), password.to_string()),
        ],
    )
}

/// Exchange an email alone for an API key. Only works against servers
/// running in development mode, which skip password checks.
pub fn fetch_dev_api_key(server_url: &str, email: &str) -> Result<String, ApiError> {
    exchange(
        server_url,
        "dev_fetch_api_key",
        vec![("username".to_string(), email.to_string())],
    )
}

/// Exchange a JSON Web Token for an API key. The token's claims identify
/// the user; no email or password is sent.
pub fn fetch_api_key_jwt(server_url: &str, token: &str) -> Result<String, ApiError> {
    exchange(
        server_url,
        "fetch_api_key",
        vec![("token".to_string(), token.to_string())],
    )
}

fn exchange(
    server_url: &str,
    endpoint: &str,
    pairs: Vec<(String, String)>,
) -> Result<String, ApiError> {
    let req = HttpRequest {
        method: HttpMethod::Post,
        url: format!("{}/api/v1/{endpoint}", server_url.trim_end_matches('/')),
        query: Vec::new(),
        headers: Vec::new(),
        body: Some(RequestBody::Form(pairs)),
    };

    let resp = http::execute(&http::agent(), &req)?;
    let parsed: ApiResponse<ApiKeyPayload> = serde_json::from_str(&resp.body)
        .map_err(|e| ApiError::Deserialization(format!("HTTP {}: {e}", resp.status)))?;

    match parsed {
        ApiResponse::Success { data, .. } => Ok(data.api_key),
        ApiResponse::Error { msg, code } => Err(ApiError::AuthFailed { msg, code }),
    }
}
