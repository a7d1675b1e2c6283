//! Error types for the API client.
//!
//! # Design
//! Transport failures keep the underlying `ureq::Error` and propagate
//! unmodified — the library adds no retry or translation layer. A remote
//! `"error"` envelope is *not* an `ApiError` for regular operations (callers
//! receive the typed envelope and branch themselves); only the credential
//! exchange flows convert it into `AuthFailed`, because a missing API key is
//! otherwise indistinguishable from a present one.

use thiserror::Error;

/// Errors surfaced by client wrappers and auth flows.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level failure from the HTTP client (connect, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] ureq::Error),

    /// A credential-exchange endpoint answered with an `"error"` envelope.
    #[error("authentication failed: {msg}")]
    AuthFailed {
        /// Human-readable message from the server.
        msg: String,
        /// Machine-readable error code, e.g. `AUTHENTICATION_FAILED`.
        code: String,
    },

    /// The response body could not be deserialized into the expected envelope.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// A parameter object could not be serialized per the wire convention.
    #[error("serialization failed: {0}")]
    Serialization(String),
}
