//! The response envelope shared by every endpoint.
//!
//! Every body the server returns carries a `result` discriminator
//! (`"success"` or `"error"`) and a `msg` field. Success bodies add
//! operation-specific fields, which flatten into the payload type `T`;
//! error bodies add a machine-readable `code`. Wrappers hand the parsed
//! envelope back without branching on it — that is the caller's job.

use serde::Deserialize;

/// Parsed response body, discriminated on the `result` field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "result")]
pub enum ApiResponse<T> {
    /// The operation succeeded; `msg` is normally empty.
    #[serde(rename = "success")]
    Success {
        msg: String,
        /// Operation-specific payload fields, flattened into the body.
        #[serde(flatten)]
        data: T,
        /// Parameter names the server recognized but silently dropped.
        #[serde(default)]
        ignored_parameters_unsupported: Option<Vec<String>>,
    },
    /// The operation failed; `msg` is human-readable, `code` machine-readable.
    #[serde(rename = "error")]
    Error { msg: String, code: String },
}

impl<T> ApiResponse<T> {
    /// True when the discriminator is `"success"`.
    pub fn is_success(&self) -> bool {
        matches!(self, ApiResponse::Success { .. })
    }
}

/// Payload for operations whose success body has no fields beyond the
/// envelope itself.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NoData {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Sent {
        id: i64,
    }

    #[test]
    fn success_envelope_flattens_payload() {
        let resp: ApiResponse<Sent> =
            serde_json::from_str(r#"{"result":"success","msg":"","id":123}"#).unwrap();
        assert_eq!(
            resp,
            ApiResponse::Success {
                msg: String::new(),
                data: Sent { id: 123 },
                ignored_parameters_unsupported: None,
            }
        );
    }

    #[test]
    fn error_envelope_carries_code() {
        let resp: ApiResponse<Sent> = serde_json::from_str(
            r#"{"result":"error","msg":"Invalid API key","code":"UNAUTHORIZED"}"#,
        )
        .unwrap();
        assert_eq!(
            resp,
            ApiResponse::Error {
                msg: "Invalid API key".to_string(),
                code: "UNAUTHORIZED".to_string(),
            }
        );
        assert!(!resp.is_success());
    }

    #[test]
    fn ignored_parameters_are_surfaced() {
        let resp: ApiResponse<NoData> = serde_json::from_str(
            r#"{"result":"success","msg":"","ignored_parameters_unsupported":["realm"]}"#,
        )
        .unwrap();
        match resp {
            ApiResponse::Success {
                ignored_parameters_unsupported: Some(ignored),
                ..
            } => assert_eq!(ignored, vec!["realm"]),
            other => panic!("unexpected envelope: {other:?}"),
        }
    }

    #[test]
    fn empty_payload_accepts_plain_success() {
        let resp: ApiResponse<NoData> =
            serde_json::from_str(r#"{"result":"success","msg":""}"#).unwrap();
        assert!(resp.is_success());
    }
}
