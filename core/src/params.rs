//! The parameter encoding convention shared by every endpoint wrapper.
//!
//! # Design
//! Each operation's parameter struct derives `Serialize`; this module turns
//! it into the flat key/value pairs the remote API expects, with one set of
//! rules applied everywhere:
//!
//! - a `null` value (an unset `Option`) omits the key entirely — never an
//!   empty string;
//! - booleans become the literal text `true` / `false`;
//! - strings pass through verbatim, numbers via their decimal form;
//! - arrays and nested objects are embedded as compact JSON text.
//!
//! Pairs come out in field declaration order (`serde_json` is built with
//! `preserve_order`). Whether the pairs land in a query string or a
//! form-urlencoded body is the caller's choice; the encoding is identical.

use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

/// Flatten a parameter struct into wire key/value pairs.
///
/// The struct must serialize to a JSON object; anything else is a
/// [`ApiError::Serialization`] bug in the parameter type itself.
pub(crate) fn encode_pairs<T: Serialize + ?Sized>(
    params: &T,
) -> Result<Vec<(String, String)>, ApiError> {
    let value =
        serde_json::to_value(params).map_err(|e| ApiError::Serialization(e.to_string()))?;

    let Value::Object(map) = value else {
        return Err(ApiError::Serialization(format!(
            "parameter object must serialize to a JSON object, got {value}"
        )));
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            Value::Null => continue,
            Value::Bool(b) => pairs.push((key, b.to_string())),
            Value::String(s) => pairs.push((key, s)),
            Value::Number(n) => pairs.push((key, n.to_string())),
            nested @ (Value::Array(_) | Value::Object(_)) => {
                let text = serde_json::to_string(&nested)
                    .map_err(|e| ApiError::Serialization(e.to_string()))?;
                pairs.push((key, text));
            }
        }
    }

    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        topic: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        stream_id: Option<i64>,
    }

    #[test]
    fn unset_option_is_omitted_entirely() {
        let pairs = encode_pairs(&Sample {
            topic: "x".to_string(),
            stream_id: None,
        })
        .unwrap();
        assert_eq!(pairs, vec![("topic".to_string(), "x".to_string())]);
    }

    #[test]
    fn explicit_null_is_omitted_entirely() {
        // A field serialized as `null` (no skip attribute) must behave the
        // same as an absent one.
        #[derive(Serialize)]
        struct WithNull {
            name: Option<String>,
        }
        let pairs = encode_pairs(&WithNull { name: None }).unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn booleans_become_literal_text() {
        #[derive(Serialize)]
        struct Flags {
            invite_only: bool,
            announce: bool,
        }
        let pairs = encode_pairs(&Flags {
            invite_only: true,
            announce: false,
        })
        .unwrap();
        assert_eq!(
            pairs,
            vec![
                ("invite_only".to_string(), "true".to_string()),
                ("announce".to_string(), "false".to_string()),
            ]
        );
    }

    #[test]
    fn arrays_are_embedded_as_json_text() {
        #[derive(Serialize)]
        struct Subs {
            subscribers: Vec<i64>,
        }
        let pairs = encode_pairs(&Subs {
            subscribers: vec![1, 2, 3],
        })
        .unwrap();
        assert_eq!(pairs[0].1, "[1,2,3]");

        // Round trip: parsing the encoded value yields the original array.
        let back: Vec<i64> = serde_json::from_str(&pairs[0].1).unwrap();
        assert_eq!(back, vec![1, 2, 3]);
    }

    #[test]
    fn nested_objects_are_embedded_as_json_text() {
        #[derive(Serialize)]
        struct Perm {
            can_subscribe_group: serde_json::Value,
        }
        let pairs = encode_pairs(&Perm {
            can_subscribe_group: serde_json::json!({"new": 5}),
        })
        .unwrap();
        assert_eq!(pairs[0].1, r#"{"new":5}"#);
    }

    #[test]
    fn numbers_use_decimal_form() {
        #[derive(Serialize)]
        struct Ids {
            to: i64,
            anchor: u64,
        }
        let pairs = encode_pairs(&Ids { to: 42, anchor: 0 }).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("to".to_string(), "42".to_string()),
                ("anchor".to_string(), "0".to_string()),
            ]
        );
    }

    #[test]
    fn pairs_follow_field_declaration_order() {
        #[derive(Serialize)]
        struct Ordered {
            zeta: i64,
            alpha: i64,
            mid: i64,
        }
        let pairs = encode_pairs(&Ordered {
            zeta: 1,
            alpha: 2,
            mid: 3,
        })
        .unwrap();
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn non_object_parameters_are_rejected() {
        let err = encode_pairs(&vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, ApiError::Serialization(_)));
    }
}
