//! Response envelope
//!
//! Every response carries the same permissive cross-origin headers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Headers attached to every response
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Headers", "*"),
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "*"),
];

/// Outbound response: status, JSON body text, headers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub body: String,
    pub headers: BTreeMap<String, String>,
}

impl ProxyResponse {
    /// Envelope around an arbitrary JSON body
    pub fn json(status_code: u16, body: Value) -> Self {
        Self {
            status_code,
            body: body.to_string(),
            headers: CORS_HEADERS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// `{"message": ...}`
    pub fn message(status_code: u16, message: &str) -> Self {
        Self::json(status_code, json!({ "message": message }))
    }

    /// `{"message": ..., "response": ...}`
    pub fn with_payload(status_code: u16, message: &str, payload: Value) -> Self {
        Self::json(status_code, json!({ "message": message, "response": payload }))
    }

    /// Decoded body
    pub fn body_json(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}
