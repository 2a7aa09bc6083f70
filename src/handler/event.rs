//! Inbound request events
//!
//! Shaped like an API Gateway proxy event; only the fields the handler
//! reads are modelled.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One inbound request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEvent {
    pub http_method: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,

    /// Raw JSON text, if any
    #[serde(default)]
    pub body: Option<String>,
}

impl RequestEvent {
    pub fn new(http_method: impl Into<String>, body: Option<String>) -> Self {
        Self {
            http_method: http_method.into(),
            body,
            ..Default::default()
        }
    }
}

/// Operation selected by a method token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// POST
    Create,
    /// GET
    Read,
    /// PUT
    Update,
    /// DELETE
    Delete,
}

impl Method {
    /// Map a method token. Tokens are matched exactly.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "POST" => Some(Method::Create),
            "GET" => Some(Method::Read),
            "PUT" => Some(Method::Update),
            "DELETE" => Some(Method::Delete),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Method::Create => "create",
            Method::Read => "read",
            Method::Update => "update",
            Method::Delete => "delete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_tokens() {
        assert_eq!(Method::from_token("POST"), Some(Method::Create));
        assert_eq!(Method::from_token("GET"), Some(Method::Read));
        assert_eq!(Method::from_token("PUT"), Some(Method::Update));
        assert_eq!(Method::from_token("DELETE"), Some(Method::Delete));
        assert_eq!(Method::from_token("PATCH"), None);
        assert_eq!(Method::from_token("get"), None);
    }

    #[test]
    fn test_parse_proxy_event() {
        let json = r#"{
            "httpMethod": "PUT",
            "path": "/vehicles",
            "headers": {"content-type": "application/json"},
            "body": "{\"vehicleName\":\"car1\"}",
            "requestContext": {"stage": "prod"}
        }"#;

        let event: RequestEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.http_method, "PUT");
        assert_eq!(event.path.as_deref(), Some("/vehicles"));
        assert_eq!(event.body.as_deref(), Some(r#"{"vehicleName":"car1"}"#));
    }

    #[test]
    fn test_parse_minimal_event() {
        let event: RequestEvent = serde_json::from_str(r#"{"httpMethod": "GET", "body": null}"#).unwrap();
        assert_eq!(event, RequestEvent::new("GET", None));
    }
}
