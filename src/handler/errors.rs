//! Handler errors
//!
//! Each variant maps to a status code and a caller-facing message. Store
//! failures never expose their detail to the caller.

use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;
use crate::update::DirectiveError;

use super::event::RequestEvent;
use super::response::ProxyResponse;

/// Message returned for any store failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Message returned for an unsupported method
pub const UNSUPPORTED_METHOD_MESSAGE: &str = "HTTP method must be one of POST, GET, PUT or DELETE.";

/// Result type for handler operations
pub type HandlerResult<T> = Result<T, HandlerError>;

#[derive(Debug, Error)]
pub enum HandlerError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Identity key missing or empty
    #[error("The field {0} is required.")]
    MissingKey(String),

    /// Update request without any declared attribute
    #[error(transparent)]
    Directive(#[from] DirectiveError),

    /// Method outside POST/GET/PUT/DELETE
    #[error("{}", UNSUPPORTED_METHOD_MESSAGE)]
    UnsupportedMethod(Box<RequestEvent>),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Store call failed
    #[error("store call failed: {0}")]
    Store(#[from] StoreError),
}

impl HandlerError {
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::MissingKey(_) => 400,
            HandlerError::Directive(_) => 400,
            HandlerError::UnsupportedMethod(_) => 400,
            HandlerError::Store(_) => 500,
        }
    }

    pub fn is_server_fault(&self) -> bool {
        matches!(self, HandlerError::Store(_))
    }

    /// Message safe to show the caller
    pub fn public_message(&self) -> String {
        match self {
            HandlerError::Store(_) => INTERNAL_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    pub fn into_response(self) -> ProxyResponse {
        let status = self.status_code();
        let message = self.public_message();
        match self {
            HandlerError::UnsupportedMethod(event) => {
                ProxyResponse::json(status, json!({ "message": message, "event": event }))
            }
            _ => ProxyResponse::message(status, &message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(HandlerError::MissingKey("vehicleName".into()).status_code(), 400);
        assert_eq!(
            HandlerError::from(DirectiveError::NothingToUpdate).status_code(),
            400
        );
        assert_eq!(
            HandlerError::from(StoreError::backend("boom")).status_code(),
            500
        );
    }

    #[test]
    fn test_store_detail_is_not_exposed() {
        let err = HandlerError::from(StoreError::backend("table arn:aws:secret not found"));
        let resp = err.into_response();
        let body = resp.body_json().unwrap();
        assert_eq!(body, json!({"message": INTERNAL_ERROR_MESSAGE}));
        assert!(!resp.body.contains("arn:aws"));
    }

    #[test]
    fn test_unsupported_method_echoes_event() {
        let event = RequestEvent::new("PATCH", Some("{}".into()));
        let resp = HandlerError::UnsupportedMethod(Box::new(event)).into_response();
        let body = resp.body_json().unwrap();
        assert_eq!(body["message"], UNSUPPORTED_METHOD_MESSAGE);
        assert_eq!(body["event"]["httpMethod"], "PATCH");
    }

    #[test]
    fn test_missing_key_names_field() {
        let err = HandlerError::MissingKey("vehicleName".into());
        assert!(err.public_message().contains("vehicleName"));
    }
}
