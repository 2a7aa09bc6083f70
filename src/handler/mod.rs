//! Request handler
//!
//! Receives a request event, dispatches on its method to one of four
//! operations, and returns the response envelope.
//!
//! # Supported Methods
//!
//! - POST: insert or replace a record
//! - GET: list every record
//! - PUT: partial update of one record
//! - DELETE: remove one record

mod errors;
mod event;
mod operations;
mod response;
mod router;

pub use errors::{HandlerError, HandlerResult, INTERNAL_ERROR_MESSAGE, UNSUPPORTED_METHOD_MESSAGE};
pub use event::{Method, RequestEvent};
pub use operations::{CREATED_MESSAGE, DELETED_MESSAGE, UPDATED_MESSAGE};
pub use response::{ProxyResponse, CORS_HEADERS};
pub use router::RecordHandler;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use serde_json::{json, Value};
    use tracing_test::traced_test;

    use super::*;
    use crate::record::Record;
    use crate::schema::CollectionSchema;
    use crate::store::{InMemoryStore, RecordStore, StoreError, StoreResult};
    use crate::update::MutationDirective;

    /// Store whose every call fails
    struct UnavailableStore;

    #[async_trait]
    impl RecordStore for UnavailableStore {
        async fn put(&self, _: Record) -> StoreResult<Value> {
            Err(StoreError::backend("connection refused"))
        }
        async fn scan(&self) -> StoreResult<Vec<Record>> {
            Err(StoreError::backend("connection refused"))
        }
        async fn update(&self, _: &str, _: &MutationDirective) -> StoreResult<Record> {
            Err(StoreError::backend("connection refused"))
        }
        async fn delete(&self, _: &str) -> StoreResult<Value> {
            Err(StoreError::backend("connection refused"))
        }
    }

    fn memory_handler() -> RecordHandler {
        RecordHandler::new(
            CollectionSchema::default(),
            Arc::new(InMemoryStore::new("vehicleName")),
        )
    }

    #[tokio::test]
    #[traced_test]
    async fn test_store_failure_is_logged_and_hidden() {
        let handler = RecordHandler::new(CollectionSchema::default(), Arc::new(UnavailableStore));

        let resp = handler
            .handle(RequestEvent::new("DELETE", Some(r#"{"vehicleName":"car1"}"#.into())))
            .await;

        assert_eq!(resp.status_code, 500);
        assert_eq!(
            resp.body_json().unwrap(),
            json!({"message": INTERNAL_ERROR_MESSAGE})
        );
        assert!(logs_contain("store call failed"));
        assert!(logs_contain("connection refused"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_validation_failure_is_not_logged_as_fault() {
        let handler = memory_handler();

        let resp = handler
            .handle(RequestEvent::new("PUT", Some(r#"{"vehicleName":"car1"}"#.into())))
            .await;

        assert_eq!(resp.status_code, 400);
        assert!(logs_contain("request rejected"));
        assert!(!logs_contain("store call failed"));
    }

    #[tokio::test]
    async fn test_every_operation_maps_store_failure_to_500() {
        let handler = RecordHandler::new(CollectionSchema::default(), Arc::new(UnavailableStore));
        let body = Some(r#"{"vehicleName":"car1","brand":"Fiat"}"#.to_string());

        for method in ["POST", "GET", "PUT", "DELETE"] {
            let resp = handler.handle(RequestEvent::new(method, body.clone())).await;
            assert_eq!(resp.status_code, 500, "{}", method);
            assert!(!resp.body.contains("connection refused"));
        }
    }

    #[tokio::test]
    async fn test_create_then_read() {
        let handler = memory_handler();

        let resp = handler
            .create(Some(r#"{"vehicleName":"car1","brand":"Fiat","mileage":10}"#))
            .await
            .unwrap();
        assert_eq!(resp.status_code, 201);
        assert_eq!(resp.body_json().unwrap()["message"], CREATED_MESSAGE);

        let resp = handler.read().await.unwrap();
        assert_eq!(
            resp.body_json().unwrap(),
            json!([{"vehicleName": "car1", "brand": "Fiat", "mileage": 10}])
        );
    }
}
