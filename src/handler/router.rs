//! Request router
//!
//! Entry point for one invocation: picks the operation from the method,
//! runs it, and turns any error into the response envelope.

use std::sync::Arc;

use tracing::Instrument;
use uuid::Uuid;

use crate::schema::CollectionSchema;
use crate::store::RecordStore;

use super::errors::{HandlerError, HandlerResult};
use super::event::{Method, RequestEvent};
use super::response::ProxyResponse;

/// CRUD handler over one collection
pub struct RecordHandler {
    pub(super) schema: CollectionSchema,
    pub(super) store: Arc<dyn RecordStore>,
}

impl RecordHandler {
    pub fn new(schema: CollectionSchema, store: Arc<dyn RecordStore>) -> Self {
        Self { schema, store }
    }

    pub fn schema(&self) -> &CollectionSchema {
        &self.schema
    }

    /// Handle one request event. Never fails: errors become responses.
    pub async fn handle(&self, event: RequestEvent) -> ProxyResponse {
        let span = tracing::info_span!(
            "invocation",
            request_id = %Uuid::new_v4(),
            method = %event.http_method
        );

        async move {
            let response = match self.dispatch(event).await {
                Ok(response) => response,
                Err(err) => {
                    if err.is_server_fault() {
                        tracing::error!(error = %err, "store call failed");
                    } else {
                        tracing::info!(reason = %err, "request rejected");
                    }
                    err.into_response()
                }
            };
            tracing::info!(status = response.status_code, "invocation complete");
            response
        }
        .instrument(span)
        .await
    }

    async fn dispatch(&self, event: RequestEvent) -> HandlerResult<ProxyResponse> {
        let Some(method) = Method::from_token(&event.http_method) else {
            return Err(HandlerError::UnsupportedMethod(Box::new(event)));
        };
        tracing::debug!(operation = method.name(), "dispatching");

        let body = event.body.as_deref();
        match method {
            Method::Create => self.create(body).await,
            Method::Read => self.read().await,
            Method::Update => self.update(body).await,
            Method::Delete => self.delete(body).await,
        }
    }
}
