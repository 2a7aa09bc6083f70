//! The four CRUD operations
//!
//! Each operation validates its input before touching the store and
//! makes at most one store call.

use serde_json::Value;

use crate::record::{self, Record};
use crate::update::MutationDirective;

use super::errors::{HandlerError, HandlerResult};
use super::response::ProxyResponse;
use super::router::RecordHandler;

pub const CREATED_MESSAGE: &str = "Vehicle created successfully.";
pub const UPDATED_MESSAGE: &str = "Vehicle updated successfully.";
pub const DELETED_MESSAGE: &str = "Vehicle deleted successfully.";

impl RecordHandler {
    fn require_key<'a>(&self, fields: &'a Record) -> HandlerResult<&'a str> {
        record::identity(fields, &self.schema)
            .ok_or_else(|| HandlerError::MissingKey(self.schema.key_field().to_string()))
    }

    /// Insert or replace a record built from the body. 201 on success.
    pub async fn create(&self, body: Option<&str>) -> HandlerResult<ProxyResponse> {
        let fields = record::parse_body(body);
        let key = self.require_key(&fields)?;
        let item = record::project(&fields, &self.schema, key);

        let ack = self.store.put(item).await?;
        Ok(ProxyResponse::with_payload(201, CREATED_MESSAGE, ack))
    }

    /// Every record as a bare JSON list. 200 on success.
    pub async fn read(&self) -> HandlerResult<ProxyResponse> {
        let records = self.store.scan().await?;
        let list = records.into_iter().map(Value::Object).collect();
        Ok(ProxyResponse::json(200, Value::Array(list)))
    }

    /// Partial update of the supplied attributes. 200 on success.
    pub async fn update(&self, body: Option<&str>) -> HandlerResult<ProxyResponse> {
        let fields = record::parse_body(body);
        let key = self.require_key(&fields)?;
        let directive = MutationDirective::build(&self.schema, &fields)?;
        tracing::debug!(key, expression = %directive.set_expression(), "updating record");

        let updated = self.store.update(key, &directive).await?;
        Ok(ProxyResponse::with_payload(
            200,
            UPDATED_MESSAGE,
            serde_json::json!({ "attributes": updated }),
        ))
    }

    /// Remove the record named in the body. 200 on success, even if the
    /// record did not exist.
    pub async fn delete(&self, body: Option<&str>) -> HandlerResult<ProxyResponse> {
        let fields = record::parse_body(body);
        let key = self.require_key(&fields)?;

        let ack = self.store.delete(key).await?;
        Ok(ProxyResponse::with_payload(200, DELETED_MESSAGE, ack))
    }
}
