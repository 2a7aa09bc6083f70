//! Amazon DynamoDB record store
//!
//! Records map to items of one table whose partition key is the schema's
//! key field. JSON values map to attribute values as:
//!
//! | JSON   | DynamoDB |
//! |--------|----------|
//! | string | S        |
//! | number | N        |
//! | bool   | BOOL     |
//! | null   | NULL     |
//! | array  | L        |
//! | object | M        |
//!
//! Update expressions alias every attribute name (`#name`) so that reserved
//! words such as `type` can be assigned.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use serde_json::{Map, Number, Value};

use crate::record::Record;
use crate::schema::CollectionSchema;
use crate::update::MutationDirective;

use super::config::StoreConfig;
use super::errors::{StoreError, StoreResult};
use super::{ack, RecordStore};

type Item = HashMap<String, AttributeValue>;

/// DynamoDB-backed [`RecordStore`]
pub struct DynamoStore {
    client: Client,
    table_name: String,
    key_field: String,
}

impl DynamoStore {
    pub fn new(client: Client, table_name: impl Into<String>, key_field: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            key_field: key_field.into(),
        }
    }

    /// Build a client from the AWS default provider chain plus any
    /// region/endpoint overrides.
    pub async fn connect(config: &StoreConfig, schema: &CollectionSchema) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        let sdk_config = loader.load().await;

        let mut builder = aws_sdk_dynamodb::config::Builder::from(&sdk_config);
        if let Some(url) = &config.endpoint_url {
            builder = builder.endpoint_url(url);
        }

        tracing::info!(
            table = schema.table_name(),
            endpoint = config.endpoint_url.as_deref().unwrap_or("default"),
            "dynamodb client ready"
        );

        Self::new(
            Client::from_conf(builder.build()),
            schema.table_name(),
            schema.key_field(),
        )
    }

    fn key(&self, key: &str) -> (String, AttributeValue) {
        (self.key_field.clone(), AttributeValue::S(key.to_string()))
    }
}

#[async_trait]
impl RecordStore for DynamoStore {
    async fn put(&self, record: Record) -> StoreResult<Value> {
        let output = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(to_item(&record)?))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(backend_error)?;

        let previous = output.attributes.as_ref().map(from_item).transpose()?;
        Ok(ack(previous))
    }

    async fn scan(&self) -> StoreResult<Vec<Record>> {
        let mut records = Vec::new();
        let mut start_key: Option<Item> = None;

        // A single scan call stops at 1 MB; follow the continuation key.
        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(backend_error)?;

            for item in output.items.unwrap_or_default() {
                records.push(from_item(&item)?);
            }

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        Ok(records)
    }

    async fn update(&self, key: &str, directive: &MutationDirective) -> StoreResult<Record> {
        let (expression, names) = aliased_set_expression(directive);
        let mut values = HashMap::with_capacity(directive.len());
        for (placeholder, value) in directive.values() {
            values.insert(placeholder.clone(), to_attribute(value)?);
        }

        let (key_name, key_value) = self.key(key);
        let output = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(key_name, key_value)
            .update_expression(expression)
            .set_expression_attribute_names(Some(names))
            .set_expression_attribute_values(Some(values))
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(backend_error)?;

        match output.attributes.as_ref() {
            Some(item) => from_item(item),
            None => Err(StoreError::backend("update returned no attributes")),
        }
    }

    async fn delete(&self, key: &str) -> StoreResult<Value> {
        let (key_name, key_value) = self.key(key);
        let output = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key(key_name, key_value)
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(backend_error)?;

        let previous = output.attributes.as_ref().map(from_item).transpose()?;
        Ok(ack(previous))
    }
}

fn backend_error<E>(err: E) -> StoreError
where
    E: std::error::Error + 'static,
{
    StoreError::Backend(DisplayErrorContext(err).to_string())
}

/// `SET #a = :a, #b = :b` plus the `#a -> a` alias map
pub(crate) fn aliased_set_expression(
    directive: &MutationDirective,
) -> (String, HashMap<String, String>) {
    let mut names = HashMap::with_capacity(directive.len());
    let mut assignments = Vec::with_capacity(directive.len());

    for clause in directive.clauses() {
        let alias = format!("#{}", clause.attribute());
        assignments.push(format!("{} = {}", alias, clause.placeholder()));
        names.insert(alias, clause.attribute().to_string());
    }

    (format!("SET {}", assignments.join(", ")), names)
}

pub(crate) fn to_item(record: &Record) -> StoreResult<Item> {
    record
        .iter()
        .map(|(name, value)| Ok((name.clone(), to_attribute(value)?)))
        .collect()
}

pub(crate) fn from_item(item: &Item) -> StoreResult<Record> {
    item.iter()
        .map(|(name, value)| Ok((name.clone(), from_attribute(value)?)))
        .collect()
}

pub(crate) fn to_attribute(value: &Value) -> StoreResult<AttributeValue> {
    Ok(match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(items) => {
            AttributeValue::L(items.iter().map(to_attribute).collect::<StoreResult<_>>()?)
        }
        Value::Object(fields) => AttributeValue::M(
            fields
                .iter()
                .map(|(k, v)| Ok((k.clone(), to_attribute(v)?)))
                .collect::<StoreResult<_>>()?,
        ),
    })
}

pub(crate) fn from_attribute(value: &AttributeValue) -> StoreResult<Value> {
    Ok(match value {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => Value::Number(parse_number(n)?),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(items) => {
            Value::Array(items.iter().map(from_attribute).collect::<StoreResult<_>>()?)
        }
        AttributeValue::M(fields) => Value::Object(
            fields
                .iter()
                .map(|(k, v)| Ok((k.clone(), from_attribute(v)?)))
                .collect::<StoreResult<Map<_, _>>>()?,
        ),
        AttributeValue::Ss(items) => {
            Value::Array(items.iter().cloned().map(Value::String).collect())
        }
        AttributeValue::Ns(items) => Value::Array(
            items
                .iter()
                .map(|n| parse_number(n).map(Value::Number))
                .collect::<StoreResult<_>>()?,
        ),
        other => {
            return Err(StoreError::Conversion(format!(
                "attribute type not representable as JSON: {:?}",
                other
            )))
        }
    })
}

fn parse_number(text: &str) -> StoreResult<Number> {
    if let Ok(i) = text.parse::<i64>() {
        return Ok(Number::from(i));
    }
    if let Ok(u) = text.parse::<u64>() {
        return Ok(Number::from(u));
    }
    text.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| StoreError::Conversion(format!("invalid number: {}", text)))
}
