//! Record representation shared by the handler and the stores

use serde_json::{Map, Value};

use crate::schema::CollectionSchema;

/// One stored record: field name to JSON value
pub type Record = Map<String, Value>;

/// Decode a request body into a field mapping.
///
/// An absent body, invalid JSON, or a JSON value that is not an object all
/// decode to an empty mapping. Validation further down reports what is
/// missing.
pub fn parse_body(body: Option<&str>) -> Record {
    let Some(text) = body.filter(|t| !t.trim().is_empty()) else {
        return Record::new();
    };

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(fields)) => fields,
        Ok(other) => {
            tracing::debug!(kind = value_kind(&other), "request body is not an object");
            Record::new()
        }
        Err(e) => {
            tracing::debug!(error = %e, "request body is not valid JSON");
            Record::new()
        }
    }
}

/// Non-empty string value of the identity key, if present
pub fn identity<'a>(fields: &'a Record, schema: &CollectionSchema) -> Option<&'a str> {
    fields
        .get(schema.key_field())
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
}

/// Project a body onto the schema: the key plus whichever declared
/// attributes are present. Absent attributes stay absent.
pub fn project(fields: &Record, schema: &CollectionSchema, key: &str) -> Record {
    let mut record = Record::new();
    record.insert(schema.key_field().to_string(), Value::String(key.to_string()));
    for attribute in schema.attributes() {
        if let Some(value) = fields.get(attribute) {
            record.insert(attribute.clone(), value.clone());
        }
    }
    record
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_body_tolerates_bad_input() {
        assert!(parse_body(None).is_empty());
        assert!(parse_body(Some("")).is_empty());
        assert!(parse_body(Some("{not json")).is_empty());
        assert!(parse_body(Some("[1, 2]")).is_empty());
        assert!(parse_body(Some("\"car1\"")).is_empty());
    }

    #[test]
    fn test_parse_body_object() {
        let fields = parse_body(Some(r#"{"vehicleName": "car1", "mileage": 12}"#));
        assert_eq!(fields.get("mileage"), Some(&json!(12)));
    }

    #[test]
    fn test_identity_requires_non_empty_string() {
        let schema = CollectionSchema::default();
        let fields = parse_body(Some(r#"{"vehicleName": "car1"}"#));
        assert_eq!(identity(&fields, &schema), Some("car1"));

        let fields = parse_body(Some(r#"{"vehicleName": ""}"#));
        assert_eq!(identity(&fields, &schema), None);

        let fields = parse_body(Some(r#"{"vehicleName": 42}"#));
        assert_eq!(identity(&fields, &schema), None);
    }

    #[test]
    fn test_project_keeps_declared_present_fields() {
        let schema = CollectionSchema::default();
        let fields = parse_body(Some(
            r#"{"vehicleName": "car1", "brand": "Renault", "color": null, "owner_ssn": "x"}"#,
        ));
        let record = project(&fields, &schema, "car1");

        assert_eq!(record.len(), 3);
        assert_eq!(record.get("brand"), Some(&json!("Renault")));
        assert_eq!(record.get("color"), Some(&Value::Null));
        assert!(!record.contains_key("owner_ssn"));
        assert!(!record.contains_key("mileage"));
    }
}
