//! Collection schema
//!
//! Describes one collection: where it lives, which field identifies a
//! record, and which attributes a request may set. The handler is
//! parameterized by this type instead of hard-coding a table.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use super::errors::{SchemaError, SchemaResult};

/// Default table holding vehicle records
pub const DEFAULT_TABLE_NAME: &str = "vehicles-table";

/// Identity key of a vehicle record
pub const VEHICLE_KEY_FIELD: &str = "vehicleName";

/// Mutable attributes of a vehicle record, in declaration order
pub const VEHICLE_ATTRIBUTES: &[&str] = &[
    "type",
    "brand",
    "model",
    "mileage",
    "color",
    "energy",
    "date_of_first_registration",
    "date_of_purchase",
    "number_of_owner",
];

fn field_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("static pattern"))
}

/// Schema of a single keyed collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSchema {
    table_name: String,
    key_field: String,
    attributes: Vec<String>,
}

impl CollectionSchema {
    /// Build and validate a schema.
    ///
    /// Attribute names double as placeholder suffixes (`:name`), so they are
    /// restricted to identifier characters. The key field may never be
    /// listed as an attribute.
    pub fn new<I, S>(
        table_name: impl Into<String>,
        key_field: impl Into<String>,
        attributes: I,
    ) -> SchemaResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let table_name = table_name.into();
        if table_name.trim().is_empty() {
            return Err(SchemaError::EmptyTableName);
        }

        let key_field = key_field.into();
        if !field_name_pattern().is_match(&key_field) {
            return Err(SchemaError::InvalidKeyField(key_field));
        }

        let mut seen = HashSet::new();
        let mut declared = Vec::new();
        for attribute in attributes {
            let attribute = attribute.into();
            if attribute == key_field {
                return Err(SchemaError::KeyAsAttribute(attribute));
            }
            if !field_name_pattern().is_match(&attribute) {
                return Err(SchemaError::InvalidAttribute(attribute));
            }
            if !seen.insert(attribute.clone()) {
                return Err(SchemaError::DuplicateAttribute(attribute));
            }
            declared.push(attribute);
        }

        Ok(Self {
            table_name,
            key_field,
            attributes: declared,
        })
    }

    /// The vehicle collection stored in `table_name`
    pub fn vehicles(table_name: impl Into<String>) -> SchemaResult<Self> {
        Self::new(table_name, VEHICLE_KEY_FIELD, VEHICLE_ATTRIBUTES.iter().copied())
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn key_field(&self) -> &str {
        &self.key_field
    }

    /// Mutable attributes in declaration order
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn is_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a == name)
    }
}

impl Default for CollectionSchema {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            key_field: VEHICLE_KEY_FIELD.to_string(),
            attributes: VEHICLE_ATTRIBUTES.iter().map(|a| a.to_string()).collect(),
        }
    }
}
