//! Partial-update directive
//!
//! Turns the fields supplied in an update request into one combined SET
//! mutation. Only declared attributes are considered, walked in schema
//! order, and each contributes a clause when its key is present in the
//! request. Presence is all that matters: `null`, `0`, `""` and `false`
//! are values like any other.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::record::Record;
use crate::schema::CollectionSchema;

/// Prefix of every value placeholder
pub const PLACEHOLDER_PREFIX: char = ':';

/// Why no directive could be built
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveError {
    /// No declared attribute was present in the request
    #[error("no fields to update")]
    NothingToUpdate,
}

/// One `attribute = :attribute` assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Clause {
    attribute: String,
    placeholder: String,
}

impl Clause {
    fn for_attribute(attribute: &str) -> Self {
        Self {
            attribute: attribute.to_string(),
            placeholder: format!("{}{}", PLACEHOLDER_PREFIX, attribute),
        }
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.attribute, self.placeholder)
    }
}

/// Clauses plus placeholder bindings for a single update call.
///
/// A directive is never empty: [`MutationDirective::build`] refuses to
/// produce one without clauses, so anything holding a directive may send
/// it to the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MutationDirective {
    clauses: Vec<Clause>,
    values: BTreeMap<String, Value>,
}

impl MutationDirective {
    /// Build the directive for `fields` against `schema`.
    ///
    /// The identity key is never a clause target, and keys the schema does
    /// not declare are ignored.
    pub fn build(schema: &CollectionSchema, fields: &Record) -> Result<Self, DirectiveError> {
        let mut clauses = Vec::new();
        let mut values = BTreeMap::new();

        for attribute in schema.attributes() {
            if attribute == schema.key_field() {
                continue;
            }
            let Some(value) = fields.get(attribute) else {
                continue;
            };
            let clause = Clause::for_attribute(attribute);
            values.insert(clause.placeholder.clone(), value.clone());
            clauses.push(clause);
        }

        if clauses.is_empty() {
            return Err(DirectiveError::NothingToUpdate);
        }

        Ok(Self { clauses, values })
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Placeholder to bound value
    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Value bound to a clause's placeholder
    pub fn value_of(&self, clause: &Clause) -> &Value {
        // every clause's placeholder is bound in build()
        &self.values[clause.placeholder()]
    }

    /// `SET a = :a, b = :b`
    pub fn set_expression(&self) -> String {
        let assignments: Vec<String> = self.clauses.iter().map(Clause::to_string).collect();
        format!("SET {}", assignments.join(", "))
    }

    /// Apply every clause to `record` in place
    pub fn apply_to(&self, record: &mut Record) {
        for clause in &self.clauses {
            record.insert(clause.attribute.clone(), self.value_of(clause).clone());
        }
    }
}
