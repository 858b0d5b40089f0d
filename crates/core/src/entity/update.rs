//! Update expression building.
//!
//! A partial payload becomes a `SET` expression whose tokens are generated
//! placeholders (`#field0 = :value0`), never literal field names. Field names
//! such as `name`, `status` or `role` are reserved words in DynamoDB's
//! expression language and would otherwise be rejected.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::item::format_timestamp;
use super::keys::{PARTITION_KEY_ATTR, SORT_KEY_ATTR};
use super::{Record, ENTITY_TYPE_ATTR, ID_ATTR, UPDATED_AT_ATTR};

/// Attributes a caller can never set through an update.
const PROTECTED_ATTRS: [&str; 5] = [
    ID_ATTR,
    ENTITY_TYPE_ATTR,
    PARTITION_KEY_ATTR,
    SORT_KEY_ATTR,
    UPDATED_AT_ATTR,
];

/// One `#name = :value` assignment of an update.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldAssignment {
    pub name_placeholder: String,
    pub value_placeholder: String,
    pub field: String,
    pub value: Value,
}

/// Storage-neutral description of a partial update.
///
/// The last assignment always refreshes `updatedAt`.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateSpec {
    assignments: Vec<FieldAssignment>,
}

impl UpdateSpec {
    pub fn assignments(&self) -> &[FieldAssignment] {
        &self.assignments
    }

    /// Render the `SET` update expression.
    pub fn expression(&self) -> String {
        let parts: Vec<String> = self
            .assignments
            .iter()
            .map(|a| format!("{} = {}", a.name_placeholder, a.value_placeholder))
            .collect();
        format!("SET {}", parts.join(", "))
    }

    /// Placeholder to attribute name map (`ExpressionAttributeNames`).
    pub fn attribute_names(&self) -> BTreeMap<String, String> {
        self.assignments
            .iter()
            .map(|a| (a.name_placeholder.clone(), a.field.clone()))
            .collect()
    }

    /// Placeholder to value map (`ExpressionAttributeValues`).
    pub fn attribute_values(&self) -> BTreeMap<String, Value> {
        self.assignments
            .iter()
            .map(|a| (a.value_placeholder.clone(), a.value.clone()))
            .collect()
    }

    /// Apply the assignments to a record in place.
    pub fn apply_to(&self, record: &mut Record) {
        for assignment in &self.assignments {
            record.insert(assignment.field.clone(), assignment.value.clone());
        }
    }
}

/// Build the update for a partial payload.
///
/// Only keys missing from the map are skipped: explicit `null`, `0`, `false`
/// and `""` are real mutations. Returns `None` when no caller field remains.
pub fn build_update(payload: &Record, now: DateTime<Utc>) -> Option<UpdateSpec> {
    let mut assignments: Vec<FieldAssignment> = payload
        .iter()
        .filter(|(field, _)| !PROTECTED_ATTRS.contains(&field.as_str()))
        .enumerate()
        .map(|(index, (field, value))| FieldAssignment {
            name_placeholder: format!("#field{index}"),
            value_placeholder: format!(":value{index}"),
            field: field.clone(),
            value: value.clone(),
        })
        .collect();

    if assignments.is_empty() {
        return None;
    }

    assignments.push(FieldAssignment {
        name_placeholder: "#updatedAt".to_string(),
        value_placeholder: ":updatedAt".to_string(),
        field: UPDATED_AT_ATTR.to_string(),
        value: Value::String(format_timestamp(now)),
    });

    Some(UpdateSpec { assignments })
}
