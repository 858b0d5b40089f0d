//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between JSON records and DynamoDB
//! AttributeValue maps. These are testable in isolation without DynamoDB
//! access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{Number, Value};

use talentdesk_core::entity::{Record, StorageKey, PARTITION_KEY_ATTR, SORT_KEY_ATTR};
use talentdesk_core::storage::{ContinuationKey, StoreError};

pub type Item = HashMap<String, AttributeValue>;

// ============================================================================
// JSON -> DynamoDB
// ============================================================================

/// Convert a JSON value to an AttributeValue.
pub fn value_to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(values) => AttributeValue::L(values.iter().map(value_to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(record_to_item(map)),
    }
}

/// Convert a record to a DynamoDB item.
pub fn record_to_item(record: &Record) -> Item {
    record
        .iter()
        .map(|(name, value)| (name.clone(), value_to_attribute(value)))
        .collect()
}

/// Build the primary key attributes for a storage key.
pub fn key_to_item(key: &StorageKey) -> Item {
    HashMap::from([
        (PARTITION_KEY_ATTR.to_string(), AttributeValue::S(key.pk.clone())),
        (SORT_KEY_ATTR.to_string(), AttributeValue::S(key.sk.clone())),
    ])
}

/// Convert a continuation key to an `ExclusiveStartKey`.
pub fn continuation_to_item(key: &ContinuationKey) -> Item {
    record_to_item(key.attributes())
}

// ============================================================================
// DynamoDB -> JSON
// ============================================================================

/// Convert an AttributeValue to a JSON value.
///
/// String, number and binary sets come back as arrays; binary values as
/// standard base64 strings.
pub fn attribute_to_value(attribute: &AttributeValue) -> Result<Value, StoreError> {
    Ok(match attribute {
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::N(n) => Value::Number(parse_number(n)?),
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::B(blob) => Value::String(STANDARD.encode(blob.as_ref())),
        AttributeValue::L(values) => Value::Array(
            values
                .iter()
                .map(attribute_to_value)
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::M(map) => Value::Object(item_to_record(map)?),
        AttributeValue::Ss(values) => {
            Value::Array(values.iter().cloned().map(Value::String).collect())
        }
        AttributeValue::Ns(values) => Value::Array(
            values
                .iter()
                .map(|n| parse_number(n).map(Value::Number))
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::Bs(values) => Value::Array(
            values
                .iter()
                .map(|blob| Value::String(STANDARD.encode(blob.as_ref())))
                .collect(),
        ),
        other => {
            return Err(StoreError::Serialization(format!(
                "Unsupported attribute value: {:?}",
                other
            )))
        }
    })
}

/// Convert a DynamoDB item to a record.
pub fn item_to_record(item: &Item) -> Result<Record, StoreError> {
    item.iter()
        .map(|(name, attribute)| attribute_to_value(attribute).map(|value| (name.clone(), value)))
        .collect()
}

/// Convert a `LastEvaluatedKey` to a continuation key.
pub fn item_to_continuation(item: &Item) -> Result<ContinuationKey, StoreError> {
    item_to_record(item).map(ContinuationKey::new)
}

fn parse_number(n: &str) -> Result<Number, StoreError> {
    if let Ok(i) = n.parse::<i64>() {
        return Ok(Number::from(i));
    }
    if let Ok(u) = n.parse::<u64>() {
        return Ok(Number::from(u));
    }
    n.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| StoreError::Serialization(format!("Invalid number attribute: {n}")))
}
