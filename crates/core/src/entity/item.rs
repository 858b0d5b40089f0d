//! Item construction for new entities.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use uuid::Uuid;

use super::keys::{build_key, PARTITION_KEY_ATTR, SORT_KEY_ATTR};
use super::{EntityType, Record, CREATED_AT_ATTR, ENTITY_TYPE_ATTR, ID_ATTR, UPDATED_AT_ATTR};

/// Format a timestamp the way it is stored: UTC, millisecond precision,
/// `Z` suffix (`2024-01-15T10:30:00.000Z`).
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Build the full item for a new entity from a caller payload.
///
/// Caller fields are kept, then the envelope is written over them: `id`
/// (payload value if it is a non-empty string, otherwise a new UUID),
/// `entityType`, `pk`, `sk`, `createdAt` (payload value if it is a non-empty
/// string, otherwise `now`) and `updatedAt` (always `now`).
pub fn build_item(entity_type: EntityType, payload: Record, now: DateTime<Utc>) -> Record {
    let id = non_empty_string(payload.get(ID_ATTR)).unwrap_or_else(|| Uuid::new_v4().to_string());
    let now = format_timestamp(now);
    let created_at = non_empty_string(payload.get(CREATED_AT_ATTR)).unwrap_or_else(|| now.clone());
    let key = build_key(entity_type, &id);

    let mut item = payload;
    item.insert(ID_ATTR.to_string(), Value::String(id));
    item.insert(
        ENTITY_TYPE_ATTR.to_string(),
        Value::String(entity_type.as_str().to_string()),
    );
    item.insert(PARTITION_KEY_ATTR.to_string(), Value::String(key.pk));
    item.insert(SORT_KEY_ATTR.to_string(), Value::String(key.sk));
    item.insert(CREATED_AT_ATTR.to_string(), Value::String(created_at));
    item.insert(UPDATED_AT_ATTR.to_string(), Value::String(now));
    item
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}
