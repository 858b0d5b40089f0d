//! Seed command implementation.

use super::error::{DynamodbError, Result};
use aws_sdk_dynamodb::types::{AttributeValue, PutRequest, WriteRequest};
use aws_sdk_dynamodb::Client;
use chrono::Utc;
use serde_json::{json, Value};
use std::collections::HashMap;
use talentdesk_core::entity::{build_item, EntityType, Record, ID_ATTR};
use uuid::Uuid;

const FIRST_NAMES: [&str; 8] = [
    "Ana", "Bruno", "Carla", "Diego", "Elisa", "Felipe", "Gabriela", "Hugo",
];
const LAST_NAMES: [&str; 6] = ["Silva", "Souza", "Costa", "Pereira", "Almeida", "Rocha"];
const COMPANY_NAMES: [&str; 5] = ["Acme", "Globex", "Initech", "Umbrella", "Hooli"];
const JOB_TITLES: [&str; 6] = [
    "Backend Engineer",
    "Data Analyst",
    "Product Manager",
    "QA Engineer",
    "Designer",
    "Recruiter",
];
const ROLES: [&str; 3] = ["admin", "recruiter", "viewer"];

/// Sample payload for the `index`-th record of an entity type. Every payload
/// carries the fields the API requires on create.
pub fn sample_payload(entity_type: EntityType, index: u32) -> Record {
    let i = index as usize;
    let first = FIRST_NAMES[i % FIRST_NAMES.len()];
    let last = LAST_NAMES[i % LAST_NAMES.len()];

    let value = match entity_type {
        EntityType::Candidate => json!({
            "guid_id": Uuid::new_v4().to_string(),
            "name": format!("{first} {last}"),
            "email": format!("{}.{}{index}@example.com", first.to_lowercase(), last.to_lowercase()),
        }),
        EntityType::Company => json!({
            "cd_cnpj": format!("{:014}", 11_222_333_000_100u64 + index as u64),
            "name": format!("{} {index}", COMPANY_NAMES[i % COMPANY_NAMES.len()]),
        }),
        EntityType::User => json!({
            "username": format!("{}{index}", first.to_lowercase()),
            "role": ROLES[i % ROLES.len()],
        }),
        EntityType::Job => json!({
            "guid_id": Uuid::new_v4().to_string(),
            "title": JOB_TITLES[i % JOB_TITLES.len()],
            "openings": 1 + index % 3,
            "remote": index % 2 == 0,
        }),
    };

    match value {
        Value::Object(record) => record,
        _ => Record::new(),
    }
}

/// Build the complete items to insert.
pub fn generate_seed_items(entity_type: EntityType, count: u32) -> Vec<Record> {
    let now = Utc::now();
    (0..count)
        .map(|index| build_item(entity_type, sample_payload(entity_type, index), now))
        .collect()
}

/// One-line summary of a seed item for the preview.
pub fn describe_item(item: &Record) -> String {
    let id = item.get(ID_ATTR).and_then(Value::as_str).unwrap_or("?");
    let label = ["name", "title", "username"]
        .iter()
        .find_map(|field| item.get(*field).and_then(Value::as_str))
        .unwrap_or("");
    format!("{id} {label}")
}

/// Convert a flat sample value to a DynamoDB attribute.
fn to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        other => AttributeValue::S(other.to_string()),
    }
}

fn record_to_item(record: &Record) -> HashMap<String, AttributeValue> {
    record
        .iter()
        .map(|(name, value)| (name.clone(), to_attribute(value)))
        .collect()
}

/// Insert items into DynamoDB.
pub async fn seed_items(client: &Client, table_name: &str, items: &[Record]) -> Result<u32> {
    let mut inserted = 0;

    // Use batch write for efficiency (25 items per batch max)
    for chunk in items.chunks(25) {
        let write_requests = chunk
            .iter()
            .map(|item| {
                let put = PutRequest::builder()
                    .set_item(Some(record_to_item(item)))
                    .build()
                    .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;
                Ok(WriteRequest::builder().put_request(put).build())
            })
            .collect::<Result<Vec<_>>>()?;

        let output = client
            .batch_write_item()
            .request_items(table_name, write_requests)
            .send()
            .await
            .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;

        let unprocessed = output
            .unprocessed_items()
            .and_then(|items| items.get(table_name))
            .map_or(0, Vec::len);
        if unprocessed > 0 {
            return Err(DynamodbError::SeedIncomplete {
                table_name: table_name.to_string(),
                inserted: inserted + (chunk.len() - unprocessed) as u32,
                unprocessed,
            });
        }

        inserted += chunk.len() as u32;
    }

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use talentdesk_core::entity::{missing_required_fields, PARTITION_KEY_ATTR};

    #[test]
    fn test_samples_carry_required_fields() {
        for entity_type in EntityType::ALL {
            for index in 0..5 {
                let payload = sample_payload(entity_type, index);
                assert!(
                    missing_required_fields(&payload, entity_type.required_fields()).is_empty(),
                    "{entity_type} #{index}"
                );
            }
        }
    }

    #[test]
    fn test_generated_items_are_keyed() {
        let items = generate_seed_items(EntityType::Company, 3);
        assert_eq!(items.len(), 3);
        for item in &items {
            let pk = item[PARTITION_KEY_ATTR].as_str().unwrap();
            assert!(pk.starts_with("COMPANY#"));
            assert_eq!(item["entityType"], "company");
        }
    }

    #[test]
    fn test_record_to_item() {
        let item = record_to_item(&sample_payload(EntityType::Job, 0));
        assert_eq!(item["openings"], AttributeValue::N("1".to_string()));
        assert_eq!(item["remote"], AttributeValue::Bool(true));
        assert!(matches!(item["title"], AttributeValue::S(_)));
    }

    #[test]
    fn test_describe_item() {
        let item = generate_seed_items(EntityType::User, 1).remove(0);
        let line = describe_item(&item);
        assert!(line.ends_with(" ana0"));
    }
}
