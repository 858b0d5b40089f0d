use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entity::{EntityType, Record, StorageKey, PARTITION_KEY_ATTR, SORT_KEY_ATTR};

/// Where a bounded scan should resume: the store's last evaluated key.
///
/// Kept as a plain attribute map so it round-trips through a cursor without
/// the service having to know its shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContinuationKey(Record);

impl ContinuationKey {
    pub fn new(attributes: Record) -> Self {
        Self(attributes)
    }

    pub fn attributes(&self) -> &Record {
        &self.0
    }

    pub fn into_attributes(self) -> Record {
        self.0
    }

    /// Reads the `pk`/`sk` pair, if both are strings.
    pub fn storage_key(&self) -> Option<StorageKey> {
        let pk = self.0.get(PARTITION_KEY_ATTR)?.as_str()?;
        let sk = self.0.get(SORT_KEY_ATTR)?.as_str()?;
        Some(StorageKey {
            pk: pk.to_string(),
            sk: sk.to_string(),
        })
    }
}

impl From<&StorageKey> for ContinuationKey {
    fn from(key: &StorageKey) -> Self {
        let mut attributes = Record::new();
        attributes.insert(PARTITION_KEY_ATTR.to_string(), Value::String(key.pk.clone()));
        attributes.insert(SORT_KEY_ATTR.to_string(), Value::String(key.sk.clone()));
        Self(attributes)
    }
}

/// A single scan call filtered to one entity type.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanRequest {
    pub entity_type: EntityType,
    pub limit: u32,
    pub exclusive_start_key: Option<ContinuationKey>,
}

/// One page of scan results.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScanPage {
    pub items: Vec<Record>,
    /// Present when the scan stopped before the end of the table.
    pub last_evaluated_key: Option<ContinuationKey>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::build_key;

    #[test]
    fn test_storage_key_round_trip() {
        let key = build_key(EntityType::Candidate, "c-1");
        let continuation = ContinuationKey::from(&key);
        assert_eq!(continuation.storage_key(), Some(key));
    }

    #[test]
    fn test_storage_key_requires_both_attributes() {
        let mut attributes = Record::new();
        attributes.insert("pk".to_string(), Value::String("JOB#1".to_string()));
        assert_eq!(ContinuationKey::new(attributes).storage_key(), None);
    }
}
