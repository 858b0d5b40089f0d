//! In-memory store implementation.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use talentdesk_core::entity::{
    Record, StorageKey, UpdateSpec, ENTITY_TYPE_ATTR, PARTITION_KEY_ATTR, SORT_KEY_ATTR,
};
use talentdesk_core::storage::{
    ContinuationKey, EntityStore, Result, ScanPage, ScanRequest, StoreError,
};

type Table = BTreeMap<StorageKey, Record>;

/// In-memory storage backend.
///
/// Tables are created on first write and kept in key order, so scans are
/// deterministic. Unlike DynamoDB, a scan applies the entity-type filter
/// before the limit: every page is full until the table is exhausted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<HashMap<String, Table>>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntityStore for InMemoryStore {
    async fn put_item(&self, table: &str, item: &Record) -> Result<()> {
        let key = item_key(item)?;
        let mut tables = self.tables.write().await;
        tables
            .entry(table.to_string())
            .or_default()
            .insert(key, item.clone());
        Ok(())
    }

    async fn get_item(&self, table: &str, key: &StorageKey) -> Result<Option<Record>> {
        let tables = self.tables.read().await;
        Ok(tables.get(table).and_then(|t| t.get(key)).cloned())
    }

    async fn update_item(
        &self,
        table: &str,
        key: &StorageKey,
        update: &UpdateSpec,
    ) -> Result<Record> {
        let mut tables = self.tables.write().await;
        let item = tables
            .get_mut(table)
            .and_then(|t| t.get_mut(key))
            .ok_or(StoreError::ConditionFailed)?;
        update.apply_to(item);
        Ok(item.clone())
    }

    async fn delete_item(&self, table: &str, key: &StorageKey) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables
            .get_mut(table)
            .and_then(|t| t.remove(key))
            .map(|_| ())
            .ok_or(StoreError::ConditionFailed)
    }

    async fn scan(&self, table: &str, request: &ScanRequest) -> Result<ScanPage> {
        let tables = self.tables.read().await;
        let Some(items) = tables.get(table) else {
            return Ok(ScanPage::default());
        };

        let start = match &request.exclusive_start_key {
            Some(continuation) => {
                let key = continuation.storage_key().ok_or_else(|| {
                    StoreError::InvalidData("exclusive start key must carry pk and sk".to_string())
                })?;
                Bound::Excluded(key)
            }
            None => Bound::Unbounded,
        };

        let entity_type = request.entity_type.as_str();
        let mut matching = items
            .range((start, Bound::Unbounded))
            .filter(|(_, item)| {
                item.get(ENTITY_TYPE_ATTR).and_then(Value::as_str) == Some(entity_type)
            });

        let limit = request.limit.max(1) as usize;
        let page: Vec<(&StorageKey, &Record)> = matching.by_ref().take(limit).collect();
        let has_more = matching.next().is_some();

        let last_evaluated_key = match page.last() {
            Some((key, _)) if has_more => Some(ContinuationKey::from(*key)),
            _ => None,
        };

        Ok(ScanPage {
            items: page.into_iter().map(|(_, item)| item.clone()).collect(),
            last_evaluated_key,
        })
    }
}

fn item_key(item: &Record) -> Result<StorageKey> {
    let attr = |name: &str| {
        item.get(name)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| StoreError::InvalidData(format!("item is missing string attribute {name}")))
    };
    Ok(StorageKey {
        pk: attr(PARTITION_KEY_ATTR)?,
        sk: attr(SORT_KEY_ATTR)?,
    })
}
