use async_trait::async_trait;

use crate::entity::{Record, StorageKey, UpdateSpec};

use super::{Result, ScanPage, ScanRequest};

/// Key-value store primitives used by the entity service.
///
/// Every call names its table explicitly; one store can serve several.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Writes an item, replacing any existing item with the same key.
    async fn put_item(&self, table: &str, item: &Record) -> Result<()>;

    /// Reads the item stored at `key`.
    async fn get_item(&self, table: &str, key: &StorageKey) -> Result<Option<Record>>;

    /// Applies `update` to an existing item and returns every attribute
    /// after the update.
    ///
    /// Fails with `StoreError::ConditionFailed` if no item exists at `key`.
    async fn update_item(
        &self,
        table: &str,
        key: &StorageKey,
        update: &UpdateSpec,
    ) -> Result<Record>;

    /// Deletes an existing item.
    ///
    /// Fails with `StoreError::ConditionFailed` if no item exists at `key`.
    async fn delete_item(&self, table: &str, key: &StorageKey) -> Result<()>;

    /// Scans one bounded page of items of a single entity type.
    async fn scan(&self, table: &str, request: &ScanRequest) -> Result<ScanPage>;
}
