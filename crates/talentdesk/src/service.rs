//! Generic entity service.
//!
//! One [`EntityService`] per entity type, bound to its table at construction.
//! It composes the core codecs into store calls and turns the store's
//! existence-check failure into [`EntityError::NotFound`]. Every other store
//! failure is passed through untouched.

use std::sync::Arc;

use chrono::Utc;

use talentdesk_core::entity::{
    build_item, build_key, build_update, EntityError, EntityType, Record, ID_ATTR,
};
use talentdesk_core::pagination::{decode_cursor, encode_cursor, DEFAULT_PAGE_LIMIT};
use talentdesk_core::storage::{EntityStore, ScanRequest, StoreError};

use crate::config::ConfigError;

/// Paging input of [`EntityService::list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    pub limit: u32,
    /// Opaque cursor from a previous page.
    pub cursor: Option<String>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            cursor: None,
        }
    }
}

/// One page of records and the cursor of the next page, if any.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    pub items: Vec<Record>,
    pub next_cursor: Option<String>,
}

#[derive(Clone)]
pub struct EntityService {
    entity_type: EntityType,
    table_name: String,
    store: Arc<dyn EntityStore>,
}

impl std::fmt::Debug for EntityService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityService")
            .field("entity_type", &self.entity_type)
            .field("table_name", &self.table_name)
            .finish_non_exhaustive()
    }
}

impl EntityService {
    pub fn new(
        entity_type: EntityType,
        table_name: impl Into<String>,
        store: Arc<dyn EntityStore>,
    ) -> Result<Self, ConfigError> {
        let table_name = table_name.into();
        if table_name.trim().is_empty() {
            return Err(ConfigError::EmptyTableName(entity_type));
        }
        Ok(Self {
            entity_type,
            table_name,
            store,
        })
    }

    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Store a new record built from `payload` and return it.
    pub async fn create(&self, payload: Record) -> Result<Record, EntityError> {
        let item = build_item(self.entity_type, payload, Utc::now());

        self.store.put_item(&self.table_name, &item).await?;

        tracing::info!(
            entity_type = %self.entity_type,
            id = item.get(ID_ATTR).and_then(|v| v.as_str()).unwrap_or_default(),
            "Created entity"
        );
        Ok(item)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Record, EntityError> {
        let key = build_key(self.entity_type, id);

        self.store
            .get_item(&self.table_name, &key)
            .await?
            .ok_or_else(|| self.not_found(id))
    }

    /// Apply a partial update. An update with no caller fields returns the
    /// current record without writing.
    pub async fn update(&self, id: &str, payload: &Record) -> Result<Record, EntityError> {
        let Some(update) = build_update(payload, Utc::now()) else {
            tracing::debug!(entity_type = %self.entity_type, id = %id, "No fields to update");
            return self.find_by_id(id).await;
        };
        let key = build_key(self.entity_type, id);

        let record = self
            .store
            .update_item(&self.table_name, &key, &update)
            .await
            .map_err(|err| self.map_condition_failed(err, id))?;

        tracing::info!(
            entity_type = %self.entity_type,
            id = %id,
            fields = update.assignments().len() - 1,
            "Updated entity"
        );
        Ok(record)
    }

    pub async fn remove(&self, id: &str) -> Result<(), EntityError> {
        let key = build_key(self.entity_type, id);

        self.store
            .delete_item(&self.table_name, &key)
            .await
            .map_err(|err| self.map_condition_failed(err, id))?;

        tracing::info!(entity_type = %self.entity_type, id = %id, "Deleted entity");
        Ok(())
    }

    /// Scan one page of this entity type.
    ///
    /// An unreadable cursor, or one without a `pk`/`sk` pair, restarts from
    /// the beginning of the table.
    pub async fn list(&self, options: ListOptions) -> Result<Page, EntityError> {
        let exclusive_start_key = decode_cursor(options.cursor.as_deref())
            .filter(|key| key.storage_key().is_some());
        if options.cursor.is_some() && exclusive_start_key.is_none() {
            tracing::debug!(entity_type = %self.entity_type, "Ignoring malformed cursor");
        }

        let request = ScanRequest {
            entity_type: self.entity_type,
            limit: options.limit,
            exclusive_start_key,
        };
        let page = self.store.scan(&self.table_name, &request).await?;

        if page.items.is_empty() {
            tracing::warn!(entity_type = %self.entity_type, "Scan returned no items");
        }

        Ok(Page {
            items: page.items,
            next_cursor: encode_cursor(page.last_evaluated_key.as_ref()),
        })
    }

    fn not_found(&self, id: &str) -> EntityError {
        EntityError::NotFound {
            entity_type: self.entity_type,
            id: id.to_string(),
        }
    }

    fn map_condition_failed(&self, err: StoreError, id: &str) -> EntityError {
        match err {
            StoreError::ConditionFailed => self.not_found(id),
            other => EntityError::Store(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::{json, Value};
    use talentdesk_core::entity::{StorageKey, UpdateSpec};
    use talentdesk_core::storage::ScanPage;

    use crate::storage::InMemoryStore;

    const TABLE: &str = "talentdesk-test";

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    fn service(entity_type: EntityType, store: &InMemoryStore) -> EntityService {
        EntityService::new(entity_type, TABLE, Arc::new(store.clone())).unwrap()
    }

    fn id_of(record: &Record) -> String {
        record[ID_ATTR].as_str().unwrap().to_string()
    }

    /// Store that fails every call with a connection error.
    struct UnreachableStore;

    #[async_trait]
    impl EntityStore for UnreachableStore {
        async fn put_item(&self, _: &str, _: &Record) -> talentdesk_core::storage::Result<()> {
            Err(StoreError::ConnectionFailed("refused".to_string()))
        }

        async fn get_item(
            &self,
            _: &str,
            _: &StorageKey,
        ) -> talentdesk_core::storage::Result<Option<Record>> {
            Err(StoreError::ConnectionFailed("refused".to_string()))
        }

        async fn update_item(
            &self,
            _: &str,
            _: &StorageKey,
            _: &UpdateSpec,
        ) -> talentdesk_core::storage::Result<Record> {
            Err(StoreError::ConnectionFailed("refused".to_string()))
        }

        async fn delete_item(
            &self,
            _: &str,
            _: &StorageKey,
        ) -> talentdesk_core::storage::Result<()> {
            Err(StoreError::ConnectionFailed("refused".to_string()))
        }

        async fn scan(
            &self,
            _: &str,
            _: &ScanRequest,
        ) -> talentdesk_core::storage::Result<ScanPage> {
            Err(StoreError::ConnectionFailed("refused".to_string()))
        }
    }

    #[test]
    fn test_empty_table_name_is_rejected() {
        let store = Arc::new(InMemoryStore::new());
        let err = EntityService::new(EntityType::Job, "  ", store).unwrap_err();
        assert_eq!(err, ConfigError::EmptyTableName(EntityType::Job));
    }

    #[tokio::test]
    async fn test_create_then_find() {
        let store = InMemoryStore::new();
        for entity_type in EntityType::ALL {
            let service = service(entity_type, &store);
            let created = service
                .create(record(json!({"guid_id": "G1", "score": 7})))
                .await
                .unwrap();

            let found = service.find_by_id(&id_of(&created)).await.unwrap();
            assert_eq!(found, created);
            assert_eq!(found["entityType"], entity_type.as_str());
            assert_eq!(found["guid_id"], "G1");
            assert_eq!(found["score"], 7);
            assert_eq!(found["createdAt"], found["updatedAt"]);
        }
    }

    #[tokio::test]
    async fn test_same_id_different_types_do_not_collide() {
        let store = InMemoryStore::new();
        let candidates = service(EntityType::Candidate, &store);
        let jobs = service(EntityType::Job, &store);

        candidates
            .create(record(json!({"id": "shared", "who": "candidate"})))
            .await
            .unwrap();
        jobs.create(record(json!({"id": "shared", "who": "job"})))
            .await
            .unwrap();

        assert_eq!(candidates.find_by_id("shared").await.unwrap()["who"], "candidate");
        assert_eq!(jobs.find_by_id("shared").await.unwrap()["who"], "job");
    }

    #[tokio::test]
    async fn test_find_missing_is_not_found() {
        let store = InMemoryStore::new();
        let err = service(EntityType::Company, &store)
            .find_by_id("nope")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            EntityError::NotFound {
                entity_type: EntityType::Company,
                id: "nope".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_create_then_update_scenario() {
        let store = InMemoryStore::new();
        let service = service(EntityType::Candidate, &store);

        let created = service
            .create(record(json!({"guid_id": "G1"})))
            .await
            .unwrap();
        assert_eq!(created["entityType"], "candidate");
        assert_eq!(created["createdAt"], created["updatedAt"]);
        assert!(!id_of(&created).is_empty());

        tokio::time::sleep(Duration::from_millis(5)).await;

        let updated = service
            .update(&id_of(&created), &record(json!({"name": "X"})))
            .await
            .unwrap();
        assert_eq!(updated["name"], "X");
        assert_eq!(updated["guid_id"], "G1");
        assert_eq!(updated["createdAt"], created["createdAt"]);
        // Same fixed-width format, so string order is time order.
        assert!(updated["updatedAt"].as_str().unwrap() > created["updatedAt"].as_str().unwrap());
    }

    #[tokio::test]
    async fn test_update_keeps_falsy_values() {
        let store = InMemoryStore::new();
        let service = service(EntityType::User, &store);
        let created = service
            .create(record(json!({"username": "ana", "role": "admin", "active": true})))
            .await
            .unwrap();

        let updated = service
            .update(
                &id_of(&created),
                &record(json!({"active": false, "logins": 0, "nickname": null})),
            )
            .await
            .unwrap();
        assert_eq!(updated["active"], false);
        assert_eq!(updated["logins"], 0);
        assert_eq!(updated["nickname"], Value::Null);
    }

    #[tokio::test]
    async fn test_update_ignores_immutable_fields() {
        let store = InMemoryStore::new();
        let service = service(EntityType::Job, &store);
        let created = service
            .create(record(json!({"guid_id": "J1"})))
            .await
            .unwrap();
        let id = id_of(&created);

        let updated = service
            .update(
                &id,
                &record(json!({"id": "other", "entityType": "user", "title": "Dev"})),
            )
            .await
            .unwrap();
        assert_eq!(updated["id"], id.as_str());
        assert_eq!(updated["entityType"], "job");
        assert_eq!(updated["title"], "Dev");
    }

    #[tokio::test]
    async fn test_empty_update_returns_current_record() {
        let store = InMemoryStore::new();
        let service = service(EntityType::Company, &store);
        let created = service
            .create(record(json!({"cd_cnpj": "123"})))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(5)).await;

        let same = service.update(&id_of(&created), &Record::new()).await.unwrap();
        assert_eq!(same, created);

        // Only protected fields: still a no-op.
        let same = service
            .update(&id_of(&created), &record(json!({"id": "x", "entityType": "job"})))
            .await
            .unwrap();
        assert_eq!(same["updatedAt"], created["updatedAt"]);
    }

    #[tokio::test]
    async fn test_empty_update_on_missing_is_not_found() {
        let store = InMemoryStore::new();
        let err = service(EntityType::Company, &store)
            .update("ghost", &Record::new())
            .await
            .unwrap_err();
        assert!(matches!(err, EntityError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_missing_does_not_create() {
        let store = InMemoryStore::new();
        let service = service(EntityType::Candidate, &store);

        let err = service
            .update("ghost", &record(json!({"name": "X"})))
            .await
            .unwrap_err();
        assert!(matches!(err, EntityError::NotFound { .. }));
        assert!(service.find_by_id("ghost").await.is_err());
    }

    #[tokio::test]
    async fn test_remove() {
        let store = InMemoryStore::new();
        let service = service(EntityType::User, &store);
        let created = service
            .create(record(json!({"username": "bob", "role": "viewer"})))
            .await
            .unwrap();
        let id = id_of(&created);

        service.remove(&id).await.unwrap();

        assert!(matches!(
            service.find_by_id(&id).await,
            Err(EntityError::NotFound { .. })
        ));
        assert!(matches!(
            service.remove(&id).await,
            Err(EntityError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_pages_through_one_type() {
        let store = InMemoryStore::new();
        let candidates = service(EntityType::Candidate, &store);
        let jobs = service(EntityType::Job, &store);

        for i in 0..5 {
            candidates
                .create(record(json!({"guid_id": format!("C{i}")})))
                .await
                .unwrap();
        }
        for i in 0..3 {
            jobs.create(record(json!({"guid_id": format!("J{i}")})))
                .await
                .unwrap();
        }

        let first = jobs
            .list(ListOptions {
                limit: 2,
                cursor: None,
            })
            .await
            .unwrap();
        assert_eq!(first.items.len(), 2);
        assert!(first.items.iter().all(|r| r["entityType"] == "job"));
        assert!(first.next_cursor.is_some());

        let second = jobs
            .list(ListOptions {
                limit: 2,
                cursor: first.next_cursor,
            })
            .await
            .unwrap();
        assert_eq!(second.items.len(), 1);
        assert!(second.next_cursor.is_none());

        let mut seen: Vec<String> = first
            .items
            .iter()
            .chain(second.items.iter())
            .map(|r| r["guid_id"].as_str().unwrap().to_string())
            .collect();
        seen.sort();
        assert_eq!(seen, vec!["J0", "J1", "J2"]);

        let mut all = Vec::new();
        let mut cursor = None;
        loop {
            let page = candidates
                .list(ListOptions { limit: 2, cursor })
                .await
                .unwrap();
            all.extend(page.items);
            cursor = page.next_cursor;
            if cursor.is_none() {
                break;
            }
        }
        assert_eq!(all.len(), 5);
    }

    #[tokio::test]
    async fn test_list_malformed_cursor_starts_over() {
        let store = InMemoryStore::new();
        let service = service(EntityType::Job, &store);
        service
            .create(record(json!({"guid_id": "J"})))
            .await
            .unwrap();

        let page = service
            .list(ListOptions {
                limit: 10,
                cursor: Some("%%%not-a-cursor".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
    }

    #[tokio::test]
    async fn test_list_cursor_without_key_starts_over() {
        use base64::Engine;

        let store = InMemoryStore::new();
        let service = service(EntityType::Job, &store);
        service
            .create(record(json!({"guid_id": "J"})))
            .await
            .unwrap();

        let cursor = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(r#"{"other":1}"#);
        let page = service
            .list(ListOptions {
                limit: 10,
                cursor: Some(cursor),
            })
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
    }

    #[tokio::test]
    async fn test_store_errors_pass_through() {
        let service =
            EntityService::new(EntityType::Job, TABLE, Arc::new(UnreachableStore)).unwrap();
        let expected = EntityError::Store(StoreError::ConnectionFailed("refused".to_string()));

        assert_eq!(service.create(Record::new()).await.unwrap_err(), expected);
        assert_eq!(service.find_by_id("x").await.unwrap_err(), expected);
        assert_eq!(
            service
                .update("x", &record(json!({"a": 1})))
                .await
                .unwrap_err(),
            expected
        );
        assert_eq!(service.remove("x").await.unwrap_err(), expected);
        assert_eq!(
            service.list(ListOptions::default()).await.unwrap_err(),
            expected
        );
    }
}
