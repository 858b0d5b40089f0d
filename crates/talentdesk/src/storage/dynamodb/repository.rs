//! DynamoDB store implementation.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;

use talentdesk_core::entity::{Record, StorageKey, UpdateSpec, ENTITY_TYPE_ATTR};
use talentdesk_core::storage::{EntityStore, Result, ScanPage, ScanRequest, StoreError};

use super::conversions::{
    continuation_to_item, item_to_continuation, item_to_record, key_to_item, record_to_item,
    value_to_attribute,
};
use super::error::{
    map_delete_item_error, map_get_item_error, map_put_item_error, map_scan_error,
    map_update_item_error,
};

/// Guard used by update and delete: the item must already exist.
const ITEM_EXISTS_CONDITION: &str = "attribute_exists(pk)";

/// DynamoDB-based store.
#[derive(Debug, Clone)]
pub struct DynamoDbStore {
    client: Client,
}

impl DynamoDbStore {
    /// Creates a new store with the given DynamoDB client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a new store from environment configuration.
    ///
    /// Uses the AWS SDK default credential chain. `AWS_ENDPOINT_URL` points
    /// the client at a local DynamoDB; `AWS_REGION` defaults to `us-east-1`.
    pub async fn from_env() -> Self {
        let region = std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string());
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region));

        if let Ok(endpoint) = std::env::var("AWS_ENDPOINT_URL") {
            tracing::info!(endpoint = %endpoint, "Using custom DynamoDB endpoint");
            loader = loader.endpoint_url(endpoint);
        }

        let config = loader.load().await;
        Self::new(Client::new(&config))
    }
}

#[async_trait]
impl EntityStore for DynamoDbStore {
    async fn put_item(&self, table: &str, item: &Record) -> Result<()> {
        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(record_to_item(item)))
            .send()
            .await
            .map_err(map_put_item_error)?;

        Ok(())
    }

    async fn get_item(&self, table: &str, key: &StorageKey) -> Result<Option<Record>> {
        let result = self
            .client
            .get_item()
            .table_name(table)
            .set_key(Some(key_to_item(key)))
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(item_to_record(&item)?)),
            None => Ok(None),
        }
    }

    async fn update_item(
        &self,
        table: &str,
        key: &StorageKey,
        update: &UpdateSpec,
    ) -> Result<Record> {
        let mut request = self
            .client
            .update_item()
            .table_name(table)
            .set_key(Some(key_to_item(key)))
            .update_expression(update.expression())
            .condition_expression(ITEM_EXISTS_CONDITION)
            .return_values(ReturnValue::AllNew);

        for (placeholder, name) in update.attribute_names() {
            request = request.expression_attribute_names(placeholder, name);
        }
        for (placeholder, value) in update.attribute_values() {
            request = request.expression_attribute_values(placeholder, value_to_attribute(&value));
        }

        let result = request.send().await.map_err(map_update_item_error)?;

        let attributes = result.attributes.ok_or_else(|| {
            StoreError::InvalidData("UpdateItem returned no attributes".to_string())
        })?;
        item_to_record(&attributes)
    }

    async fn delete_item(&self, table: &str, key: &StorageKey) -> Result<()> {
        self.client
            .delete_item()
            .table_name(table)
            .set_key(Some(key_to_item(key)))
            .condition_expression(ITEM_EXISTS_CONDITION)
            .send()
            .await
            .map_err(map_delete_item_error)?;

        Ok(())
    }

    /// DynamoDB applies `Limit` before the filter, so a page may hold fewer
    /// items than requested while a continuation key is still returned.
    async fn scan(&self, table: &str, request: &ScanRequest) -> Result<ScanPage> {
        let limit = i32::try_from(request.limit).unwrap_or(i32::MAX);

        let result = self
            .client
            .scan()
            .table_name(table)
            .limit(limit)
            .filter_expression("#entityType = :entityType")
            .expression_attribute_names("#entityType", ENTITY_TYPE_ATTR)
            .expression_attribute_values(
                ":entityType",
                AttributeValue::S(request.entity_type.as_str().to_string()),
            )
            .set_exclusive_start_key(
                request
                    .exclusive_start_key
                    .as_ref()
                    .map(continuation_to_item),
            )
            .send()
            .await
            .map_err(map_scan_error)?;

        let items = result
            .items
            .unwrap_or_default()
            .iter()
            .map(item_to_record)
            .collect::<Result<Vec<_>>>()?;

        let last_evaluated_key = result
            .last_evaluated_key
            .as_ref()
            .filter(|key| !key.is_empty())
            .map(item_to_continuation)
            .transpose()?;

        Ok(ScanPage {
            items,
            last_evaluated_key,
        })
    }
}
