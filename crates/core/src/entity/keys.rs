//! Storage key generation.
//!
//! Every entity lives in one shared table. The partition key embeds the
//! entity type so identical ids of different types never collide.

use serde::{Deserialize, Serialize};

use super::EntityType;

pub const PARTITION_KEY_ATTR: &str = "pk";
pub const SORT_KEY_ATTR: &str = "sk";

/// Sort key shared by every entity item.
pub const ENTITY_SORT_KEY: &str = "ENTITY";

/// Composite primary key of an entity item.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StorageKey {
    pub pk: String,
    pub sk: String,
}

/// Generate the storage key for an entity.
///
/// Pattern: `<ENTITY_TYPE>#<id>` / `ENTITY`
pub fn build_key(entity_type: EntityType, id: &str) -> StorageKey {
    StorageKey {
        pk: format!("{}#{}", entity_type.as_str().to_uppercase(), id),
        sk: ENTITY_SORT_KEY.to_string(),
    }
}
