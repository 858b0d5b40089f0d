mod error;
mod item;
mod keys;
mod types;
mod update;
mod validation;

pub use error::{EntityError, ParseEntityTypeError, ValidationError};
pub use item::{build_item, format_timestamp};
pub use keys::{build_key, StorageKey, ENTITY_SORT_KEY, PARTITION_KEY_ATTR, SORT_KEY_ATTR};
pub use types::{
    EntityType, Record, CREATED_AT_ATTR, ENTITY_TYPE_ATTR, ID_ATTR, UPDATED_AT_ATTR,
};
pub use update::{build_update, FieldAssignment, UpdateSpec};
pub use validation::{missing_required_fields, validate_required_fields};
