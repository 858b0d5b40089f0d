//! Pure functions for mapping storage and entity errors to HTTP status codes.

use crate::entity::EntityError;

use super::StoreError;

/// Maps a [`StoreError`] to an HTTP status code.
///
/// - `ConditionFailed` -> 404 (the precondition is always "item exists")
/// - `ConnectionFailed` -> 503 (Service Unavailable)
/// - `QueryFailed`, `Serialization`, `InvalidData` -> 500
pub fn store_error_to_status_code(error: &StoreError) -> u16 {
    match error {
        StoreError::ConditionFailed => 404,
        StoreError::ConnectionFailed(_) => 503,
        StoreError::QueryFailed(_) => 500,
        StoreError::Serialization(_) => 500,
        StoreError::InvalidData(_) => 500,
    }
}

/// Maps an [`EntityError`] to an HTTP status code.
///
/// # Examples
///
/// ```
/// use talentdesk_core::entity::{EntityError, EntityType};
/// use talentdesk_core::storage::entity_error_to_status_code;
///
/// let error = EntityError::NotFound {
///     entity_type: EntityType::Job,
///     id: "abc-123".to_string(),
/// };
/// assert_eq!(entity_error_to_status_code(&error), 404);
/// ```
pub fn entity_error_to_status_code(error: &EntityError) -> u16 {
    match error {
        EntityError::NotFound { .. } => 404,
        EntityError::Store(store_error) => store_error_to_status_code(store_error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityType;

    #[test]
    fn test_not_found_maps_to_404() {
        let error = EntityError::NotFound {
            entity_type: EntityType::Company,
            id: "c-1".to_string(),
        };
        assert_eq!(entity_error_to_status_code(&error), 404);
    }

    #[test]
    fn test_connection_failed_maps_to_503() {
        let error = EntityError::Store(StoreError::ConnectionFailed("refused".to_string()));
        assert_eq!(entity_error_to_status_code(&error), 503);
    }

    #[test]
    fn test_query_failed_maps_to_500() {
        let error = StoreError::QueryFailed("Table not found".to_string());
        assert_eq!(store_error_to_status_code(&error), 500);
    }

    #[test]
    fn test_invalid_data_maps_to_500() {
        let error = StoreError::InvalidData("bad item".to_string());
        assert_eq!(store_error_to_status_code(&error), 500);
    }
}
