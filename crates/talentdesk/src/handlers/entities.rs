//! CRUD handlers shared by every entity type.
//!
//! Each collection router carries its [`EntityType`] as a request extension,
//! so one set of handlers serves candidates, companies, users and jobs.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::Value;

use talentdesk_core::entity::{validate_required_fields, EntityType, Record, ValidationError};
use talentdesk_core::pagination::parse_limit;

use crate::{
    handlers::{
        response::{Data, ListBody},
        AppError,
    },
    service::ListOptions,
    state::AppState,
};

/// Query parameters for listing entities.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Page size, clamped to `[1, 100]` (default: 20)
    pub limit: Option<String>,
    /// Cursor returned by the previous page
    #[serde(rename = "lastKey")]
    pub last_key: Option<String>,
}

/// Turn the extracted body into a record, rejecting non-object JSON.
fn json_object(payload: Result<Json<Value>, JsonRejection>) -> Result<Record, ValidationError> {
    match payload {
        Ok(Json(Value::Object(record))) => Ok(record),
        Ok(Json(_)) => Err(ValidationError::new("Request body must be a JSON object")),
        Err(rejection) => Err(ValidationError::new(rejection.body_text())),
    }
}

/// Create an entity (POST /api/{collection}).
pub async fn create_entity(
    State(state): State<AppState>,
    Extension(entity_type): Extension<EntityType>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Data<Record>>), AppError> {
    let payload = json_object(payload)?;
    validate_required_fields(&payload, entity_type.required_fields())?;

    let record = state.service(entity_type).create(payload).await?;

    Ok((StatusCode::CREATED, Json(Data::new(record))))
}

/// List one page of entities (GET /api/{collection}).
pub async fn list_entities(
    State(state): State<AppState>,
    Extension(entity_type): Extension<EntityType>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Data<ListBody>>, AppError> {
    let options = ListOptions {
        limit: parse_limit(query.limit.as_deref()),
        cursor: query.last_key,
    };
    tracing::debug!(entity_type = %entity_type, limit = options.limit, "Listing entities");

    let page = state.service(entity_type).list(options).await?;

    Ok(Json(Data::new(ListBody {
        items: page.items,
        last_key: page.next_cursor,
    })))
}

/// Get a single entity (GET /api/{collection}/{id}).
pub async fn get_entity(
    State(state): State<AppState>,
    Extension(entity_type): Extension<EntityType>,
    Path(id): Path<String>,
) -> Result<Json<Data<Record>>, AppError> {
    let record = state.service(entity_type).find_by_id(&id).await?;
    Ok(Json(Data::new(record)))
}

/// Partially update an entity (PUT /api/{collection}/{id}).
pub async fn update_entity(
    State(state): State<AppState>,
    Extension(entity_type): Extension<EntityType>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Data<Record>>, AppError> {
    let payload = json_object(payload)?;

    let record = state.service(entity_type).update(&id, &payload).await?;

    Ok(Json(Data::new(record)))
}

/// Delete an entity (DELETE /api/{collection}/{id}).
pub async fn delete_entity(
    State(state): State<AppState>,
    Extension(entity_type): Extension<EntityType>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.service(entity_type).remove(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_object_accepts_objects() {
        let record = json_object(Ok(Json(json!({"a": 1})))).unwrap();
        assert_eq!(record["a"], 1);
    }

    #[test]
    fn test_json_object_rejects_other_values() {
        for value in [json!([1, 2]), json!("text"), json!(null)] {
            let err = json_object(Ok(Json(value))).unwrap_err();
            assert_eq!(err.message, "Request body must be a JSON object");
        }
    }
}
