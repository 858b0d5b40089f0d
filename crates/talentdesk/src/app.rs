use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use talentdesk_core::entity::EntityType;

use crate::{
    handlers::{
        entities::{create_entity, delete_entity, get_entity, list_entities, update_entity},
        error::ErrorBody,
        health::health,
        zip::get_location_by_zip,
    },
    state::AppState,
};

/// CRUD routes of one collection, tagged with its entity type.
fn entity_routes(entity_type: EntityType) -> Router<AppState> {
    Router::new()
        .route("/", get(list_entities).post(create_entity))
        .route(
            "/{id}",
            get(get_entity).put(update_entity).delete(delete_entity),
        )
        .layer(Extension(entity_type))
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody::new("Resource not found")),
    )
}

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = EntityType::ALL
        .into_iter()
        .fold(Router::new(), |router, entity_type| {
            router.nest(
                &format!("/{}", entity_type.collection()),
                entity_routes(entity_type),
            )
        })
        .route("/zip/{zip}", get(get_location_by_zip))
        .layer(cors);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}
