use axum::{
    extract::{Path, State},
    Json,
};

use talentdesk_core::zip::Location;

use crate::{
    handlers::{response::Data, AppError},
    state::AppState,
};

/// Resolve a postal code to state and city (GET /api/zip/{zip}).
pub async fn get_location_by_zip(
    State(state): State<AppState>,
    Path(zip): Path<String>,
) -> Result<Json<Data<Location>>, AppError> {
    tracing::info!(zip = %zip, "Zip lookup requested");

    let location = state.zip_client.lookup(&zip).await?;

    Ok(Json(Data::new(location)))
}
