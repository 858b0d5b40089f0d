use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use talentdesk_core::entity::{EntityError, ValidationError};
use talentdesk_core::storage::entity_error_to_status_code;
use talentdesk_core::zip::{zip_error_to_status_code, ZipError};

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// JSON error body: `{"message": ..., "details": ...}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
        }
    }
}

/// Handler error wrapping `anyhow::Error`.
///
/// The status code and body are picked by downcasting to the domain errors;
/// anything unrecognized is a 500 with a generic message.
pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status_and_body(&self) -> (StatusCode, ErrorBody) {
        if let Some(err) = self.0.downcast_ref::<ValidationError>() {
            return (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    message: err.message.clone(),
                    details: err.details.clone(),
                },
            );
        }

        if let Some(err) = self.0.downcast_ref::<EntityError>() {
            let status = status_from(entity_error_to_status_code(err));
            return match err {
                EntityError::NotFound { .. } => (status, ErrorBody::new(err.to_string())),
                EntityError::Store(_) => (status, ErrorBody::new(INTERNAL_ERROR_MESSAGE)),
            };
        }

        if let Some(err) = self.0.downcast_ref::<ZipError>() {
            let status = status_from(zip_error_to_status_code(err));
            let details = match err {
                ZipError::Invalid { zip } => Some(json!({ "zip": zip })),
                _ => None,
            };
            return (
                status,
                ErrorBody {
                    message: err.to_string(),
                    details,
                },
            );
        }

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorBody::new(INTERNAL_ERROR_MESSAGE),
        )
    }
}

fn status_from(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();

        if status.is_server_error() {
            tracing::error!(status = %status, error = ?self.0, "Request failed");
        } else {
            tracing::warn!(status = %status, message = %body.message, "Request rejected");
        }

        (status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use talentdesk_core::entity::EntityType;
    use talentdesk_core::storage::StoreError;

    fn status_of(err: impl Into<anyhow::Error>) -> (StatusCode, ErrorBody) {
        AppError(err.into()).status_and_body()
    }

    #[test]
    fn test_not_found() {
        let (status, body) = status_of(EntityError::NotFound {
            entity_type: EntityType::User,
            id: "u1".to_string(),
        });
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, "user with id u1 not found");
        assert!(body.details.is_none());
    }

    #[test]
    fn test_store_errors_are_hidden() {
        let (status, body) = status_of(EntityError::Store(StoreError::QueryFailed(
            "Table not found".to_string(),
        )));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "Internal server error");

        let (status, _) = status_of(EntityError::Store(StoreError::ConnectionFailed(
            "refused".to_string(),
        )));
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_validation_keeps_details() {
        let (status, body) = status_of(
            ValidationError::new("Missing required fields")
                .with_details(json!({"missing": ["role"]})),
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.details.unwrap()["missing"][0], "role");
    }

    #[test]
    fn test_zip_errors() {
        let (status, body) = status_of(ZipError::Invalid {
            zip: "12".to_string(),
        });
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.details.unwrap()["zip"], "12");

        let (status, _) = status_of(ZipError::External("down".to_string()));
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_unknown_error_is_500() {
        let (status, body) = status_of(anyhow::anyhow!("something odd"));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "Internal server error");
    }
}
