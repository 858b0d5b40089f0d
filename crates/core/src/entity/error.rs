use serde_json::Value;
use thiserror::Error;

use crate::storage::StoreError;

use super::EntityType;

/// Errors surfaced by entity service operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EntityError {
    #[error("{entity_type} with id {id} not found")]
    NotFound { entity_type: EntityType, id: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Caller input failed a presence or format check.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    pub details: Option<Value>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown entity type: {0}")]
pub struct ParseEntityTypeError(pub String);
