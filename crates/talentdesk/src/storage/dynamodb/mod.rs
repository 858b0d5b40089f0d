//! DynamoDB storage backend implementation.
//!
//! Implements [`talentdesk_core::storage::EntityStore`] on top of
//! `aws-sdk-dynamodb`, with records stored as native attribute maps.

mod conversions;
mod error;
mod repository;

pub use repository::DynamoDbStore;
