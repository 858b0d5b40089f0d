//! Storage backend implementations.
//!
//! Concrete implementations of [`talentdesk_core::storage::EntityStore`].
//! The in-memory store is always available; the DynamoDB store is compiled
//! in with the `dynamodb` feature.
//!
//! Build with DynamoDB:
//! ```bash
//! cargo build -p talentdesk --features dynamodb
//! ```

pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

pub use inmemory::InMemoryStore;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbStore;
