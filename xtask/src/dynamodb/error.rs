//! Errors raised by the table provisioning tasks.

use thiserror::Error;

/// Result of a provisioning task.
pub type Result<T> = std::result::Result<T, DynamodbError>;

/// Failures of the `deploy` and `seed` tasks.
#[derive(Error, Debug)]
pub enum DynamodbError {
    #[error("AWS SDK error: {0}")]
    AwsSdk(String),

    #[error("Table '{table_name}' not found")]
    TableNotFound { table_name: String },

    #[error("Table '{table_name}' exists with a different key schema; destroy it first")]
    KeySchemaMismatch { table_name: String },

    #[error("Seeding '{table_name}' stopped after {inserted} items; {unprocessed} were not written")]
    SeedIncomplete {
        table_name: String,
        inserted: u32,
        unprocessed: usize,
    },

    #[error("Deployment cancelled")]
    UserCancelled,

    #[error("Table did not become active in time")]
    TableActivationTimeout,
}
