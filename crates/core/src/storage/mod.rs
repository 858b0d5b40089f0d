mod error;
mod http_mapping;
mod traits;
mod types;

pub use error::{Result, StoreError};
pub use http_mapping::{entity_error_to_status_code, store_error_to_status_code};
pub use traits::EntityStore;
pub use types::{ContinuationKey, ScanPage, ScanRequest};
