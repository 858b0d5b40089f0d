//! Success envelopes.

use serde::Serialize;

use talentdesk_core::entity::Record;

/// `{"data": ...}` wrapper of every successful JSON response.
#[derive(Debug, Serialize)]
pub struct Data<T> {
    pub data: T,
}

impl<T> Data<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A list page as returned to clients.
#[derive(Debug, Serialize)]
pub struct ListBody {
    pub items: Vec<Record>,
    /// Cursor of the next page; `null` once the listing is exhausted.
    #[serde(rename = "lastKey")]
    pub last_key: Option<String>,
}
