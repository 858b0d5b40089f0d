use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ParseEntityTypeError;

/// A stored business object: a plain field map.
///
/// The envelope attributes (`id`, `entityType`, `pk`, `sk`, `createdAt`,
/// `updatedAt`) live next to the caller-supplied fields.
pub type Record = serde_json::Map<String, serde_json::Value>;

pub const ID_ATTR: &str = "id";
pub const ENTITY_TYPE_ATTR: &str = "entityType";
pub const CREATED_AT_ATTR: &str = "createdAt";
pub const UPDATED_AT_ATTR: &str = "updatedAt";

/// The resource kinds that share the generic entity service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Candidate,
    Company,
    User,
    Job,
}

impl EntityType {
    /// Every entity type, in routing order.
    pub const ALL: [EntityType; 4] = [
        EntityType::Candidate,
        EntityType::Company,
        EntityType::User,
        EntityType::Job,
    ];

    /// The tag stored in the `entityType` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Candidate => "candidate",
            EntityType::Company => "company",
            EntityType::User => "user",
            EntityType::Job => "job",
        }
    }

    /// The plural path segment used by the HTTP API.
    pub fn collection(&self) -> &'static str {
        match self {
            EntityType::Candidate => "candidates",
            EntityType::Company => "companies",
            EntityType::User => "users",
            EntityType::Job => "jobs",
        }
    }

    /// Fields that must be present (and non-null) when creating this entity.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            EntityType::Candidate => &["guid_id"],
            EntityType::Company => &["cd_cnpj"],
            EntityType::User => &["username", "role"],
            EntityType::Job => &["guid_id"],
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = ParseEntityTypeError;

    /// Accepts both the singular tag and the plural collection name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityType::ALL
            .into_iter()
            .find(|t| t.as_str() == s || t.collection() == s)
            .ok_or_else(|| ParseEntityTypeError(s.to_string()))
    }
}
