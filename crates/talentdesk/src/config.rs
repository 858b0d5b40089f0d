//! Startup configuration: table names, log format and the postal lookup URL.
//!
//! Everything here is resolved once, before the router is built. A missing
//! table name is fatal at startup rather than a per-request error.

use clap::{Args, ValueEnum};
use thiserror::Error;

use talentdesk_core::entity::EntityType;

/// Default ViaCEP endpoint (`{base}/{zip}/json/`).
pub const DEFAULT_VIACEP_BASE_URL: &str = "https://viacep.com.br/ws";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No table name configured for {entity_type}: set TABLE_NAME or {variable}")]
    MissingTableName {
        entity_type: EntityType,
        variable: &'static str,
    },
    #[error("Table name for {0} must not be empty")]
    EmptyTableName(EntityType),
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Table name flags. Per-type names fall back to the shared one.
#[derive(Args, Debug, Clone, Default)]
pub struct TableArgs {
    /// Table shared by every entity type
    #[arg(long, env = "TABLE_NAME")]
    pub table_name: Option<String>,

    /// Table for candidates (overrides --table-name)
    #[arg(long, env = "CANDIDATE_TABLE_NAME")]
    pub candidate_table_name: Option<String>,

    /// Table for companies (overrides --table-name)
    #[arg(long, env = "COMPANY_TABLE_NAME")]
    pub company_table_name: Option<String>,

    /// Table for users (overrides --table-name)
    #[arg(long, env = "USER_TABLE_NAME")]
    pub user_table_name: Option<String>,

    /// Table for jobs (overrides --table-name)
    #[arg(long, env = "JOB_TABLE_NAME")]
    pub job_table_name: Option<String>,
}

impl TableArgs {
    fn override_for(&self, entity_type: EntityType) -> Option<&str> {
        match entity_type {
            EntityType::Candidate => self.candidate_table_name.as_deref(),
            EntityType::Company => self.company_table_name.as_deref(),
            EntityType::User => self.user_table_name.as_deref(),
            EntityType::Job => self.job_table_name.as_deref(),
        }
    }
}

fn override_variable(entity_type: EntityType) -> &'static str {
    match entity_type {
        EntityType::Candidate => "CANDIDATE_TABLE_NAME",
        EntityType::Company => "COMPANY_TABLE_NAME",
        EntityType::User => "USER_TABLE_NAME",
        EntityType::Job => "JOB_TABLE_NAME",
    }
}

/// Physical table name for every entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNames {
    candidate: String,
    company: String,
    user: String,
    job: String,
}

impl TableNames {
    /// Resolve every entity type's table, preferring its override.
    ///
    /// Blank values count as unset.
    pub fn resolve(args: &TableArgs) -> Result<Self, ConfigError> {
        let shared = non_blank(args.table_name.as_deref());
        let resolve_one = |entity_type: EntityType| {
            non_blank(args.override_for(entity_type))
                .or(shared)
                .map(str::to_string)
                .ok_or(ConfigError::MissingTableName {
                    entity_type,
                    variable: override_variable(entity_type),
                })
        };

        Ok(Self {
            candidate: resolve_one(EntityType::Candidate)?,
            company: resolve_one(EntityType::Company)?,
            user: resolve_one(EntityType::User)?,
            job: resolve_one(EntityType::Job)?,
        })
    }

    /// The same table for every entity type.
    #[cfg(test)]
    pub fn shared(table_name: impl Into<String>) -> Self {
        let name = table_name.into();
        Self {
            candidate: name.clone(),
            company: name.clone(),
            user: name.clone(),
            job: name,
        }
    }

    pub fn get(&self, entity_type: EntityType) -> &str {
        match entity_type {
            EntityType::Candidate => &self.candidate,
            EntityType::Company => &self.company,
            EntityType::User => &self.user,
            EntityType::Job => &self.job,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
