//! Shared application state.
//!
//! Cloned into every handler. Holds one entity service per entity type, all
//! backed by the same store trait object, and the ViaCEP client.

use std::sync::Arc;

use talentdesk_core::entity::EntityType;
use talentdesk_core::storage::EntityStore;

use crate::config::{ConfigError, TableNames};
use crate::service::EntityService;
use crate::zip::ViaCepClient;

#[derive(Debug, Clone)]
struct Services {
    candidate: EntityService,
    company: EntityService,
    user: EntityService,
    job: EntityService,
}

#[derive(Debug, Clone)]
pub struct AppState {
    services: Arc<Services>,
    pub zip_client: ViaCepClient,
}

impl AppState {
    /// Build the state, binding every entity type to its table.
    pub fn new(
        store: Arc<dyn EntityStore>,
        tables: &TableNames,
        zip_client: ViaCepClient,
    ) -> Result<Self, ConfigError> {
        let service = |entity_type: EntityType| {
            EntityService::new(entity_type, tables.get(entity_type), store.clone())
        };

        let services = Services {
            candidate: service(EntityType::Candidate)?,
            company: service(EntityType::Company)?,
            user: service(EntityType::User)?,
            job: service(EntityType::Job)?,
        };

        let state = Self {
            services: Arc::new(services),
            zip_client,
        };

        for entity_type in EntityType::ALL {
            let service = state.service(entity_type);
            tracing::debug!(
                entity_type = %service.entity_type(),
                table = %service.table_name(),
                "Bound entity service"
            );
        }

        Ok(state)
    }

    pub fn service(&self, entity_type: EntityType) -> &EntityService {
        match entity_type {
            EntityType::Candidate => &self.services.candidate,
            EntityType::Company => &self.services.company,
            EntityType::User => &self.services.user,
            EntityType::Job => &self.services.job,
        }
    }
}

#[cfg(test)]
mod test_impls {
    use super::*;
    use crate::config::DEFAULT_VIACEP_BASE_URL;
    use crate::storage::InMemoryStore;

    impl AppState {
        /// In-memory state with a fixed ViaCEP URL.
        pub fn in_memory(viacep_base_url: &str) -> Self {
            Self::new(
                Arc::new(InMemoryStore::new()),
                &TableNames::shared("talentdesk-test"),
                ViaCepClient::new(viacep_base_url),
            )
            .expect("test tables are non-empty")
        }
    }

    impl Default for AppState {
        /// Creates an AppState with in-memory storage for testing.
        fn default() -> Self {
            Self::in_memory(DEFAULT_VIACEP_BASE_URL)
        }
    }

    #[test]
    fn test_services_are_bound_to_their_type() {
        let state = AppState::default();
        for entity_type in EntityType::ALL {
            let service = state.service(entity_type);
            assert_eq!(service.entity_type(), entity_type);
            assert_eq!(service.table_name(), "talentdesk-test");
        }
    }

    #[test]
    fn test_empty_table_name_fails() {
        let result = AppState::new(
            Arc::new(InMemoryStore::new()),
            &TableNames::shared(""),
            ViaCepClient::new(DEFAULT_VIACEP_BASE_URL),
        );
        assert!(matches!(result, Err(ConfigError::EmptyTableName(_))));
    }
}
