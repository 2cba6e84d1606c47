//! Service container for dependency injection
//!
//! Wires up the controller and services with their dependencies.

use std::sync::Arc;

use crate::application::services::RegistrationService;
use crate::application::{ApplicationResult, RegistrationController};
use crate::config::Settings;
use crate::infrastructure::traits::StoreConnector;
use crate::infrastructure::SqliteConnector;

/// Container holding settings and the store connector.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Store connector, one connection per cycle or command
    pub connector: Arc<dyn StoreConnector>,
}

impl ServiceContainer {
    /// Create a new service container backed by the configured SQLite file.
    pub fn new(settings: Settings) -> Self {
        let connector = Arc::new(SqliteConnector::new(settings.db_path.clone()));
        Self::with_deps(settings, connector)
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, connector: Arc<dyn StoreConnector>) -> Self {
        Self {
            settings: Arc::new(settings),
            connector,
        }
    }

    /// Interactive registration controller.
    pub fn controller(&self) -> RegistrationController {
        RegistrationController::new(self.connector.clone())
    }

    /// Registration service on a fresh connection.
    pub fn registration(&self) -> ApplicationResult<RegistrationService> {
        Ok(RegistrationService::new(self.connector.connect()?))
    }
}
