//! Shared application state.

use std::sync::Arc;

use stratum::{
    CreditTracker, InMemoryStatusStore, PlaceholderAnalyzer, Result, SecApiClient, SecService,
    SqliteStatusStore, StatusStore,
};
use tracing::{info, warn};

use crate::config::Config;

/// State shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// SEC operations.
    pub service: SecService,
    /// Status-check persistence.
    pub store: Arc<dyn StatusStore>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service", &self.service)
            .field("store", &"configured")
            .finish()
    }
}

impl AppState {
    /// Create state from already built parts.
    #[must_use]
    pub fn new(service: SecService, store: Arc<dyn StatusStore>) -> Self {
        Self { service, store }
    }

    /// Build the credit tracker, upstream client, analyzer and store described
    /// by `config`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built or the database
    /// cannot be opened.
    pub fn from_config(config: &Config) -> Result<Self> {
        let credits = Arc::new(CreditTracker::new(config.credit_policy()));
        let client = SecApiClient::new(config.sec_api_config(), credits.clone())?;
        if !client.has_api_key() {
            warn!("SEC_API_KEY is not set; upstream SEC calls will be rejected");
        }

        let service = SecService::new(
            Arc::new(client),
            Arc::new(PlaceholderAnalyzer::new()),
            credits,
        );

        let store: Arc<dyn StatusStore> = match &config.database_path {
            Some(path) => {
                info!("Storing status checks in {}", path.display());
                Arc::new(SqliteStatusStore::new(path)?)
            }
            None => {
                info!("No database configured, storing status checks in memory");
                Arc::new(InMemoryStatusStore::new())
            }
        };

        Ok(Self::new(service, store))
    }

    /// The tracker charged by the upstream client.
    #[must_use]
    pub fn credits(&self) -> &CreditTracker {
        self.service.credits()
    }
}
