//! In-memory status-check store.

use async_trait::async_trait;
use stratum_core::{Result, StatusCheck, StatusStore};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Status-check store backed by a `Vec`.
///
/// Records are lost when the store is dropped.
#[derive(Debug, Default)]
pub struct InMemoryStatusStore {
    checks: RwLock<Vec<StatusCheck>>,
}

impl InMemoryStatusStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StatusStore for InMemoryStatusStore {
    #[instrument(skip(self, check), fields(id = %check.id))]
    async fn insert(&self, check: &StatusCheck) -> Result<()> {
        self.checks.write().await.push(check.clone());
        debug!("Stored status check");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self, limit: usize) -> Result<Vec<StatusCheck>> {
        let checks = self.checks.read().await;
        Ok(checks.iter().take(limit).cloned().collect())
    }
}
