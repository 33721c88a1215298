//! Persistence trait for client status checks.

use async_trait::async_trait;

use crate::{error::Result, types::StatusCheck};

/// Storage for [`StatusCheck`] records.
///
/// Implementations can keep records in memory or in SQLite.
#[async_trait]
pub trait StatusStore: Send + Sync {
    /// Stores a record.
    async fn insert(&self, check: &StatusCheck) -> Result<()>;

    /// Returns up to `limit` records in insertion order.
    async fn list(&self, limit: usize) -> Result<Vec<StatusCheck>>;
}
