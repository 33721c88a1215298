//! SQLite-based status-check store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};
use std::path::Path;
use std::sync::Mutex;
use stratum_core::{Result, StatusCheck, StatusStore, StratumError};
use tracing::{debug, instrument};

/// SQLite-backed status-check store.
///
/// Records survive restarts when opened on a file. Timestamps are stored as
/// RFC 3339 text.
#[derive(Debug)]
pub struct SqliteStatusStore {
    conn: Mutex<Connection>,
}

fn store_err(e: impl std::fmt::Display) -> StratumError {
    StratumError::Store(e.to_string())
}

impl SqliteStatusStore {
    /// Open (or create) a store at the given path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or schema creation fails.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path).map_err(store_err)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Create an in-memory SQLite store.
    ///
    /// # Errors
    /// Returns an error if schema creation fails.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(store_err)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> Result<()> {
        let conn = self.conn.lock().map_err(store_err)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS status_checks (
                id TEXT PRIMARY KEY,
                client_name TEXT NOT NULL,
                timestamp TEXT NOT NULL
            )",
            [],
        )
        .map_err(store_err)?;

        debug!("SQLite status store schema initialized");
        Ok(())
    }
}

#[async_trait]
impl StatusStore for SqliteStatusStore {
    #[instrument(skip(self, check), fields(id = %check.id))]
    async fn insert(&self, check: &StatusCheck) -> Result<()> {
        let conn = self.conn.lock().map_err(store_err)?;

        conn.execute(
            "INSERT INTO status_checks (id, client_name, timestamp) VALUES (?1, ?2, ?3)",
            params![check.id, check.client_name, check.timestamp.to_rfc3339()],
        )
        .map_err(store_err)?;

        debug!("Stored status check");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self, limit: usize) -> Result<Vec<StatusCheck>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let conn = self.conn.lock().map_err(store_err)?;

        let mut stmt = conn
            .prepare(
                "SELECT id, client_name, timestamp FROM status_checks
                 ORDER BY rowid LIMIT ?1",
            )
            .map_err(store_err)?;

        let rows = stmt
            .query_map(params![limit], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })
            .map_err(store_err)?;

        let mut checks = Vec::new();
        for row in rows {
            let (id, client_name, timestamp) = row.map_err(store_err)?;
            let timestamp = DateTime::parse_from_rfc3339(&timestamp)
                .map_err(|e| StratumError::Parse(format!("Invalid timestamp '{timestamp}': {e}")))?
                .with_timezone(&Utc);
            checks.push(StatusCheck {
                id,
                client_name,
                timestamp,
            });
        }

        debug!("Loaded {} status checks", checks.len());
        Ok(checks)
    }
}
