#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/stratum-credit/stratum/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Storage backends for client status checks.
//!
//! This crate provides implementations of the [`StatusStore`] trait from `stratum-core`:
//!
//! - [`SqliteStatusStore`] - Persistent SQLite-based store (default, requires `sqlite` feature)
//! - [`InMemoryStatusStore`] - Process-local store, used when no database is configured

/// In-memory store implementation.
pub mod memory;

/// SQLite-based store implementation.
#[cfg(feature = "sqlite")]
pub mod sqlite;

// Re-export the trait for convenience
pub use stratum_core::StatusStore;

pub use memory::InMemoryStatusStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStatusStore;
