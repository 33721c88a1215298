#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/stratum-credit/stratum/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! SEC filing gateway with per-endpoint credit tracking.
//!
//! This crate re-exports the core types, the credit tracker, the upstream
//! client, the analyzers and the status stores, and provides
//! [`SecService`], which composes them into the operations served over HTTP.
//!
//! # Features
//!
//! - `store-sqlite` - SQLite-backed status-check store
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stratum::{CompanyLookupRequest, CreditTracker, PlaceholderAnalyzer, SecApiClient, SecApiConfig, SecService};
//!
//! #[tokio::main]
//! async fn main() -> stratum::Result<()> {
//!     let credits = Arc::new(CreditTracker::default());
//!     let client = SecApiClient::new(SecApiConfig::default(), credits.clone())?;
//!     let service = SecService::new(Arc::new(client), Arc::new(PlaceholderAnalyzer::new()), credits);
//!
//!     let filings = service
//!         .fetch_filings(&serde_json::from_str(r#"{"ticker": "AAPL"}"#).unwrap())
//!         .await?;
//!     println!("{} filings", filings.filings_count);
//!
//!     Ok(())
//! }
//! ```

// Core types and traits
pub use stratum_core::*;

// Credit tracking
pub use stratum_credits::{Clock, CreditPolicy, CreditTracker, ManualClock, SystemClock};

// Store implementations
pub use stratum_store::InMemoryStatusStore;
#[cfg(feature = "store-sqlite")]
pub use stratum_store::SqliteStatusStore;

// Upstream client
pub use stratum_sec as sec;
pub use stratum_sec::{SecApiClient, SecApiConfig};

// Analysis
pub use stratum_analysis::{AnalysisType, FilingAnalysis, FilingAnalyzer, PlaceholderAnalyzer};

mod service;
pub use service::SecService;
