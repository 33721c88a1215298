#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/stratum-credit/stratum/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for the SEC filing gateway.
//!
//! - [`SecProvider`](provider::SecProvider) - Upstream SEC data source
//! - [`StatusStore`](store::StatusStore) - Status-check persistence
//! - [`StratumError`](error::StratumError) - Error taxonomy shared by all crates

/// Request and response bodies of the REST API.
pub mod api;
/// Error types for gateway operations.
pub mod error;
/// Provider trait for the upstream SEC API.
pub mod provider;
/// Status-check persistence trait.
pub mod store;
/// Core data types (Ticker, Filing, StatusCheck, etc.).
pub mod types;

// Re-export commonly used items at crate root
pub use api::{
    AnalysisRequest, AnalysisResponse, CompanyData, CompanyLookupRequest, CompanyLookupResponse,
    CreditUsage, FilingRequest, FilingsResponse, FullTextSearchRequest, SearchResponse,
    StatusCheckCreate, XbrlRequest, XbrlResponse,
};
pub use error::{Result, StratumError};
pub use provider::SecProvider;
pub use store::StatusStore;
pub use stratum_credits::{CreditReport, CreditStatus, RateLimitExceeded, UsageRecord};
pub use types::{Filing, FilingQuery, SecResponse, StatusCheck, Ticker};
