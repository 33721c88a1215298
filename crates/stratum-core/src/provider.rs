//! Provider trait for the upstream SEC data API.
//!
//! [`SecProvider`] is the seam between the gateway service and the HTTP
//! client. Every call that reaches the upstream API is charged against the
//! provider's credit tracker first; a refused charge surfaces as
//! [`StratumError::CreditLimit`](crate::StratumError::CreditLimit) and no
//! request is sent.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::Result,
    types::{FilingQuery, SecResponse, Ticker},
};

/// Source of SEC filing data.
#[async_trait]
pub trait SecProvider: Send + Sync + Debug {
    /// Returns the name of this provider (e.g., "sec-api.io").
    fn name(&self) -> &str;

    /// Resolves a ticker to its company mapping record(s).
    async fn map_ticker(&self, ticker: &Ticker) -> Result<SecResponse>;

    /// Resolves a company name to its mapping record(s).
    async fn map_name(&self, name: &str) -> Result<SecResponse>;

    /// Fetches the EDGAR entity record for a CIK.
    async fn entity(&self, cik: &str) -> Result<SecResponse>;

    /// Runs a filing query.
    async fn query_filings(&self, query: &FilingQuery) -> Result<SecResponse>;

    /// Converts the XBRL financial data of a filing to JSON.
    async fn xbrl_to_json(&self, accession_number: &str) -> Result<SecResponse>;

    /// Searches the full text of filings.
    async fn full_text_search(&self, query: &FilingQuery) -> Result<SecResponse>;

    /// Downloads a filing document and returns its visible text.
    ///
    /// Document downloads go straight to EDGAR and are not charged.
    async fn download_filing_text(&self, url: &str) -> Result<String>;
}
