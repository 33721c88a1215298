//! Request and response bodies of the REST API.
//!
//! Response envelopes carry `credit_usage`, the tracker status at the time the
//! response was built, so clients can watch their remaining SEC credits.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use stratum_credits::CreditStatus;

use crate::types::Filing;

/// Credit status per endpoint, as attached to responses.
pub type CreditUsage = BTreeMap<String, CreditStatus>;

/// Body of `POST /api/status`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCheckCreate {
    /// Name of the calling client.
    pub client_name: String,
}

/// Body of `POST /api/sec/company/lookup`.
///
/// The ticker wins over the company name, which wins over a raw CIK.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyLookupRequest {
    /// Ticker symbol.
    #[serde(default)]
    pub ticker: Option<String>,
    /// SEC CIK, used as-is.
    #[serde(default)]
    pub cik: Option<String>,
    /// Company name.
    #[serde(default)]
    pub company_name: Option<String>,
}

impl CompanyLookupRequest {
    /// Lookup by ticker.
    #[must_use]
    pub fn ticker(ticker: impl Into<String>) -> Self {
        Self {
            ticker: Some(ticker.into()),
            ..Default::default()
        }
    }
}

fn default_filing_type() -> String {
    "10-K".to_string()
}

const fn default_filing_limit() -> usize {
    5
}

const fn default_search_limit() -> usize {
    10
}

/// Body of `POST /api/sec/filings/fetch`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingRequest {
    /// Ticker symbol.
    pub ticker: String,
    /// Form type, `10-K` by default.
    #[serde(default = "default_filing_type")]
    pub filing_type: String,
    /// Number of filings, 5 by default.
    #[serde(default = "default_filing_limit")]
    pub limit: usize,
}

/// Body of `POST /api/sec/analyze/filing`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Ticker symbol.
    pub ticker: String,
    /// URL of the filing document to analyze.
    pub filing_url: String,
    /// `covenant`, `subsidiary`, `debt_structure`, or anything else for a
    /// general analysis.
    pub analysis_type: String,
}

/// Query of `POST /api/sec/xbrl/extract`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct XbrlRequest {
    /// Accession number of the filing.
    pub accession_number: String,
}

/// Query of `POST /api/sec/search/full-text`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullTextSearchRequest {
    /// Search expression.
    pub query: String,
    /// Ticker symbol restricting the search to one filer.
    pub ticker: String,
    /// Number of results, 10 by default.
    #[serde(default = "default_search_limit")]
    pub limit: usize,
}

/// Upstream data gathered by a company lookup.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyData {
    /// Ticker or name mapping record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping: Option<Value>,
    /// EDGAR entity record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_details: Option<Value>,
    /// Latest periodic reports, always an object with a `filings` list when
    /// upstream returned a list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent_filings: Option<Value>,
}

/// Response of a company lookup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompanyLookupResponse {
    /// Always true; failures are reported as errors.
    pub success: bool,
    /// Resolved CIK.
    pub cik: String,
    /// Ticker from the request, if any.
    pub ticker: Option<String>,
    /// Upstream data.
    pub company_data: CompanyData,
    /// Credit status after the lookup.
    pub credit_usage: CreditUsage,
}

/// Response of a filings fetch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilingsResponse {
    /// Always true; failures are reported as errors.
    pub success: bool,
    /// Ticker from the request.
    pub ticker: String,
    /// Resolved CIK.
    pub cik: String,
    /// Requested form type.
    pub filing_type: String,
    /// Number of filings returned.
    pub filings_count: usize,
    /// The filings, newest first.
    pub filings: Vec<Filing>,
    /// Credit status after the fetch.
    pub credit_usage: CreditUsage,
}

/// Response of a filing analysis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse<A> {
    /// Always true; failures are reported as errors.
    pub success: bool,
    /// Ticker from the request.
    pub ticker: String,
    /// Analyzed document.
    pub filing_url: String,
    /// Analysis type as requested.
    pub analysis_type: String,
    /// Analysis output.
    pub analysis: A,
    /// Credit status after the analysis.
    pub credit_usage: CreditUsage,
}

/// Response of an XBRL extraction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct XbrlResponse {
    /// Always true; failures are reported as errors.
    pub success: bool,
    /// Accession number from the request.
    pub accession_number: String,
    /// XBRL financial data converted to JSON upstream.
    pub xbrl_data: Value,
    /// Credit status after the extraction.
    pub credit_usage: CreditUsage,
}

/// Response of a full-text search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Always true; failures are reported as errors.
    pub success: bool,
    /// Ticker from the request.
    pub ticker: String,
    /// Resolved CIK.
    pub cik: String,
    /// Search expression from the request.
    pub search_query: String,
    /// Upstream search results.
    pub results: Value,
    /// Credit status after the search.
    pub credit_usage: CreditUsage,
}
