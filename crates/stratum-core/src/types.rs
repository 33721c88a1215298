//! Core domain types for SEC filing data.
//!
//! This module defines the fundamental data structures:
//!
//! - [`Ticker`] - Trading symbol, always upper-case
//! - [`StatusCheck`] - A client status-check record
//! - [`Filing`] - A filing projected from an upstream query result
//! - [`FilingQuery`] - A query against the filing search endpoints
//! - [`SecResponse`] - A successful upstream response with its credit usage

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;
use std::str::FromStr;
use stratum_credits::UsageRecord;
use uuid::Uuid;

/// A trading symbol/ticker.
///
/// Tickers are automatically uppercased on creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticker(String);

impl Ticker {
    /// Creates a new ticker from a string, converting to uppercase.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().trim().to_uppercase())
    }

    /// Returns the ticker as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Ticker {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Ticker {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Ticker {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// A status-check record written by API clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCheck {
    /// Random UUID identifying the record.
    pub id: String,
    /// Name supplied by the client.
    pub client_name: String,
    /// Creation time.
    pub timestamp: DateTime<Utc>,
}

impl StatusCheck {
    /// Creates a record for `client_name` with a fresh id and the current time.
    #[must_use]
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            client_name: client_name.into(),
            timestamp: Utc::now(),
        }
    }
}

/// A filing as returned to API clients.
///
/// Every field is optional because the upstream search results are not
/// guaranteed to carry all of them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filing {
    /// SEC accession number.
    pub accession_number: Option<String>,
    /// Filing timestamp as reported upstream.
    pub filing_date: Option<String>,
    /// Form type (e.g., "10-K").
    pub form_type: Option<String>,
    /// Filer name.
    pub company_name: Option<String>,
    /// Filer ticker.
    pub ticker: Option<String>,
    /// Filer CIK.
    pub cik: Option<String>,
    /// Link to the HTML filing index.
    pub link_to_html: Option<String>,
    /// Link to the full text submission.
    pub link_to_txt: Option<String>,
    /// Period of report.
    pub period_end_date: Option<String>,
    /// Submission size in bytes.
    pub size: Option<u64>,
    /// Upstream record id.
    pub id: Option<String>,
}

impl Filing {
    /// Projects an upstream filing object onto a [`Filing`].
    ///
    /// Missing or mistyped fields become `None`; numeric identifiers are
    /// rendered as strings.
    #[must_use]
    pub fn from_upstream(value: &Value) -> Self {
        Self {
            accession_number: text_field(value, "accessionNo"),
            filing_date: text_field(value, "filedAt"),
            form_type: text_field(value, "formType"),
            company_name: text_field(value, "companyName"),
            ticker: text_field(value, "ticker"),
            cik: text_field(value, "cik"),
            link_to_html: text_field(value, "linkToHtml"),
            link_to_txt: text_field(value, "linkToTxt"),
            period_end_date: text_field(value, "periodOfReport"),
            size: value.get("size").and_then(|v| match v {
                Value::Number(n) => n.as_u64(),
                Value::String(s) => s.parse().ok(),
                _ => None,
            }),
            id: text_field(value, "id"),
        }
    }
}

fn text_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A Lucene-style query against the SEC filing search endpoints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilingQuery {
    /// The query string, e.g. `cik:320193 AND formType:"10-K"`.
    pub query: String,
    /// Offset of the first result.
    pub from: usize,
    /// Maximum number of results.
    pub size: usize,
}

impl FilingQuery {
    /// Creates a query returning the first `size` results.
    #[must_use]
    pub fn new(query: impl Into<String>, size: usize) -> Self {
        Self {
            query: query.into(),
            from: 0,
            size,
        }
    }

    /// Most recent annual and quarterly reports for a CIK.
    #[must_use]
    pub fn periodic_reports(cik: &str, size: usize) -> Self {
        Self::new(format!("cik:{cik} AND formType:(\"10-K\" OR \"10-Q\")"), size)
    }

    /// Most recent filings of one form type for a CIK.
    #[must_use]
    pub fn form_type(cik: &str, form_type: &str, size: usize) -> Self {
        Self::new(format!("cik:{cik} AND formType:\"{form_type}\""), size)
    }

    /// Free-text query restricted to one CIK.
    #[must_use]
    pub fn for_company(cik: &str, query: &str, size: usize) -> Self {
        Self::new(format!("cik:{cik} AND {query}"), size)
    }

    /// Renders the request body expected by the upstream API.
    ///
    /// Newest filings come first; `from` and `size` are sent as strings.
    #[must_use]
    pub fn to_body(&self) -> Value {
        json!({
            "query": { "query_string": { "query": self.query } },
            "from": self.from.to_string(),
            "size": self.size.to_string(),
            "sort": [{ "filedAt": { "order": "desc" } }]
        })
    }
}

/// A successful upstream response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SecResponse {
    /// Response body as returned by the upstream API.
    pub data: Value,
    /// Usage of the charged endpoint after this call.
    pub credit_usage: UsageRecord,
    /// Human readable origin, e.g. `SEC API edgar-entities`.
    pub source: String,
}

impl SecResponse {
    /// Returns the payload, reduced to its first element when it is a list.
    ///
    /// Mapping and entity lookups answer with either one object or a list
    /// of matches; callers only care about the best match. An empty list
    /// becomes `Value::Null`.
    #[must_use]
    pub fn first_record(&self) -> Value {
        match &self.data {
            Value::Array(items) => items.first().cloned().unwrap_or(Value::Null),
            other => other.clone(),
        }
    }
}
