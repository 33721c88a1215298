#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/stratum-credit/stratum/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Upstream client for the sec-api.io filing API.
//!
//! Every call is charged against a shared [`CreditTracker`] under a stable
//! endpoint identifier before any request leaves the process:
//!
//! - `mapping/ticker/{TICKER}` and `mapping/name/{name}` - company mapping
//! - `edgar-entities` - EDGAR entity records
//! - `query` - filing search
//! - `xbrl-to-json` - XBRL financial data
//! - `full-text-search` - full-text filing search
//!
//! Filing documents are downloaded from EDGAR directly and are not charged.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use stratum_core::{SecProvider, Ticker};
//! use stratum_credits::CreditTracker;
//! use stratum_sec::{SecApiClient, SecApiConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credits = Arc::new(CreditTracker::default());
//!     let config = SecApiConfig {
//!         api_key: Some("your-token".to_string()),
//!         ..Default::default()
//!     };
//!     let client = SecApiClient::new(config, credits.clone())?;
//!
//!     let mapping = client.map_ticker(&Ticker::new("AAPL")).await?;
//!     println!("{}", mapping.first_record());
//!     println!("{:?}", credits.status());
//!     Ok(())
//! }
//! ```

/// Plain-text extraction from filing documents.
pub mod html;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use stratum_core::{FilingQuery, Result, SecProvider, SecResponse, StratumError, Ticker};
use stratum_credits::CreditTracker;
use tracing::{debug, instrument, warn};

pub use html::{MAX_FILING_TEXT_CHARS, extract_text};

/// sec-api.io base URL
pub const DEFAULT_BASE_URL: &str = "https://api.sec-api.io";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`SecApiClient`].
#[derive(Clone, Debug)]
pub struct SecApiConfig {
    /// Base URL of the API, without a trailing path.
    pub base_url: String,
    /// API token sent as the `token` query parameter.
    pub api_key: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// User agent sent with every request, including document downloads.
    pub user_agent: Option<String>,
}

impl Default for SecApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }
}

/// Credit-tracked client for the sec-api.io REST API.
#[derive(Debug)]
pub struct SecApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    credits: Arc<CreditTracker>,
}

impl SecApiClient {
    /// Create a new client from `config`, charging calls against `credits`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: SecApiConfig, credits: Arc<CreditTracker>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().timeout(config.timeout);
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent);
        }
        let client = builder
            .build()
            .map_err(|e| StratumError::Other(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self::with_client(client, config, credits))
    }

    /// Create a new client with a pre-configured reqwest client.
    ///
    /// The timeout and user agent in `config` are ignored.
    pub fn with_client(
        client: reqwest::Client,
        config: SecApiConfig,
        credits: Arc<CreditTracker>,
    ) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            credits,
        }
    }

    /// The tracker this client charges.
    #[must_use]
    pub const fn credits(&self) -> &Arc<CreditTracker> {
        &self.credits
    }

    /// Whether an API token is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Send one charged request.
    ///
    /// The call is charged against `endpoint_id` first; when the tracker
    /// refuses, nothing is sent. GET requests carry `params` and the token as
    /// query parameters. POST requests carry the token in the query string and
    /// `body` as JSON.
    ///
    /// # Errors
    /// - [`StratumError::CreditLimit`] when the endpoint's credits are used up
    /// - [`StratumError::UpstreamRateLimited`] on HTTP 429
    /// - [`StratumError::Upstream`] on any other non-200 status
    /// - [`StratumError::Network`] on transport failure
    /// - [`StratumError::Parse`] when the body is not JSON
    #[instrument(skip(self, method, params, body), fields(method = %method))]
    pub async fn request(
        &self,
        endpoint_id: &str,
        path: &str,
        method: Method,
        params: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<SecResponse> {
        let usage = self.credits.charge(endpoint_id)?;

        let url = self.endpoint_url(path);
        let mut query: Vec<(&str, &str)> = params.to_vec();
        if let Some(token) = &self.api_key {
            query.push(("token", token.as_str()));
        }

        debug!("Sending {} {} ({}/{} credits used)", method, url, usage.used, usage.limit);
        let mut request = self.client.request(method, &url).query(&query);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| StratumError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("SEC API rate limited {}", endpoint_id);
            return Err(StratumError::UpstreamRateLimited);
        }
        if status != StatusCode::OK {
            let text = response.text().await.unwrap_or_default();
            warn!("SEC API returned HTTP {} for {}", status, endpoint_id);
            return Err(StratumError::Upstream {
                status: status.as_u16(),
                message: format!("SEC API error: {text}"),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StratumError::Network(e.to_string()))?;
        let data: Value = serde_json::from_slice(&bytes).map_err(|e| {
            StratumError::Parse(format!("Failed to parse {endpoint_id} response: {e}"))
        })?;

        Ok(SecResponse {
            data,
            credit_usage: usage,
            source: format!("SEC API {endpoint_id}"),
        })
    }

    async fn get(&self, endpoint_id: &str, path: &str, params: &[(&str, &str)]) -> Result<SecResponse> {
        self.request(endpoint_id, path, Method::GET, params, None).await
    }

    async fn post(&self, endpoint_id: &str, path: &str, body: &Value) -> Result<SecResponse> {
        self.request(endpoint_id, path, Method::POST, &[], Some(body)).await
    }
}

#[async_trait]
impl SecProvider for SecApiClient {
    fn name(&self) -> &str {
        "sec-api.io"
    }

    async fn map_ticker(&self, ticker: &Ticker) -> Result<SecResponse> {
        let endpoint = format!("mapping/ticker/{ticker}");
        self.get(&endpoint, &endpoint, &[]).await
    }

    async fn map_name(&self, name: &str) -> Result<SecResponse> {
        let endpoint = format!("mapping/name/{name}");
        self.get(&endpoint, &endpoint, &[]).await
    }

    async fn entity(&self, cik: &str) -> Result<SecResponse> {
        self.get("edgar-entities", "edgar-entities", &[("cik", cik)])
            .await
    }

    async fn query_filings(&self, query: &FilingQuery) -> Result<SecResponse> {
        self.post("query", "", &query.to_body()).await
    }

    async fn xbrl_to_json(&self, accession_number: &str) -> Result<SecResponse> {
        self.get(
            "xbrl-to-json",
            "xbrl-to-json",
            &[("accession-no", accession_number)],
        )
        .await
    }

    async fn full_text_search(&self, query: &FilingQuery) -> Result<SecResponse> {
        self.post("full-text-search", "full-text-search", &query.to_body())
            .await
    }

    #[instrument(skip(self))]
    async fn download_filing_text(&self, url: &str) -> Result<String> {
        debug!("Downloading filing document");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| StratumError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StratumError::NotFound(format!(
                "Failed to download filing: HTTP {}",
                response.status()
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| StratumError::Network(e.to_string()))?;

        let text = extract_text(&html);
        debug!("Extracted {} characters of filing text", text.len());
        Ok(text)
    }
}
