//! SEC gateway service composing the upstream provider, the analyzer, and the
//! credit tracker.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{debug, info, warn};

use stratum_analysis::{AnalysisType, FilingAnalysis, FilingAnalyzer};
use stratum_core::{
    AnalysisRequest, AnalysisResponse, CompanyData, CompanyLookupRequest, CompanyLookupResponse,
    CreditUsage, Filing, FilingQuery, FilingRequest, FilingsResponse, FullTextSearchRequest,
    Result, SearchResponse, SecProvider, StratumError, Ticker, XbrlResponse,
};
use stratum_credits::{CreditReport, CreditTracker};

/// Number of periodic reports fetched with every company lookup.
const RECENT_FILINGS: usize = 5;

/// Orchestrates the SEC operations exposed by the REST API.
///
/// Every response envelope carries the tracker's status map at the time it
/// was built. Upstream calls are charged by the provider, so the service
/// itself never touches the tracker except to read it.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use stratum::{CreditTracker, PlaceholderAnalyzer, SecApiClient, SecApiConfig, SecService};
///
/// let credits = Arc::new(CreditTracker::default());
/// let client = SecApiClient::new(SecApiConfig::default(), credits.clone())?;
/// let service = SecService::new(Arc::new(client), Arc::new(PlaceholderAnalyzer::new()), credits);
///
/// let lookup = service.company_lookup(&CompanyLookupRequest::ticker("AAPL")).await?;
/// println!("CIK {}", lookup.cik);
/// ```
#[derive(Debug, Clone)]
pub struct SecService {
    provider: Arc<dyn SecProvider>,
    analyzer: Arc<dyn FilingAnalyzer>,
    credits: Arc<CreditTracker>,
}

impl SecService {
    /// Create a service. `credits` must be the tracker `provider` charges.
    #[must_use]
    pub fn new(
        provider: Arc<dyn SecProvider>,
        analyzer: Arc<dyn FilingAnalyzer>,
        credits: Arc<CreditTracker>,
    ) -> Self {
        debug!(
            provider = provider.name(),
            analyzer = analyzer.name(),
            "Creating SEC service"
        );
        Self {
            provider,
            analyzer,
            credits,
        }
    }

    /// The shared credit tracker.
    #[must_use]
    pub const fn credits(&self) -> &Arc<CreditTracker> {
        &self.credits
    }

    /// Snapshot of credit usage across all endpoints.
    #[must_use]
    pub fn credit_report(&self) -> CreditReport {
        self.credits.report()
    }

    fn credit_usage(&self) -> CreditUsage {
        self.credits.status()
    }

    /// Resolves a company and gathers its entity record and latest periodic
    /// reports.
    ///
    /// The ticker takes precedence over the company name, which takes
    /// precedence over a CIK given directly.
    ///
    /// # Errors
    /// [`StratumError::NotFound`] when no CIK can be resolved; any upstream
    /// error, including an exhausted credit budget, is propagated.
    pub async fn company_lookup(
        &self,
        request: &CompanyLookupRequest,
    ) -> Result<CompanyLookupResponse> {
        let mut company_data = CompanyData::default();

        let cik = if let Some(ticker) = non_empty(request.ticker.as_deref()) {
            let mapping = self.provider.map_ticker(&Ticker::new(ticker)).await?;
            let record = mapping.first_record();
            let cik = cik_of(&record);
            company_data.mapping = Some(record);
            cik
        } else if let Some(name) = non_empty(request.company_name.as_deref()) {
            let mapping = self.provider.map_name(name).await?;
            let record = mapping.first_record();
            let cik = cik_of(&record);
            company_data.mapping = Some(record);
            cik
        } else {
            non_empty(request.cik.as_deref()).map(str::to_string)
        };

        let Some(cik) = cik else {
            warn!(?request, "Company not found");
            return Err(StratumError::NotFound(
                "Company not found in SEC database".to_string(),
            ));
        };

        let entity = self.provider.entity(&cik).await?;
        company_data.entity_details = Some(entity.first_record());

        let filings = self
            .provider
            .query_filings(&FilingQuery::periodic_reports(&cik, RECENT_FILINGS))
            .await?;
        company_data.recent_filings = Some(match filings.data {
            Value::Array(items) => json!({ "filings": items }),
            other => other,
        });

        info!(cik = %cik, "Company lookup complete");
        Ok(CompanyLookupResponse {
            success: true,
            cik,
            ticker: request.ticker.clone(),
            company_data,
            credit_usage: self.credit_usage(),
        })
    }

    /// Fetches the most recent filings of one form type for a ticker.
    ///
    /// # Errors
    /// Propagates lookup and upstream errors.
    pub async fn fetch_filings(&self, request: &FilingRequest) -> Result<FilingsResponse> {
        let lookup = self
            .company_lookup(&CompanyLookupRequest::ticker(request.ticker.clone()))
            .await?;

        let query = FilingQuery::form_type(&lookup.cik, &request.filing_type, request.limit);
        let result = self.provider.query_filings(&query).await?;

        let filings: Vec<Filing> = filing_list(&result.data)
            .iter()
            .map(Filing::from_upstream)
            .collect();

        debug!(
            ticker = %request.ticker,
            count = filings.len(),
            "Fetched {} filings",
            request.filing_type
        );
        Ok(FilingsResponse {
            success: true,
            ticker: request.ticker.clone(),
            cik: lookup.cik,
            filing_type: request.filing_type.clone(),
            filings_count: filings.len(),
            filings,
            credit_usage: self.credit_usage(),
        })
    }

    /// Downloads a filing and runs the requested analysis on its text.
    ///
    /// # Errors
    /// [`StratumError::NotFound`] when the document cannot be downloaded or
    /// contains no text.
    pub async fn analyze_filing(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResponse<FilingAnalysis>> {
        let content = match self.provider.download_filing_text(&request.filing_url).await {
            Ok(text) => text,
            Err(e) => {
                warn!(url = %request.filing_url, error = %e, "Filing download failed");
                String::new()
            }
        };
        if content.is_empty() {
            return Err(StratumError::NotFound(
                "Could not retrieve filing content".to_string(),
            ));
        }

        let analysis_type = AnalysisType::parse(&request.analysis_type);
        let analysis = self
            .analyzer
            .analyze(&content, &request.ticker, analysis_type)
            .await?;

        Ok(AnalysisResponse {
            success: true,
            ticker: request.ticker.clone(),
            filing_url: request.filing_url.clone(),
            analysis_type: request.analysis_type.clone(),
            analysis,
            credit_usage: self.credit_usage(),
        })
    }

    /// Fetches the XBRL financial data of a filing as JSON.
    ///
    /// # Errors
    /// Propagates upstream errors.
    pub async fn extract_xbrl(&self, accession_number: &str) -> Result<XbrlResponse> {
        let result = self.provider.xbrl_to_json(accession_number).await?;

        Ok(XbrlResponse {
            success: true,
            accession_number: accession_number.to_string(),
            xbrl_data: result.data,
            credit_usage: self.credit_usage(),
        })
    }

    /// Searches the full text of a company's filings.
    ///
    /// # Errors
    /// Propagates lookup and upstream errors.
    pub async fn full_text_search(&self, request: &FullTextSearchRequest) -> Result<SearchResponse> {
        let lookup = self
            .company_lookup(&CompanyLookupRequest::ticker(request.ticker.clone()))
            .await?;

        let query = FilingQuery::for_company(&lookup.cik, &request.query, request.limit);
        let result = self.provider.full_text_search(&query).await?;

        Ok(SearchResponse {
            success: true,
            ticker: request.ticker.clone(),
            cik: lookup.cik,
            search_query: request.query.clone(),
            results: result.data,
            credit_usage: self.credit_usage(),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Reads the `cik` of a mapping record, which upstream sends as a string or
/// a number.
fn cik_of(record: &Value) -> Option<String> {
    match record.get("cik")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Filings of a query result: the `filings` array of an object, or the result
/// itself when it is a bare list.
fn filing_list(data: &Value) -> &[Value] {
    match data {
        Value::Array(items) => items,
        Value::Object(map) => map
            .get("filings")
            .and_then(Value::as_array)
            .map_or(&[][..], Vec::as_slice),
        _ => &[],
    }
}
