//! Request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::{Value, json};
use stratum::{
    AnalysisRequest, AnalysisResponse, CompanyLookupRequest, CompanyLookupResponse, CreditReport,
    FilingAnalysis, FilingRequest, FilingsResponse, FullTextSearchRequest, SearchResponse,
    StatusCheck, StatusCheckCreate, StratumError, XbrlRequest, XbrlResponse,
};
use tracing::info;

use crate::error::ApiResult;
use crate::state::AppState;

/// Most status checks returned by one listing.
const STATUS_LIST_LIMIT: usize = 1000;

/// Service version reported by the health check.
const SERVICE_VERSION: &str = "2.0.0";

const FEATURES: [&str; 3] = ["sec_integration", "ai_analysis", "credit_management"];

fn require_positive_limit(limit: usize) -> Result<(), StratumError> {
    if limit == 0 {
        return Err(StratumError::InvalidParameter(
            "limit must be at least 1".to_string(),
        ));
    }
    Ok(())
}

pub(crate) async fn root() -> Json<Value> {
    Json(json!({ "message": "Stratum SEC-Enhanced API v2.0" }))
}

pub(crate) async fn create_status_check(
    State(state): State<Arc<AppState>>,
    Json(input): Json<StatusCheckCreate>,
) -> ApiResult<Json<StatusCheck>> {
    let check = StatusCheck::new(input.client_name);
    state.store.insert(&check).await?;
    Ok(Json(check))
}

pub(crate) async fn list_status_checks(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<StatusCheck>>> {
    Ok(Json(state.store.list(STATUS_LIST_LIMIT).await?))
}

pub(crate) async fn sec_credits(State(state): State<Arc<AppState>>) -> Json<CreditReport> {
    Json(state.credits().report())
}

pub(crate) async fn company_lookup(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CompanyLookupRequest>,
) -> ApiResult<Json<CompanyLookupResponse>> {
    info!(
        ticker = ?request.ticker,
        cik = ?request.cik,
        company_name = ?request.company_name,
        "Company lookup"
    );
    Ok(Json(state.service.company_lookup(&request).await?))
}

pub(crate) async fn fetch_filings(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FilingRequest>,
) -> ApiResult<Json<FilingsResponse>> {
    require_positive_limit(request.limit)?;
    Ok(Json(state.service.fetch_filings(&request).await?))
}

pub(crate) async fn analyze_filing(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalysisRequest>,
) -> ApiResult<Json<AnalysisResponse<FilingAnalysis>>> {
    Ok(Json(state.service.analyze_filing(&request).await?))
}

pub(crate) async fn extract_xbrl(
    State(state): State<Arc<AppState>>,
    Query(request): Query<XbrlRequest>,
) -> ApiResult<Json<XbrlResponse>> {
    Ok(Json(
        state.service.extract_xbrl(&request.accession_number).await?,
    ))
}

pub(crate) async fn full_text_search(
    State(state): State<Arc<AppState>>,
    Query(request): Query<FullTextSearchRequest>,
) -> ApiResult<Json<SearchResponse>> {
    require_positive_limit(request.limit)?;
    Ok(Json(state.service.full_text_search(&request).await?))
}

pub(crate) async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": SERVICE_VERSION,
        "features": FEATURES,
        "sec_credits": state.credits().status(),
    }))
}
