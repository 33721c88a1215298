//! Router construction.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::state::AppState;

/// Build the application router with CORS and request tracing.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api", get(handlers::root))
        .route("/api/", get(handlers::root))
        .route(
            "/api/status",
            get(handlers::list_status_checks).post(handlers::create_status_check),
        )
        .route("/api/health", get(handlers::health))
        // SEC
        .route("/api/sec/credits", get(handlers::sec_credits))
        .route("/api/sec/company/lookup", post(handlers::company_lookup))
        .route("/api/sec/filings/fetch", post(handlers::fetch_filings))
        .route("/api/sec/analyze/filing", post(handlers::analyze_filing))
        .route("/api/sec/xbrl/extract", post(handlers::extract_xbrl))
        .route("/api/sec/search/full-text", post(handlers::full_text_search))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
