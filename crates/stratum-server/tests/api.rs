//! HTTP tests against the full router with a mocked SEC API.

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use chrono::TimeDelta;
use serde_json::{Value, json};
use stratum::{
    CreditPolicy, CreditTracker, InMemoryStatusStore, PlaceholderAnalyzer, SecApiClient,
    SecApiConfig, SecService, SqliteStatusStore, StatusStore,
};
use stratum_server::{AppState, build_router};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app_with(server: &MockServer, limit: u32, store: Arc<dyn StatusStore>) -> Router {
    let credits = Arc::new(CreditTracker::new(CreditPolicy::new(
        limit,
        TimeDelta::seconds(3600),
    )));
    let config = SecApiConfig {
        base_url: server.uri(),
        api_key: Some("test-token".to_string()),
        ..Default::default()
    };
    let client = SecApiClient::new(config, credits.clone()).unwrap();
    let service = SecService::new(
        Arc::new(client),
        Arc::new(PlaceholderAnalyzer::new()),
        credits,
    );
    build_router(Arc::new(AppState::new(service, store)))
}

fn app(server: &MockServer, limit: u32) -> Router {
    app_with(server, limit, Arc::new(InMemoryStatusStore::new()))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Mounts the three upstream calls a ticker lookup makes.
async fn mount_lookup(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/mapping/ticker/AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "Apple Inc.", "ticker": "AAPL", "cik": "320193"}
        ])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/edgar-entities"))
        .and(query_param("cik", "320193"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"cik": "320193", "name": "Apple Inc."}])),
        )
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": {"value": 1},
            "filings": [{
                "accessionNo": "0000320193-23-000106",
                "filedAt": "2023-11-02T18:08:27-04:00",
                "formType": "10-K",
                "companyName": "Apple Inc.",
                "ticker": "AAPL",
                "cik": "320193",
                "periodOfReport": "2023-09-30"
            }]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_root() {
    let server = MockServer::start().await;
    let app = app(&server, 100);

    let (status, body) = send(&app, get("/api/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Stratum SEC-Enhanced API v2.0");
}

#[tokio::test]
async fn test_status_checks_roundtrip() {
    let server = MockServer::start().await;
    let app = app(&server, 100);

    let (status, created) =
        send(&app, post_json("/api/status", json!({"client_name": "dashboard"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["client_name"], "dashboard");
    assert!(created["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert!(created["timestamp"].is_string());

    send(&app, post_json("/api/status", json!({"client_name": "cli"}))).await;

    let (status, list) = send(&app, get("/api/status")).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["client_name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["dashboard", "cli"]);
}

#[tokio::test]
async fn test_status_checks_persist_in_sqlite() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("status.db");

    {
        let app = app_with(&server, 100, Arc::new(SqliteStatusStore::new(&db).unwrap()));
        let (status, _) =
            send(&app, post_json("/api/status", json!({"client_name": "first"}))).await;
        assert_eq!(status, StatusCode::OK);
    }

    let app = app_with(&server, 100, Arc::new(SqliteStatusStore::new(&db).unwrap()));
    let (_, list) = send(&app, get("/api/status")).await;
    assert_eq!(list[0]["client_name"], "first");
}

#[tokio::test]
async fn test_credits_and_health_start_empty() {
    let server = MockServer::start().await;
    let app = app(&server, 100);

    let (status, credits) = send(&app, get("/api/sec/credits")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(credits["total_endpoints"], 0);
    assert_eq!(credits["credit_status"], json!({}));

    let (status, health) = send(&app, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["version"], "2.0.0");
    assert_eq!(health["features"].as_array().unwrap().len(), 3);
    assert_eq!(health["sec_credits"], json!({}));
}

#[tokio::test]
async fn test_company_lookup() {
    let server = MockServer::start().await;
    mount_lookup(&server).await;
    let app = app(&server, 100);

    let (status, body) = send(
        &app,
        post_json("/api/sec/company/lookup", json!({"ticker": "AAPL"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["cik"], "320193");
    assert_eq!(body["company_data"]["mapping"]["name"], "Apple Inc.");
    assert_eq!(body["company_data"]["entity_details"]["cik"], "320193");
    assert_eq!(
        body["company_data"]["recent_filings"]["filings"][0]["formType"],
        "10-K"
    );

    let usage = &body["credit_usage"]["mapping/ticker/AAPL"];
    assert_eq!(usage["used"], 1);
    assert_eq!(usage["remaining"], 99);
    assert_eq!(usage["percentage"], 1.0);

    let (_, credits) = send(&app, get("/api/sec/credits")).await;
    assert_eq!(credits["total_endpoints"], 3);

    let (_, health) = send(&app, get("/api/health")).await;
    let sec_credits = health["sec_credits"].as_object().unwrap();
    assert_eq!(sec_credits.len(), 3);
    assert_eq!(sec_credits["mapping/ticker/AAPL"]["used"], 1);
    assert!(sec_credits.get("total_endpoints").is_none());
}

#[tokio::test]
async fn test_company_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mapping/ticker/ZZZZ"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    let app = app(&server, 100);

    let (status, body) = send(
        &app,
        post_json("/api/sec/company/lookup", json!({"ticker": "zzzz"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Company not found in SEC database");
}

#[tokio::test]
async fn test_credit_limit_returns_429_without_calling_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mapping/ticker/AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"cik": "320193"}])))
        .expect(0)
        .mount(&server)
        .await;

    // A limit of one rejects the first charge of every endpoint.
    let app = app(&server, 1);

    let (status, body) = send(
        &app,
        post_json("/api/sec/company/lookup", json!({"ticker": "AAPL"})),
    )
    .await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);

    let detail = &body["detail"];
    assert_eq!(detail["error"], "SEC API credit limit reached");
    assert_eq!(detail["endpoint"], "mapping/ticker/AAPL");
    assert_eq!(detail["used"], 1);
    assert_eq!(detail["limit"], 1);
    assert!(detail["reset_time"].is_string());

    let (_, credits) = send(&app, get("/api/sec/credits")).await;
    let usage = &credits["credit_status"]["mapping/ticker/AAPL"];
    assert_eq!(usage["remaining"], 0);
    assert_eq!(usage["percentage"], 100.0);
}

#[tokio::test]
async fn test_upstream_rate_limit_returns_429() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;
    let app = app(&server, 100);

    let (status, body) = send(
        &app,
        post_empty("/api/sec/xbrl/extract?accession_number=0000320193-23-000106"),
    )
    .await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["detail"], "SEC API rate limit exceeded");
}

#[tokio::test]
async fn test_upstream_error_status_is_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
        .mount(&server)
        .await;
    let app = app(&server, 100);

    let (status, body) = send(
        &app,
        post_empty("/api/sec/xbrl/extract?accession_number=1"),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "SEC API error: bad token");
}

#[tokio::test]
async fn test_fetch_filings() {
    let server = MockServer::start().await;
    mount_lookup(&server).await;
    let app = app(&server, 100);

    let (status, body) = send(
        &app,
        post_json("/api/sec/filings/fetch", json!({"ticker": "AAPL", "limit": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["filing_type"], "10-K");
    assert_eq!(body["filings_count"], 1);

    let filing = &body["filings"][0];
    assert_eq!(filing["accession_number"], "0000320193-23-000106");
    assert_eq!(filing["period_end_date"], "2023-09-30");
    assert_eq!(filing["link_to_txt"], Value::Null);

    // The lookup and the filings fetch each ran one query.
    assert_eq!(body["credit_usage"]["query"]["used"], 2);
}

#[tokio::test]
async fn test_fetch_filings_rejects_zero_limit() {
    let server = MockServer::start().await;
    let app = app(&server, 100);

    let (status, body) = send(
        &app,
        post_json("/api/sec/filings/fetch", json!({"ticker": "AAPL", "limit": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("limit"));
}

#[tokio::test]
async fn test_xbrl_extract() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/xbrl-to-json"))
        .and(query_param("accession-no", "0000320193-23-000106"))
        .and(query_param("token", "test-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"CoverPage": {"DocumentType": "10-K"}})),
        )
        .expect(1)
        .mount(&server)
        .await;
    let app = app(&server, 100);

    let (status, body) = send(
        &app,
        post_empty("/api/sec/xbrl/extract?accession_number=0000320193-23-000106"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accession_number"], "0000320193-23-000106");
    assert_eq!(body["xbrl_data"]["CoverPage"]["DocumentType"], "10-K");
    assert_eq!(body["credit_usage"]["xbrl-to-json"]["used"], 1);
}

#[tokio::test]
async fn test_full_text_search() {
    let server = MockServer::start().await;
    mount_lookup(&server).await;
    Mock::given(method("POST"))
        .and(path("/full-text-search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": {"value": 2}})))
        .expect(1)
        .mount(&server)
        .await;
    let app = app(&server, 100);

    let (status, body) = send(
        &app,
        post_empty("/api/sec/search/full-text?query=covenant&ticker=AAPL"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cik"], "320193");
    assert_eq!(body["search_query"], "covenant");
    assert_eq!(body["results"]["total"]["value"], 2);
    assert_eq!(body["credit_usage"]["full-text-search"]["used"], 1);
}

#[tokio::test]
async fn test_analyze_filing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Archives/edgar/data/acme-10k.htm"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<html><style>p {}</style><body><p>Credit Agreement  Covenants</p></body></html>",
        ))
        .mount(&server)
        .await;
    let app = app(&server, 100);

    let (status, body) = send(
        &app,
        post_json(
            "/api/sec/analyze/filing",
            json!({
                "ticker": "ACME",
                "filing_url": format!("{}/Archives/edgar/data/acme-10k.htm", server.uri()),
                "analysis_type": "covenant"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["analysis_type"], "covenant");
    assert_eq!(body["analysis"]["covenants_found"], true);
    assert_eq!(body["analysis"]["ticker"], "ACME");
    assert_eq!(body["credit_usage"], json!({}));
}

#[tokio::test]
async fn test_analyze_missing_filing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let app = app(&server, 100);

    let (status, body) = send(
        &app,
        post_json(
            "/api/sec/analyze/filing",
            json!({
                "ticker": "ACME",
                "filing_url": format!("{}/missing.htm", server.uri()),
                "analysis_type": "general"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Could not retrieve filing content");
}
