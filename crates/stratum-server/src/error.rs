//! Mapping of gateway errors to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use stratum::StratumError;
use tracing::{error, warn};

/// Error returned by request handlers.
///
/// Bodies use the `{"detail": ...}` envelope. A refused credit charge
/// answers 429 with the endpoint's usage as the detail object.
#[derive(Debug)]
pub struct ApiError(pub StratumError);

impl From<StratumError> for ApiError {
    fn from(err: StratumError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            StratumError::CreditLimit(_) | StratumError::UpstreamRateLimited => {
                StatusCode::TOO_MANY_REQUESTS
            }
            StratumError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            StratumError::NotFound(_) => StatusCode::NOT_FOUND,
            StratumError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            StratumError::Network(_)
            | StratumError::Parse(_)
            | StratumError::Store(_)
            | StratumError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), "{}", self.0);
        } else {
            warn!(status = status.as_u16(), "{}", self.0);
        }

        let detail = match &self.0 {
            StratumError::CreditLimit(exceeded) => json!({
                "error": "SEC API credit limit reached",
                "endpoint": exceeded.endpoint_id,
                "used": exceeded.used,
                "limit": exceeded.limit,
                "reset_time": exceeded.reset_time,
            }),
            other => json!(other.to_string()),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

/// Result type for request handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
