//! Error types for SEC gateway operations.
//!
//! This module defines [`StratumError`] which covers every failure that can
//! occur while charging credits, calling the upstream SEC API, running
//! analysis, or persisting status checks.

use stratum_credits::RateLimitExceeded;
use thiserror::Error;

/// Errors that can occur during gateway operations.
#[derive(Error, Debug)]
pub enum StratumError {
    /// The local credit tracker refused the call before it was sent.
    #[error(transparent)]
    CreditLimit(#[from] RateLimitExceeded),

    /// The upstream SEC API answered with HTTP 429.
    #[error("SEC API rate limit exceeded")]
    UpstreamRateLimited,

    /// The upstream SEC API answered with a non-success status.
    #[error("{message}")]
    Upstream {
        /// HTTP status returned by the upstream API.
        status: u16,
        /// Error description including the upstream body.
        message: String,
    },

    /// The upstream API could not be reached (connection failure, timeout, etc.).
    #[error("SEC API request failed: {0}")]
    Network(String),

    /// An upstream payload could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The requested company, filing, or document does not exist.
    #[error("{0}")]
    NotFound(String),

    /// An invalid parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The status-check store failed.
    #[error("Store error: {0}")]
    Store(String),

    /// Any other error.
    #[error("{0}")]
    Other(String),
}

impl StratumError {
    /// Returns true if this error means a request budget was exhausted,
    /// locally or upstream.
    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        matches!(self, Self::CreditLimit(_) | Self::UpstreamRateLimited)
    }
}

/// Result type alias using [`StratumError`].
pub type Result<T> = std::result::Result<T, StratumError>;
