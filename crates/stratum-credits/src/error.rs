//! Error returned when an endpoint has used up its credits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An endpoint reached its request ceiling for the current window.
///
/// The rejected call has already been counted against the endpoint, so
/// `used` equals `limit` in the payload.
#[derive(Error, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[error("SEC API credit limit reached for {endpoint_id}: {used}/{limit}, resets at {reset_time}")]
pub struct RateLimitExceeded {
    /// Identifier of the saturated upstream endpoint.
    pub endpoint_id: String,
    /// Requests counted in the current window.
    pub used: u32,
    /// Ceiling for the window.
    pub limit: u32,
    /// When the window resets.
    pub reset_time: DateTime<Utc>,
}
