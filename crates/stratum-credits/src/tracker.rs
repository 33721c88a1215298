//! Per-endpoint credit tracking.
//!
//! A [`CreditTracker`] maps each upstream endpoint identifier to a
//! [`UsageRecord`]. Records are created on first use, roll over lazily once
//! their reset time has passed, and are never removed.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::RateLimitExceeded;

/// Requests allowed per endpoint and window unless configured otherwise.
pub const DEFAULT_CREDIT_LIMIT: u32 = 100;

/// Length of a credit window in seconds unless configured otherwise.
pub const DEFAULT_WINDOW_SECS: i64 = 3600;

/// Limit and window applied to newly created usage records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CreditPolicy {
    /// Maximum requests per window.
    pub limit: u32,
    /// Length of a window.
    pub window: TimeDelta,
}

impl CreditPolicy {
    /// Creates a policy with the given limit and window length.
    #[must_use]
    pub const fn new(limit: u32, window: TimeDelta) -> Self {
        Self { limit, window }
    }
}

impl Default for CreditPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_CREDIT_LIMIT, TimeDelta::seconds(DEFAULT_WINDOW_SECS))
    }
}

/// Usage of a single upstream endpoint within its current window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    /// Requests counted in the current window.
    pub used: u32,
    /// Maximum requests per window, fixed when the record is created.
    pub limit: u32,
    /// When `used` goes back to zero.
    pub reset_time: DateTime<Utc>,
    /// Time of the most recent counted request.
    pub last_request: DateTime<Utc>,
}

impl UsageRecord {
    fn new(policy: &CreditPolicy, now: DateTime<Utc>) -> Self {
        Self {
            used: 0,
            limit: policy.limit,
            reset_time: now + policy.window,
            last_request: now,
        }
    }

    /// Resets the count if `now` is past the reset time. Returns true on reset.
    fn roll_over(&mut self, now: DateTime<Utc>, window: TimeDelta) -> bool {
        if now > self.reset_time {
            self.used = 0;
            self.reset_time = now + window;
            true
        } else {
            false
        }
    }

    const fn is_saturated(&self) -> bool {
        self.used >= self.limit
    }

    fn exceeded(&self, endpoint_id: &str) -> RateLimitExceeded {
        RateLimitExceeded {
            endpoint_id: endpoint_id.to_string(),
            used: self.used,
            limit: self.limit,
            reset_time: self.reset_time,
        }
    }
}

/// Read-only view of an endpoint's usage, as reported by [`CreditTracker::status`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreditStatus {
    /// Requests counted in the current window.
    pub used: u32,
    /// Requests left before the ceiling is reached.
    pub remaining: u32,
    /// Maximum requests per window.
    pub limit: u32,
    /// `used / limit` as a percentage, rounded to two decimals.
    pub percentage: f64,
    /// Whole seconds until the window resets, never negative.
    pub reset_in_seconds: i64,
}

impl CreditStatus {
    fn from_record(record: &UsageRecord, now: DateTime<Utc>) -> Self {
        let percentage = if record.limit == 0 {
            100.0
        } else {
            let raw = f64::from(record.used) / f64::from(record.limit) * 100.0;
            (raw * 100.0).round() / 100.0
        };

        Self {
            used: record.used,
            remaining: record.limit.saturating_sub(record.used),
            limit: record.limit,
            percentage,
            reset_in_seconds: (record.reset_time - now).num_seconds().max(0),
        }
    }
}

/// Snapshot of every tracked endpoint, served by the credits route.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreditReport {
    /// Status per endpoint identifier.
    pub credit_status: BTreeMap<String, CreditStatus>,
    /// Number of distinct endpoints charged so far.
    pub total_endpoints: usize,
    /// When the snapshot was taken.
    pub timestamp: DateTime<Utc>,
}

/// Tracks request credits per upstream endpoint.
///
/// All mutation happens under a single lock, so a charge's
/// rollover-increment-check sequence is atomic with respect to concurrent
/// charges. Share it between callers with an `Arc`.
#[derive(Debug)]
pub struct CreditTracker {
    records: Mutex<HashMap<String, UsageRecord>>,
    policy: CreditPolicy,
    clock: Arc<dyn Clock>,
}

impl Default for CreditTracker {
    fn default() -> Self {
        Self::new(CreditPolicy::default())
    }
}

impl CreditTracker {
    /// Creates a tracker reading time from the system clock.
    #[must_use]
    pub fn new(policy: CreditPolicy) -> Self {
        Self::with_clock(policy, Arc::new(SystemClock))
    }

    /// Creates a tracker reading time from `clock`.
    #[must_use]
    pub fn with_clock(policy: CreditPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            policy,
            clock,
        }
    }

    /// Returns the policy applied to new records.
    #[must_use]
    pub const fn policy(&self) -> &CreditPolicy {
        &self.policy
    }

    /// Charges one credit against `endpoint_id`.
    ///
    /// Creates the record on first use and resets it when its window has
    /// expired. The call is counted before the ceiling is checked, so the
    /// call that brings `used` up to `limit` is both counted and rejected.
    /// Once an endpoint is saturated, further calls in the same window are
    /// rejected without being counted.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitExceeded`] when `used >= limit` after the charge.
    pub fn charge(&self, endpoint_id: &str) -> Result<UsageRecord, RateLimitExceeded> {
        let now = self.clock.now();
        let mut records = self.lock();

        let record = records.entry(endpoint_id.to_string()).or_insert_with(|| {
            debug!(endpoint = endpoint_id, "Tracking new SEC endpoint");
            UsageRecord::new(&self.policy, now)
        });

        if record.roll_over(now, self.policy.window) {
            debug!(endpoint = endpoint_id, "Credit window rolled over");
        }

        if record.is_saturated() {
            warn!(
                endpoint = endpoint_id,
                used = record.used,
                limit = record.limit,
                "SEC API credits exhausted"
            );
            return Err(record.exceeded(endpoint_id));
        }

        record.used += 1;
        record.last_request = now;

        if record.is_saturated() {
            warn!(
                endpoint = endpoint_id,
                used = record.used,
                limit = record.limit,
                "SEC API credit limit reached"
            );
            return Err(record.exceeded(endpoint_id));
        }

        Ok(record.clone())
    }

    /// Returns the status of every tracked endpoint.
    ///
    /// Expired windows are reset as a side effect; nothing else changes.
    #[must_use]
    pub fn status(&self) -> BTreeMap<String, CreditStatus> {
        let now = self.clock.now();
        let mut records = self.lock();

        records
            .iter_mut()
            .map(|(endpoint, record)| {
                record.roll_over(now, self.policy.window);
                (endpoint.clone(), CreditStatus::from_record(record, now))
            })
            .collect()
    }

    /// Returns [`status`](Self::status) together with the endpoint count and
    /// the snapshot time.
    #[must_use]
    pub fn report(&self) -> CreditReport {
        let credit_status = self.status();
        CreditReport {
            total_endpoints: credit_status.len(),
            credit_status,
            timestamp: self.clock.now(),
        }
    }

    /// Returns the current record for `endpoint_id`, if it has been charged.
    #[must_use]
    pub fn usage(&self, endpoint_id: &str) -> Option<UsageRecord> {
        self.lock().get(endpoint_id).cloned()
    }

    /// Number of distinct endpoints charged so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if no endpoint has been charged yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // The map only holds counters, so a panic mid-update cannot leave it in a
    // state worth refusing to read.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, UsageRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
