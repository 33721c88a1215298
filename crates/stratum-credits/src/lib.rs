#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/stratum-credit/stratum/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Time sources used by the tracker.
pub mod clock;
/// The rate limit error returned by [`CreditTracker::charge`].
pub mod error;
/// The credit tracker and its usage views.
pub mod tracker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::RateLimitExceeded;
pub use tracker::{CreditPolicy, CreditReport, CreditStatus, CreditTracker, UsageRecord};
