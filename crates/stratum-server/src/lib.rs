#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/stratum-credit/stratum/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Command line and environment configuration.
pub mod config;
/// Error to response mapping.
pub mod error;
mod handlers;
/// Router construction.
pub mod routes;
/// Shared application state.
pub mod state;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use routes::build_router;
pub use state::AppState;
