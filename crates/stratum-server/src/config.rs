//! Command line and environment configuration.

use chrono::TimeDelta;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use stratum::{CreditPolicy, SecApiConfig};

/// Longest accepted credit window, one year.
pub const MAX_CREDIT_WINDOW_SECS: i64 = 366 * 24 * 60 * 60;

/// Server configuration. Every flag can also be set through its environment
/// variable.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 8001)]
    pub port: u16,

    /// Base URL of the SEC API
    #[arg(long, env = "SEC_BASE_URL", default_value = stratum::sec::DEFAULT_BASE_URL)]
    pub sec_base_url: String,

    /// SEC API token
    #[arg(long, env = "SEC_API_KEY", hide_env_values = true)]
    pub sec_api_key: Option<String>,

    /// SQLite file for status checks; kept in memory when unset
    #[arg(long, env = "DATABASE_PATH")]
    pub database_path: Option<PathBuf>,

    /// Requests allowed per endpoint per window
    #[arg(long, env = "SEC_CREDIT_LIMIT", default_value_t = 100)]
    pub credit_limit: u32,

    /// Length of the credit window in seconds
    #[arg(
        long,
        env = "SEC_CREDIT_WINDOW_SECS",
        default_value_t = 3600,
        value_parser = clap::value_parser!(i64).range(1..=MAX_CREDIT_WINDOW_SECS)
    )]
    pub credit_window_secs: i64,

    /// Timeout for upstream requests in seconds
    #[arg(long, env = "SEC_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// User agent for upstream requests
    #[arg(long, env = "SEC_USER_AGENT")]
    pub user_agent: Option<String>,
}

impl Config {
    /// Credit policy for the shared tracker.
    #[must_use]
    pub fn credit_policy(&self) -> CreditPolicy {
        CreditPolicy::new(
            self.credit_limit,
            TimeDelta::seconds(self.credit_window_secs.clamp(1, MAX_CREDIT_WINDOW_SECS)),
        )
    }

    /// Connection settings for the upstream client.
    #[must_use]
    pub fn sec_api_config(&self) -> SecApiConfig {
        SecApiConfig {
            base_url: self.sec_base_url.clone(),
            api_key: self.sec_api_key.clone().filter(|key| !key.is_empty()),
            timeout: Duration::from_secs(self.request_timeout_secs),
            user_agent: self.user_agent.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let config = Config::try_parse_from([
            "stratum-server",
            "--port",
            "9000",
            "--sec-api-key",
            "secret",
            "--credit-limit",
            "5",
            "--credit-window-secs",
            "60",
            "--database-path",
            "/tmp/status.db",
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/status.db")));

        let policy = config.credit_policy();
        assert_eq!(policy.limit, 5);
        assert_eq!(policy.window, TimeDelta::seconds(60));

        let sec = config.sec_api_config();
        assert_eq!(sec.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_empty_api_key_is_unset() {
        let config =
            Config::try_parse_from(["stratum-server", "--sec-api-key", ""]).unwrap();
        assert!(config.sec_api_config().api_key.is_none());
    }

    #[test]
    fn test_window_out_of_range_is_rejected() {
        assert!(Config::try_parse_from(["stratum-server", "--credit-window-secs", "0"]).is_err());
        assert!(
            Config::try_parse_from([
                "stratum-server",
                "--credit-window-secs",
                "9223372036854775807",
            ])
            .is_err()
        );
    }

    #[test]
    fn test_window_is_clamped_when_set_directly() {
        let mut config = Config::try_parse_from(["stratum-server"]).unwrap();
        assert_eq!(config.credit_policy().window, TimeDelta::seconds(3600));

        config.credit_window_secs = i64::MAX;
        assert_eq!(
            config.credit_policy().window,
            TimeDelta::seconds(MAX_CREDIT_WINDOW_SECS)
        );
    }
}
