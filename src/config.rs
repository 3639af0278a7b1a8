// Runtime configuration:
// - Upstream endpoint URL and request timeout
// - Database connection string
// - Server listening address/port
// - Rate-limit quotas and window
// - Debug flag for diagnostic error detail

use dotenv::dotenv;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub upstream_endpoint: String,
    pub upstream_timeout_secs: u64,
    pub address_rate_limit: u32,
    pub transaction_rate_limit: u32,
    pub rate_limit_window_secs: u64,
    pub debug: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:cache.db".to_string());
        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080);
        let upstream_endpoint = env::var("UPSTREAM_ENDPOINT")
            .unwrap_or_else(|_| "https://blockchain.info".to_string());
        let upstream_timeout_secs = env::var("UPSTREAM_TIMEOUT_SECS")
            .map(|v| v.parse().unwrap_or(10))
            .unwrap_or(10);
        let address_rate_limit = env::var("ADDRESS_RATE_LIMIT")
            .map(|v| v.parse().unwrap_or(10))
            .unwrap_or(10);
        let transaction_rate_limit = env::var("TRANSACTION_RATE_LIMIT")
            .map(|v| v.parse().unwrap_or(5))
            .unwrap_or(5);
        let rate_limit_window_secs = env::var("RATE_LIMIT_WINDOW_SECS")
            .map(|v| v.parse().unwrap_or(60))
            .unwrap_or(60);
        let debug = env::var("DEBUG")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            database_url,
            server_host,
            server_port,
            upstream_endpoint,
            upstream_timeout_secs,
            address_rate_limit,
            transaction_rate_limit,
            rate_limit_window_secs,
            debug,
        }
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs.max(1))
    }
}
