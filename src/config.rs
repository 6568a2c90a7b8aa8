//! Service configuration from environment variables

use {
    crate::{credentials::RegistrationIdentity, window::DEFAULT_WINDOW_SIZE},
    std::{env, time::Duration},
};

pub const DEFAULT_UPSTREAM_URL: &str = "http://20.244.56.144/evaluation-service";

/// Configuration for the numflow service
///
/// Loaded from environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Upstream provider base URL
    pub upstream_url: String,

    /// Inbound listener address
    pub bind_addr: String,

    /// Capacity of each category window
    pub window_size: usize,

    /// Hard timeout for number fetches in milliseconds
    pub fetch_timeout_ms: u64,

    /// Timeout for register/auth and analytics calls in milliseconds
    pub exchange_timeout_ms: u64,

    /// Single-slot credential file
    pub credential_path: String,

    /// Fixed identity sent to `/register`
    pub identity: RegistrationIdentity,
}

fn parsed_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn string_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

impl ServiceConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `NUMFLOW_UPSTREAM_URL` (default: http://20.244.56.144/evaluation-service)
    /// - `NUMFLOW_BIND_ADDR` (default: 0.0.0.0:9876)
    /// - `NUMFLOW_WINDOW_SIZE` (default: 10)
    /// - `NUMFLOW_FETCH_TIMEOUT_MS` (default: 500)
    /// - `NUMFLOW_EXCHANGE_TIMEOUT_MS` (default: 5000)
    /// - `NUMFLOW_CREDENTIAL_PATH` (default: credentials.json)
    /// - `NUMFLOW_REG_*` registration identity fields (default: empty)
    pub fn from_env() -> Self {
        let window_size = match parsed_or("NUMFLOW_WINDOW_SIZE", DEFAULT_WINDOW_SIZE) {
            0 => DEFAULT_WINDOW_SIZE,
            n => n,
        };

        Self {
            upstream_url: string_or("NUMFLOW_UPSTREAM_URL", DEFAULT_UPSTREAM_URL),
            bind_addr: string_or("NUMFLOW_BIND_ADDR", "0.0.0.0:9876"),
            window_size,
            fetch_timeout_ms: parsed_or("NUMFLOW_FETCH_TIMEOUT_MS", 500),
            exchange_timeout_ms: parsed_or("NUMFLOW_EXCHANGE_TIMEOUT_MS", 5_000),
            credential_path: string_or("NUMFLOW_CREDENTIAL_PATH", "credentials.json"),
            identity: RegistrationIdentity {
                email: string_or("NUMFLOW_REG_EMAIL", ""),
                name: string_or("NUMFLOW_REG_NAME", ""),
                mobile_no: string_or("NUMFLOW_REG_MOBILE", ""),
                github_username: string_or("NUMFLOW_REG_GITHUB", ""),
                roll_no: string_or("NUMFLOW_REG_ROLL_NO", ""),
                college_name: string_or("NUMFLOW_REG_COLLEGE", ""),
                access_code: string_or("NUMFLOW_REG_ACCESS_CODE", ""),
            },
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn exchange_timeout(&self) -> Duration {
        Duration::from_millis(self.exchange_timeout_ms)
    }
}
