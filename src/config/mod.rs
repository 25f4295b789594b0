// ==========================================
// Ministry Performance Tracking - Configuration Layer
// ==========================================
// Responsibility: environment-driven configuration for the measurement
// backend adapter. The engine itself carries no configuration state.
// ==========================================

use serde::{Deserialize, Serialize};

/// Default measurement backend endpoint (local development)
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Default per-call transport timeout, seconds. There is no
/// engine-internal deadline: a timed-out call is just a failed call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ==========================================
// ClientConfig
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the measurement backend
    pub base_url: String,
    /// Per-call transport timeout, seconds
    pub timeout_secs: u64,
    /// Optional bearer token attached to every call
    pub api_token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            api_token: None,
        }
    }
}

impl ClientConfig {
    /// Read configuration from the environment.
    ///
    /// # Environment variables
    /// - KPI_API_BASE_URL: backend base URL (default: localhost)
    /// - KPI_API_TIMEOUT_SECS: per-call timeout (default: 30)
    /// - KPI_API_TOKEN: optional bearer token
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("KPI_API_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.base_url),
            timeout_secs: std::env::var("KPI_API_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.timeout_secs),
            api_token: std::env::var("KPI_API_TOKEN")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        }
    }

    /// Base URL with any trailing slash removed
    pub fn base_url_trimmed(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.api_token.is_none());
    }

    #[test]
    fn test_base_url_trimmed() {
        let config = ClientConfig {
            base_url: "https://dashboard.example.gov/api/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.base_url_trimmed(), "https://dashboard.example.gov/api");
    }
}
