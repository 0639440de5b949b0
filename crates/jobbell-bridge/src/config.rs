use serde::{Deserialize, Serialize};

/// Configuration for reaching the job-board server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the REST API, e.g. `https://localhost:7100/api`.
    pub base_url: String,
    /// URL of the real-time notification stream endpoint.
    pub realtime_url: String,
    /// Timeout for one-shot REST requests, in seconds. Does not apply to
    /// the real-time stream, which stays open indefinitely.
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://localhost:7100/api".to_string(),
            realtime_url: "https://localhost:7100/hubs/notifications".to_string(),
            request_timeout_secs: 15,
        }
    }
}

/// Global application configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Configuration for the server endpoints of the application.
    pub api_config: ApiConfig,
}
