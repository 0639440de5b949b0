use std::time::Duration;

use jobbell_bridge::{
    config::ApiConfig,
    notification::{Notification, NotificationId},
};
use reqwest::Url;

/// Errors that can occur while talking to the job-board REST API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The configured base URL or a derived endpoint is not a valid URL.
    #[error("invalid API endpoint: {0}")]
    InvalidEndpoint(String),
    /// The request failed or the server answered with an error status.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Client for the notification REST endpoints.
///
/// Cheap to clone; the underlying `reqwest` client is pooled and shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(client: reqwest::Client, config: &ApiConfig) -> Result<Self, ApiError> {
        // Url::join treats a path without a trailing slash as a file and
        // would drop its last segment.
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).map_err(|e| ApiError::InvalidEndpoint(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            timeout: Duration::from_secs(config.request_timeout_secs),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidEndpoint(e.to_string()))
    }

    /// One-shot retrieval of the user's current notification list, newest
    /// first (server contract).
    pub async fn fetch_notifications(&self, user: &str) -> Result<Vec<Notification>, ApiError> {
        let mut url = self.endpoint("notifications")?;
        url.query_pairs_mut().append_pair("user", user);

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    /// Mark a notification as read server-side.
    pub async fn mark_read(&self, id: NotificationId) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("notifications/{id}/read"))?;
        self.client
            .put(url)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
