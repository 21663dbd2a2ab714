//! Shared HTTP client configuration and response handling.

use std::time::Duration;

use tracing::debug;

use crate::error::ApiError;

/// Production base URL of the Wrike v4 REST API.
pub const DEFAULT_WRIKE_API_URL: &str = "https://www.wrike.com/api/v4";

/// Production base URL of the Webex REST API.
pub const DEFAULT_WEBEX_API_URL: &str = "https://webexapis.com/v1";

const DEFAULT_USER_AGENT: &str = concat!("wrike-relay/", env!("CARGO_PKG_VERSION"));

/// Configuration for API client behavior.
///
/// Controls the base URL, user agent and request timeout. The timeout is
/// optional: with `None` an outbound call waits for as long as the upstream
/// takes.
///
/// # Examples
///
/// ```
/// use wrike_relay_sdk::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::wrike()
///     .with_api_url("http://localhost:9000")
///     .with_timeout(Some(Duration::from_secs(10)));
/// assert_eq!(config.api_url, "http://localhost:9000");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// User agent string for API requests
    pub user_agent: String,
    /// Request timeout duration
    pub timeout: Option<Duration>,
    /// API base URL, without trailing slash
    pub api_url: String,
}

impl ClientConfig {
    /// Defaults for the Wrike API.
    pub fn wrike() -> Self {
        Self::for_url(DEFAULT_WRIKE_API_URL)
    }

    /// Defaults for the Webex API.
    pub fn webex() -> Self {
        Self::for_url(DEFAULT_WEBEX_API_URL)
    }

    fn for_url(url: &str) -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
            api_url: url.to_string(),
        }
    }

    /// Set the API base URL. A trailing slash is dropped.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.api_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }


    /// Build a full URL for an API path. A leading slash on `path` is optional.
    pub fn url_for(&self, path: &str) -> String {
        let normalized_path = path.strip_prefix('/').unwrap_or(path);
        format!("{}/{}", self.api_url, normalized_path)
    }

    pub(crate) fn build_http_client(&self) -> Result<reqwest::Client, ApiError> {
        let mut builder = reqwest::Client::builder().user_agent(&self.user_agent);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        builder.build().map_err(|e| ApiError::Configuration {
            message: format!("Failed to create HTTP client: {}", e),
        })
    }
}

/// Turn a non-2xx response into the matching [`ApiError`].
pub(crate) async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    debug!(status = status.as_u16(), url = %response.url(), "API request failed");

    Err(match status.as_u16() {
        404 => ApiError::NotFound,
        403 => ApiError::AuthorizationFailed,
        401 => ApiError::AuthenticationFailed,
        _ => {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            ApiError::HttpError {
                status: status.as_u16(),
                message,
            }
        }
    })
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
