//! tutu.ru HTTP client.

use std::time::Duration;

use reqwest::header;
use tracing::debug;

use super::error::TutuError;
use super::query::ScheduleQuery;

/// Default base URL for the tutu.ru site.
const DEFAULT_BASE_URL: &str = "https://www.tutu.ru";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Browser identification sent with every request. The site serves the
/// desktop markup the extractors are written against only to browsers.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Configuration for the tutu.ru client.
#[derive(Debug, Clone)]
pub struct TutuConfig {
    /// Base URL for the site (defaults to production tutu.ru)
    pub base_url: String,
    /// Request timeout in seconds, applied to all endpoints
    pub timeout_secs: u64,
}

impl TutuConfig {
    /// Create a config with production defaults.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for TutuConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the tutu.ru suburban schedule pages.
///
/// Wraps a shared `reqwest::Client` that follows redirects (the search
/// endpoint redirects to the schedule page) and skips TLS certificate
/// verification, matching how the upstream is fetched in production.
#[derive(Debug, Clone)]
pub struct TutuClient {
    http: reqwest::Client,
    base_url: String,
}

impl TutuClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TutuConfig) -> Result<Self, TutuError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(10))
            .danger_accept_invalid_certs(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch the schedule search page for a validated query.
    ///
    /// Returns the final page's HTML after redirects.
    pub async fn search_schedule(&self, query: &ScheduleQuery) -> Result<String, TutuError> {
        let url = format!("{}/prigorod/search.php", self.base_url);
        debug!(%url, "fetching schedule page");

        let response = self.http.get(&url).query(&query.params()).send().await?;
        read_body(response).await
    }

    /// Fetch the station-name suggest endpoint.
    ///
    /// The response body (JSON produced upstream) is returned verbatim.
    pub async fn suggest_stations(&self, name: &str) -> Result<String, TutuError> {
        let url = format!("{}/station/suggest.php", self.base_url);
        debug!(%url, "fetching station suggestions");

        let response = self
            .http
            .get(&url)
            .query(&[("name", name)])
            .header(
                header::ACCEPT,
                "application/json, text/javascript, */*; q=0.01",
            )
            .header("X-Requested-With", "XMLHttpRequest")
            .header(header::REFERER, format!("{}/", self.base_url))
            .send()
            .await?;
        read_body(response).await
    }

    /// Fetch the train view page for an `np` token.
    pub async fn train_view(&self, np: &str) -> Result<String, TutuError> {
        let url = format!("{}/view.php", self.base_url);
        debug!(%url, "fetching train page");

        let response = self.http.get(&url).query(&[("np", np)]).send().await?;
        read_body(response).await
    }
}

/// Treat anything other than a final 200 as a fetch failure.
async fn read_body(response: reqwest::Response) -> Result<String, TutuError> {
    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(TutuError::Status {
            status: status.as_u16(),
        });
    }
    Ok(response.text().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = TutuConfig::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_builder() {
        let config = TutuConfig::new()
            .with_base_url("http://localhost:8080")
            .with_timeout(5);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn client_creation() {
        let client = TutuClient::new(TutuConfig::new());
        assert!(client.is_ok());
    }

    // Integration tests against the real site would make actual HTTP
    // requests; they should be marked #[ignore] and run separately.
}
