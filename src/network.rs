//! HTTP fetch adapter. One `reqwest::Client` is built before the run
//! and reused for every record; the pipeline never has more than one
//! request in flight.

use async_trait::async_trait;
use std::time::Duration;

/// Errors that can occur while fetching a record's page. The pipeline
/// treats every variant identically (empty fields, batch continues).
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid locator: {0}")]
    InvalidUrl(String),

    #[error("request timeout")]
    Timeout,

    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("network error: {0}")]
    Network(String),

    #[error("failed to read response body: {0}")]
    Body(String),
}

/// Opaque fetch capability consumed by the pipeline. Production code
/// uses `HttpClient`; tests inject canned responses.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Retrieve the resource at `url` and return its body as text.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// `Fetcher` backed by reqwest.
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Build the client used for the whole run.
    pub fn new(user_agent: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("failed to build HTTP client");
        Self { client }
    }

    fn classify(error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout
        } else if error.is_builder() {
            FetchError::InvalidUrl(error.to_string())
        } else {
            FetchError::Network(error.to_string())
        }
    }
}

#[async_trait]
impl Fetcher for HttpClient {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        if url.is_empty() {
            return Err(FetchError::InvalidUrl("empty locator".to_string()));
        }

        let response = self
            .client
            .get(url)
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .send()
            .await
            .map_err(Self::classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_locator_fails_cleanly() {
        let client = HttpClient::new("TestBot/1.0", Duration::from_secs(5));
        let result = client.fetch("").await;
        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_malformed_locator_fails_cleanly() {
        let client = HttpClient::new("TestBot/1.0", Duration::from_secs(5));
        let result = client.fetch("not-a-url").await;
        assert!(result.is_err());
    }
}
