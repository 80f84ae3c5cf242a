//! HTTP fetch seam for third-party services
//!
//! The honeypot check only needs "GET this URL within this deadline and give me
//! status + body". [`ReqwestFetcher`] does that over the network; tests plug in
//! a canned fetcher instead.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING, USER_AGENT};
use std::time::Duration;
use tracing::debug;

use crate::models::errors::{AppError, AppResult};
use crate::utils::constants::USER_AGENT as USER_AGENT_CONST;

/// Raw HTTP answer. Any status is returned as-is; interpreting it is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Minimal HTTP GET capability
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    /// GET `url`, giving up after `timeout` (connect + headers + body)
    async fn get(&self, url: &str, timeout: Duration) -> AppResult<HttpResponse>;
}

/// Network fetcher backed by a shared reqwest client
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new() -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_CONST));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .gzip(true)
            .build()
            .map_err(|e| AppError::invalid_config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn get(&self, url: &str, timeout: Duration) -> AppResult<HttpResponse> {
        debug!("🌐 GET {}", url);

        // The deadline covers the body read too, not just the headers
        let request = async {
            let response = self.client.get(url).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok::<_, AppError>(HttpResponse { status, body })
        };

        match tokio::time::timeout(timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(AppError::external_timeout(format!(
                "No answer from {} within {}ms",
                url,
                timeout.as_millis()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        let ok = HttpResponse { status: 204, body: String::new() };
        let moved = HttpResponse { status: 301, body: String::new() };
        let failed = HttpResponse { status: 503, body: "down".into() };
        assert!(ok.is_success());
        assert!(!moved.is_success());
        assert!(!failed.is_success());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_an_error() {
        let fetcher = ReqwestFetcher::new().unwrap();
        // Port 9 on localhost: nothing listens, connection is refused quickly
        let result = fetcher
            .get("http://127.0.0.1:9/", Duration::from_millis(500))
            .await;
        assert!(result.is_err());
    }
}
