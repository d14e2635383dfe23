// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP page fetching with a fixed timeout and browser-like headers
//!
//! Every catalog request goes through a single GET with the configured
//! timeout. Failures come back as [`FetchError`]; the adapter decides how to
//! report them.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};
use url::Url;

use super::config::FetchConfig;

/// Errors raised while fetching a page from a catalog site
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FetchError {
    /// Request did not complete within the configured timeout
    #[error("Timeout fetching {url} after {timeout_ms}ms")]
    Timeout {
        /// URL being fetched
        url: String,
        /// Timeout that elapsed
        timeout_ms: u64,
    },

    /// Connection, TLS or body-read failure
    #[error("HTTP error fetching {url}: {message}")]
    Transport {
        /// URL being fetched
        url: String,
        /// Underlying error text
        message: String,
    },

    /// Upstream answered with a non-success status
    #[error("HTTP {status} for: {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// URL being fetched
        url: String,
    },

    /// URL could not be parsed or built
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP client could not be constructed
    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}

/// Page fetcher shared by all source adapters
pub struct PageFetcher {
    client: Client,
    config: FetchConfig,
}

impl PageFetcher {
    /// Create a new page fetcher
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .default_headers(Self::default_headers(&config)?)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Default browser-identifying header set; per-call headers override these
    fn default_headers(config: &FetchConfig) -> Result<HeaderMap, FetchError> {
        let mut headers = HeaderMap::new();
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| FetchError::Client(format!("invalid user agent: {}", e)))?;
        headers.insert(USER_AGENT, user_agent);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,application/json;q=0.8,*/*;q=0.7",
            ),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("zh-CN,zh;q=0.9,en;q=0.8"),
        );
        Ok(headers)
    }

    /// Fetch raw markup for a URL
    ///
    /// # Arguments
    /// * `url` - Absolute http(s) URL
    /// * `extra_headers` - Headers that replace the defaults for this call only
    pub async fn fetch_page(
        &self,
        url: &str,
        extra_headers: Option<HeaderMap>,
    ) -> Result<String, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", url, e)))?;
        self.fetch_url(parsed, extra_headers).await
    }

    /// Fetch raw markup for a URL built from a base and query parameters
    pub async fn fetch_page_with_query(
        &self,
        url: &str,
        query: &[(&str, &str)],
        extra_headers: Option<HeaderMap>,
    ) -> Result<String, FetchError> {
        let parsed = Url::parse_with_params(url, query)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", url, e)))?;
        self.fetch_url(parsed, extra_headers).await
    }

    async fn fetch_url(&self, url: Url, extra_headers: Option<HeaderMap>) -> Result<String, FetchError> {
        let url_str = url.to_string();
        debug!("Fetching page: {}", url_str);

        let mut request = self.client.get(url);
        if let Some(headers) = extra_headers {
            request = request.headers(headers);
        }

        let response = request.send().await.map_err(|e| {
            let err = self.classify(&url_str, e);
            error!("Failed to fetch page {}: {}", url_str, err);
            err
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("Failed to fetch page {}: HTTP {}", url_str, status.as_u16());
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url_str,
            });
        }

        response.text().await.map_err(|e| self.classify(&url_str, e))
    }

    fn classify(&self, url: &str, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
                timeout_ms: self.config.timeout_ms,
            }
        } else {
            FetchError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            }
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}
