// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for upstream page fetching

use std::env;

/// Browser-identifying User-Agent sent to catalog sites
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for the page fetcher
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in milliseconds (default: 10000)
    pub timeout_ms: u64,
    /// User-Agent header value
    pub user_agent: String,
    /// Maximum redirects to follow (default: 5)
    pub max_redirects: usize,
}

impl FetchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            timeout_ms: env::var("FETCH_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_ms),
            user_agent: env::var("FETCH_USER_AGENT")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.user_agent),
            max_redirects: defaults.max_redirects,
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_ms == 0 {
            return Err("fetch timeout must be greater than 0".to_string());
        }
        if self.user_agent.trim().is_empty() {
            return Err("user agent must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: 5,
        }
    }
}
