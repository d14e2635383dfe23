// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Process configuration
//!
//! Read from the environment after `.env` has been loaded by the binary.

use anyhow::{anyhow, Result};
use std::env;
use std::net::SocketAddr;

use crate::cache::CacheConfig;
use crate::fetch::FetchConfig;

/// HTTP boundary configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Bind host (default: 0.0.0.0)
    pub host: String,
    /// Listen port (default: 3000)
    pub port: u16,
    /// Required access key; `None` disables the check
    pub api_key: Option<String>,
    /// Whether search requests are served (DISABLE_SEARCH=true turns this off)
    pub search_enabled: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("HOST")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            api_key: env::var("APIKEY").ok().filter(|v| !v.is_empty()),
            search_enabled: !env::var("DISABLE_SEARCH")
                .map(|v| is_true(&v))
                .unwrap_or(false),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("Port must be greater than 0".to_string());
        }
        if self.host.trim().is_empty() {
            return Err("Host must not be empty".to_string());
        }
        Ok(())
    }

    /// Socket address to bind
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow!("Invalid bind address {}:{}: {}", self.host, self.port, e))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            api_key: None,
            search_enabled: true,
        }
    }
}

/// Complete service configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub cache: CacheConfig,
    pub fetch: FetchConfig,
}

impl AppConfig {
    /// Load every section from the environment
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            cache: CacheConfig::from_env(),
            fetch: FetchConfig::from_env(),
        }
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.server.validate().map_err(|e| anyhow!("server: {}", e))?;
        self.cache.validate().map_err(|e| anyhow!("cache: {}", e))?;
        self.fetch.validate().map_err(|e| anyhow!("fetch: {}", e))?;
        Ok(())
    }
}

fn is_true(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}
