// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for the lookup cache

use std::env;

/// Default entry lifetime: two days
pub const DEFAULT_CACHE_TTL_SECS: u64 = 172_800;

/// Configuration for the lookup cache
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    /// Entry TTL in seconds (default: 172800)
    pub ttl_secs: u64,
    /// External store connection string; `None` forces the in-memory store
    pub redis_url: Option<String>,
    /// Bound on connect + PING at startup in milliseconds (default: 2000)
    pub connect_timeout_ms: u64,
}

impl CacheConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            ttl_secs: env::var("CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.ttl_secs),
            redis_url: env::var("REDIS_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            connect_timeout_ms: env::var("CACHE_CONNECT_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.connect_timeout_ms),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.ttl_secs == 0 {
            return Err("Cache TTL must be greater than 0".to_string());
        }
        if self.connect_timeout_ms == 0 {
            return Err("Cache connect timeout must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_CACHE_TTL_SECS,
            redis_url: None,
            connect_timeout_ms: 2_000,
        }
    }
}
