// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Key/value store abstraction behind the lookup cache

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Store failures; the lookup service logs and swallows all of them
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CacheError {
    #[error("Cache connection failed: {0}")]
    Connection(String),

    #[error("Cache command failed: {0}")]
    Command(String),

    #[error("Cache serialization failed: {0}")]
    Serialization(String),

    #[error("Cache store is closed")]
    Closed,
}

impl From<redis::RedisError> for CacheError {
    fn from(e: redis::RedisError) -> Self {
        if e.is_connection_refusal() || e.is_connection_dropped() || e.is_io_error() {
            Self::Connection(e.to_string())
        } else {
            Self::Command(e.to_string())
        }
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// String key → string value store with per-entry TTL
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read a live entry; expired entries read as `None`
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Write an entry that expires after `ttl`
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Remove an entry; removing a missing key is not an error
    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Release connections held by the store
    async fn close(&self) -> Result<(), CacheError> {
        Ok(())
    }

    /// Backend name reported by the health endpoint
    fn name(&self) -> &'static str;
}
