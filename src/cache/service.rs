// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Cache-backed lookup service
//!
//! Wraps adapter calls with get-or-compute caching. Only successful results
//! are stored; adapter failures become `success: false` envelopes and store
//! failures degrade to uncached behaviour.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use super::config::CacheConfig;
use super::memory::MemoryStore;
use super::redis_store::RedisStore;
use super::store::CacheStore;
use crate::format::{RecordEnvelope, SearchEnvelope};
use crate::sources::SourceAdapter;

/// Operation segment of a cache key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Search,
    Info,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Search => "search",
            OperationKind::Info => "info",
        }
    }
}

/// Get-or-compute cache in front of the source adapters
pub struct LookupService {
    store: Arc<dyn CacheStore>,
    default_ttl: Duration,
}

impl LookupService {
    /// Open the service, preferring Redis when configured and reachable
    ///
    /// Never fails: an unreachable Redis is logged and the in-memory store is
    /// used for the lifetime of the service.
    pub async fn open(config: &CacheConfig) -> Self {
        let ttl = Duration::from_secs(config.ttl_secs);

        match config.redis_url.as_deref() {
            Some(url) => {
                let connect_timeout = Duration::from_millis(config.connect_timeout_ms);
                match RedisStore::connect(url, connect_timeout).await {
                    Ok(store) => {
                        info!("Lookup cache using redis (ttl {}s)", config.ttl_secs);
                        return Self::with_store(Arc::new(store), ttl);
                    }
                    Err(e) => {
                        warn!("Redis unavailable, falling back to in-memory cache: {}", e);
                    }
                }
            }
            None => {
                info!("REDIS_URL not set, using in-memory cache");
            }
        }

        Self::with_store(Arc::new(MemoryStore::new()), ttl)
    }

    /// Build the service over an explicit store
    pub fn with_store(store: Arc<dyn CacheStore>, default_ttl: Duration) -> Self {
        Self { store, default_ttl }
    }

    /// Name of the active store
    pub fn backend_name(&self) -> &'static str {
        self.store.name()
    }

    /// TTL applied when a caller passes none
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Deterministic key `"{source}:{search|info}:{query_or_id}"`
    pub fn cache_key(source: &str, kind: OperationKind, query_or_id: &str) -> String {
        format!("{}:{}:{}", source, kind.as_str(), query_or_id)
    }

    /// Return the cached value for `key`, or compute, store and return it
    ///
    /// A hit is returned as stored; nothing is re-validated before TTL
    /// expiry. Errors from `compute` are returned and never cached.
    pub async fn get_or_compute<T, E, F, Fut>(
        &self,
        key: &str,
        compute: F,
        ttl: Option<Duration>,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(hit) = self.read(key).await {
            return Ok(hit);
        }

        let value = compute().await?;
        self.write(key, &value, ttl.unwrap_or(self.default_ttl)).await;
        Ok(value)
    }

    /// Cached keyword search through `adapter`
    pub async fn search(&self, adapter: &dyn SourceAdapter, query: &str) -> SearchEnvelope {
        let key = Self::cache_key(adapter.name(), OperationKind::Search, query);
        let result = self
            .get_or_compute(
                &key,
                || async {
                    adapter
                        .search(query)
                        .await
                        .map(|candidates| SearchEnvelope::ok(candidates.into()))
                },
                None,
            )
            .await;

        result.unwrap_or_else(|e| {
            error!("{} search for {:?} failed: {}", adapter.name(), query, e);
            SearchEnvelope::failed(e.to_string())
        })
    }

    /// Cached item lookup through `adapter`
    pub async fn lookup(&self, adapter: &dyn SourceAdapter, id: &str) -> RecordEnvelope {
        let key = Self::cache_key(adapter.name(), OperationKind::Info, id);
        let result = self
            .get_or_compute(
                &key,
                || async {
                    adapter
                        .lookup(id)
                        .await
                        .map(|record| RecordEnvelope::ok(record.into()))
                },
                None,
            )
            .await;

        result.unwrap_or_else(|e| {
            error!("{} lookup of {:?} failed: {}", adapter.name(), id, e);
            RecordEnvelope::failed(e.to_string())
        })
    }

    /// Drop one entry from the active store
    pub async fn invalidate(&self, key: &str) {
        match self.store.delete(key).await {
            Ok(()) => debug!("Cache invalidated: {}", key),
            Err(e) => warn!("Cache invalidate failed for {}: {}", key, e),
        }
    }

    /// Release the store's connections
    pub async fn close(&self) {
        match self.store.close().await {
            Ok(()) => info!("Lookup cache closed ({})", self.store.name()),
            Err(e) => warn!("Closing lookup cache failed: {}", e),
        }
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.store.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => {
                    debug!("Cache hit: {}", key);
                    Some(value)
                }
                Err(e) => {
                    warn!("Ignoring undecodable cache entry {}: {}", key, e);
                    None
                }
            },
            Ok(None) => {
                debug!("Cache miss: {}", key);
                None
            }
            Err(e) => {
                warn!("Cache read failed for {}, treating as miss: {}", key, e);
                None
            }
        }
    }

    async fn write<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Not caching {}: {}", key, e);
                return;
            }
        };
        if let Err(e) = self.store.set(key, &raw, ttl).await {
            warn!("Cache write failed for {}: {}", key, e);
        }
    }
}
