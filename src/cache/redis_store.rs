// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Redis-backed store

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::timeout;
use tracing::{debug, info};

use super::store::{CacheError, CacheStore};

/// Store backed by one shared multiplexed Redis connection
///
/// Expiry is enforced by Redis (`SET ... EX`). After [`CacheStore::close`]
/// every command fails with [`CacheError::Closed`].
pub struct RedisStore {
    conn: RwLock<Option<MultiplexedConnection>>,
}

impl RedisStore {
    /// Connect and verify the server answers PING
    ///
    /// # Arguments
    /// * `url` - Connection string, e.g. `redis://127.0.0.1:6379`
    /// * `connect_timeout` - Bound on connect and on the PING round-trip
    pub async fn connect(url: &str, connect_timeout: Duration) -> Result<Self, CacheError> {
        let client =
            redis::Client::open(url).map_err(|e| CacheError::Connection(e.to_string()))?;

        let timed_out = || {
            CacheError::Connection(format!(
                "timed out after {}ms",
                connect_timeout.as_millis()
            ))
        };

        let mut conn = timeout(connect_timeout, client.get_multiplexed_async_connection())
            .await
            .map_err(|_| timed_out())?
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        let pong: String = timeout(connect_timeout, redis::cmd("PING").query_async(&mut conn))
            .await
            .map_err(|_| timed_out())??;
        debug!("Redis PING answered: {}", pong);
        info!("Connected to Redis cache");

        Ok(Self {
            conn: RwLock::new(Some(conn)),
        })
    }

    async fn connection(&self) -> Result<MultiplexedConnection, CacheError> {
        self.conn.read().await.clone().ok_or(CacheError::Closed)
    }
}

#[async_trait]
impl CacheStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        // EX takes whole seconds and rejects 0
        let secs = ttl.as_secs().max(1);
        let _: () = conn.set_ex(key, value, secs).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        let _: () = conn.del(key).await?;
        Ok(())
    }

    async fn close(&self) -> Result<(), CacheError> {
        if self.conn.write().await.take().is_some() {
            info!("Redis cache connection closed");
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
