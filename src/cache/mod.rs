// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Cache-backed lookup
//!
//! A [`LookupService`] wraps source adapters with get-or-compute caching over a
//! pluggable [`CacheStore`]: Redis when reachable at startup, otherwise an
//! in-process map with lazy TTL eviction.

pub mod config;
pub mod memory;
pub mod redis_store;
pub mod service;
pub mod store;

pub use config::CacheConfig;
pub use memory::MemoryStore;
pub use redis_store::RedisStore;
pub use service::{LookupService, OperationKind};
pub use store::{CacheError, CacheStore};
