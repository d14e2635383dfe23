// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Source registry
//!
//! One table maps a source name to its adapter and the URL patterns that
//! resolve to it. The classifier and the lookup service both consult it, so a
//! new catalog site is a new adapter plus one `register` call.

use regex::Regex;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

use super::adapter::{SourceAdapter, SourceError};
use super::douban::DoubanAdapter;
use crate::fetch::PageFetcher;

/// Hostname fragment + path pattern identifying an item URL of one source
#[derive(Debug, Clone)]
pub struct UrlPattern {
    host: String,
    path: Regex,
}

impl UrlPattern {
    /// Create a pattern
    ///
    /// # Arguments
    /// * `host` - Fragment the URL hostname must contain (e.g. `"douban"`)
    /// * `path` - Regex applied to the URL path; capture group 1 is the item ID
    pub fn new(host: impl Into<String>, path: &str) -> Result<Self, SourceError> {
        Ok(Self {
            host: host.into().to_lowercase(),
            path: Regex::new(path)?,
        })
    }

    /// Whether the hostname belongs to this source
    pub fn matches_host(&self, host: &str) -> bool {
        host.to_lowercase().contains(&self.host)
    }

    /// Item ID captured from the path, if the path matches
    pub fn extract_id(&self, path: &str) -> Option<String> {
        self.path
            .captures(path)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// Result of matching a URL against the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUrl {
    /// Source whose hostname pattern matched
    pub source: String,
    /// Item ID, or `None` when the path did not match
    pub id: Option<String>,
}

struct RegisteredSource {
    adapter: Arc<dyn SourceAdapter>,
    patterns: Vec<UrlPattern>,
}

/// Name → adapter table with URL resolution
#[derive(Default)]
pub struct SourceRegistry {
    sources: Vec<RegisteredSource>,
}

impl SourceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in catalog source
    pub fn with_defaults(fetcher: Arc<PageFetcher>) -> Result<Self, SourceError> {
        let mut registry = Self::new();
        registry.register(
            Arc::new(DoubanAdapter::new(fetcher)),
            vec![DoubanAdapter::url_pattern()?],
        );
        Ok(registry)
    }

    /// Register an adapter under its own name
    ///
    /// Registering a name twice replaces the earlier entry in place.
    pub fn register(&mut self, adapter: Arc<dyn SourceAdapter>, patterns: Vec<UrlPattern>) -> &mut Self {
        let name = adapter.name();
        let entry = RegisteredSource { adapter, patterns };
        match self.sources.iter().position(|s| s.adapter.name() == name) {
            Some(idx) => {
                warn!("Source {} registered twice, replacing", name);
                self.sources[idx] = entry;
            }
            None => {
                debug!("Registered source: {}", name);
                self.sources.push(entry);
            }
        }
        self
    }

    /// Find an adapter by name
    pub fn find(&self, name: &str) -> Option<Arc<dyn SourceAdapter>> {
        self.sources
            .iter()
            .find(|s| s.adapter.name() == name)
            .map(|s| s.adapter.clone())
    }

    /// Resolve an item URL to (source, id); first matching host wins
    ///
    /// Returns `None` for unparsable URLs and unrecognized hostnames.
    pub fn resolve_url(&self, raw: &str) -> Option<ResolvedUrl> {
        let url = Url::parse(raw).ok()?;
        let host = url.host_str()?;

        for source in &self.sources {
            for pattern in &source.patterns {
                if pattern.matches_host(host) {
                    return Some(ResolvedUrl {
                        source: source.adapter.name().to_string(),
                        id: pattern.extract_id(url.path()),
                    });
                }
            }
        }
        None
    }

    /// Names of registered sources in registration order
    pub fn names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.adapter.name()).collect()
    }

    /// Number of registered sources
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether no source is registered
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
