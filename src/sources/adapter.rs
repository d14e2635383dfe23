// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Source adapter trait definition

use async_trait::async_trait;
use thiserror::Error;

use super::types::{Candidate, NormalizedRecord};
use crate::fetch::FetchError;

/// Errors an adapter reports instead of failing the request
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SourceError {
    /// Network, timeout or non-success status from the catalog site
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Structured data absent or unparsable
    #[error("{source_name}: failed to extract data: {reason}")]
    Extraction {
        /// Adapter that failed
        source_name: String,
        /// What was missing or malformed
        reason: String,
    },

    /// A URL pattern registered for the source does not compile
    #[error("Invalid URL pattern: {0}")]
    InvalidPattern(String),
}

impl SourceError {
    /// Shorthand for an extraction failure
    pub fn extraction(source_name: &str, reason: impl Into<String>) -> Self {
        Self::Extraction {
            source_name: source_name.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<regex::Error> for SourceError {
    fn from(e: regex::Error) -> Self {
        Self::InvalidPattern(e.to_string())
    }
}

/// Trait implemented once per catalog site
///
/// Adapters hold no per-request state and are shared across concurrent
/// requests. Failures come back as [`SourceError`] values; the lookup service
/// turns them into `success: false` envelopes.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Keyword search against the catalog
    ///
    /// # Arguments
    /// * `query` - The search keyword
    ///
    /// # Returns
    /// Candidates in catalog order (possibly empty) or an error
    async fn search(&self, query: &str) -> Result<Vec<Candidate>, SourceError>;

    /// Fetch and extract a single item by its catalog ID
    async fn lookup(&self, id: &str) -> Result<NormalizedRecord, SourceError>;

    /// Registry name, also used as the cache key prefix
    fn name(&self) -> &'static str;
}
