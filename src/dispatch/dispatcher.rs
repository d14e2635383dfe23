// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Routes resolved intents to adapters through the lookup service

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use super::intent::{classify, QueryParams, ResolvedIntent};
use crate::cache::LookupService;
use crate::format::{RecordEnvelope, SearchEnvelope};
use crate::sources::{SourceAdapter, SourceRegistry};

/// Request-level failures, all reported before any upstream I/O
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DispatchError {
    #[error("{0}")]
    Invalid(String),

    #[error("Unknown source: {0}")]
    UnknownSource(String),
}

/// Result of running an intent
#[derive(Debug, Clone)]
pub enum DispatchOutcome {
    /// Nothing to run; the caller picks the fallback response
    NoIntent,
    Search(SearchEnvelope),
    Lookup(RecordEnvelope),
}

/// Classifier + registry + lookup service
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<SourceRegistry>,
    service: Arc<LookupService>,
}

impl Dispatcher {
    pub fn new(registry: Arc<SourceRegistry>, service: Arc<LookupService>) -> Self {
        Self { registry, service }
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    pub fn service(&self) -> &LookupService {
        &self.service
    }

    /// Resolve parameters against this dispatcher's registry
    pub fn classify(&self, params: &QueryParams) -> ResolvedIntent {
        classify(params, &self.registry)
    }

    /// Classify then execute
    pub async fn dispatch(&self, params: &QueryParams) -> Result<DispatchOutcome, DispatchError> {
        let intent = self.classify(params);
        self.execute(intent).await
    }

    /// Run an already classified intent
    ///
    /// Upstream failures come back inside the envelope; only invalid
    /// parameters and unknown sources are errors here.
    pub async fn execute(&self, intent: ResolvedIntent) -> Result<DispatchOutcome, DispatchError> {
        match intent {
            ResolvedIntent::NoIntent => Ok(DispatchOutcome::NoIntent),
            ResolvedIntent::Invalid { reason } => {
                debug!("Rejecting request: {}", reason);
                Err(DispatchError::Invalid(reason))
            }
            ResolvedIntent::Search { query, source } => {
                let adapter = self.adapter(&source)?;
                let envelope = self.service.search(adapter.as_ref(), &query).await;
                Ok(DispatchOutcome::Search(envelope))
            }
            ResolvedIntent::Lookup { source, id } => {
                let adapter = self.adapter(&source)?;
                let envelope = self.service.lookup(adapter.as_ref(), &id).await;
                Ok(DispatchOutcome::Lookup(envelope))
            }
        }
    }

    fn adapter(&self, name: &str) -> Result<Arc<dyn SourceAdapter>, DispatchError> {
        self.registry.find(name).ok_or_else(|| {
            warn!("Unknown source requested: {}", name);
            DispatchError::UnknownSource(name.to_string())
        })
    }
}
