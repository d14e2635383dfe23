// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Query parameters and intent classification

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::sources::SourceRegistry;

/// Lookup requested but no (source, id) pair could be resolved
pub const INVALID_LOOKUP: &str = "Missing or invalid source and id";

/// Search endpoint called without both `search` and `source`
pub const INVALID_SEARCH: &str = "Missing search or source parameter";

/// Parameters match neither accepted combination
pub const INVALID_COMBINATION: &str =
    "Invalid parameters: provide search and source, or url, or site and sid";

/// Inbound query parameters; empty values count as absent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryParams {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub site: Option<String>,
    #[serde(default)]
    pub sid: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl QueryParams {
    /// Trim every value and drop the blank ones
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            search: clean(self.search),
            source: clean(self.source),
            site: clean(self.site),
            sid: clean(self.sid),
            url: clean(self.url),
        }
    }

    /// Whether none of the five parameters is set
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.source.is_none()
            && self.site.is_none()
            && self.sid.is_none()
            && self.url.is_none()
    }
}

/// What a request asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedIntent {
    /// Keyword search against one source
    Search { query: String, source: String },
    /// Single item lookup
    Lookup { source: String, id: String },
    /// No parameters at all; the boundary decides what to serve
    NoIntent,
    /// Malformed parameter combination
    Invalid { reason: String },
}

impl ResolvedIntent {
    fn invalid(reason: &str) -> Self {
        Self::Invalid {
            reason: reason.to_string(),
        }
    }
}

/// Resolve a parameter bag to exactly one intent
///
/// Precedence: no parameters → `NoIntent`; `search` + `source` → `Search`;
/// `url`, or `site` + `sid` → `Lookup`; anything else → `Invalid`. Unknown
/// source names are not checked here.
pub fn classify(params: &QueryParams, registry: &SourceRegistry) -> ResolvedIntent {
    let intent = if params.is_empty() {
        ResolvedIntent::NoIntent
    } else if params.search.is_some() && params.source.is_some() {
        classify_search(params)
    } else if params.url.is_some() || (params.site.is_some() && params.sid.is_some()) {
        classify_lookup(params, registry)
    } else {
        ResolvedIntent::invalid(INVALID_COMBINATION)
    };

    debug!("Classified {:?} as {:?}", params, intent);
    intent
}

/// Resolve a search-only request
pub fn classify_search(params: &QueryParams) -> ResolvedIntent {
    match (&params.search, &params.source) {
        (Some(query), Some(source)) => ResolvedIntent::Search {
            query: query.clone(),
            source: source.clone(),
        },
        _ => ResolvedIntent::invalid(INVALID_SEARCH),
    }
}

/// Resolve a lookup-only request
///
/// `url` is parsed only when `site` is absent; otherwise `site` and `sid`
/// are taken as given.
pub fn classify_lookup(params: &QueryParams, registry: &SourceRegistry) -> ResolvedIntent {
    let (source, id) = match (&params.url, &params.site) {
        (Some(url), None) => match registry.resolve_url(url) {
            Some(resolved) => (Some(resolved.source), resolved.id),
            None => (None, None),
        },
        _ => (params.site.clone(), params.sid.clone()),
    };

    match (source, id) {
        (Some(source), Some(id)) => ResolvedIntent::Lookup { source, id },
        _ => ResolvedIntent::invalid(INVALID_LOOKUP),
    }
}
