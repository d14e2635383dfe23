// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod fetch;
pub mod format;
pub mod sources;
pub mod version;

pub use cache::{CacheConfig, LookupService};
pub use dispatch::{DispatchOutcome, Dispatcher, QueryParams, ResolvedIntent};
pub use fetch::{FetchConfig, FetchError, PageFetcher};
pub use format::{RecordEnvelope, SearchEnvelope};
pub use sources::{Candidate, NormalizedRecord, SourceAdapter, SourceError, SourceRegistry};
