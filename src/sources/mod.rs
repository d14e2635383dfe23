// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Catalog sources
//!
//! Each catalog site implements [`SourceAdapter`]; the [`SourceRegistry`]
//! maps names and item URLs to adapters.

pub mod adapter;
pub mod douban;
pub mod registry;
pub mod types;

pub use adapter::{SourceAdapter, SourceError};
pub use douban::{DoubanAdapter, DOUBAN_BASE_URL};
pub use registry::{ResolvedUrl, SourceRegistry, UrlPattern};
pub use types::{Candidate, NormalizedRecord, RecordBuilder, RESERVED_FIELDS};
