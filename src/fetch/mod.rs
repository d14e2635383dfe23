// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Fetch/Parse layer
//!
//! Retrieves raw markup from catalog sites and turns it into something the
//! source adapters can query.
//!
//! ## Architecture
//!
//! ```text
//! URL → PageFetcher (10s timeout, browser headers) → markup
//!                                                      ↓
//!                    parse_document → Html → extract_structured_data(selector)
//! ```

pub mod config;
pub mod fetcher;
pub mod parser;

pub use config::FetchConfig;
pub use fetcher::{FetchError, PageFetcher};
pub use parser::{
    clean_text, extract_structured_data, parse_document, select_html, select_text, LD_JSON_SELECTOR,
};
