// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Markup parsing and structured-data extraction
//!
//! Parsing never fails: malformed markup degrades to whatever tree html5ever
//! can recover. Extraction returns `None` when nothing usable is found.

use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;

/// Selector for embedded JSON-LD metadata blocks
pub const LD_JSON_SELECTOR: &str = r#"script[type="application/ld+json"]"#;

/// Parse markup into a traversable document
pub fn parse_document(markup: &str) -> Html {
    Html::parse_document(markup)
}

/// Parse the text content of the first element matching `selector` as JSON
///
/// Returns `None` if the selector is invalid, nothing matches, or the text
/// is not valid JSON even after control characters are blanked out.
pub fn extract_structured_data(document: &Html, selector: &str) -> Option<Value> {
    let selector = match Selector::parse(selector) {
        Ok(s) => s,
        Err(e) => {
            debug!("Invalid selector {}: {:?}", selector, e);
            return None;
        }
    };

    let element = document.select(&selector).next()?;
    let raw: String = element.text().collect();
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(raw) {
        Ok(value) => Some(value),
        Err(strict_err) => {
            // Catalog pages often leave raw newlines inside string literals
            let relaxed: String = raw
                .chars()
                .map(|c| if c.is_control() { ' ' } else { c })
                .collect();
            match serde_json::from_str::<Value>(&relaxed) {
                Ok(value) => Some(value),
                Err(_) => {
                    debug!("Failed to extract JSON: {}", strict_err);
                    None
                }
            }
        }
    }
}

/// Text content of the first element matching `selector`, whitespace-normalized
pub fn select_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| clean_text(&el.text().collect::<Vec<_>>().join(" ")))
        .filter(|text| !text.is_empty())
}

/// Inner markup of the first element matching `selector`, trimmed
pub fn select_html(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| el.inner_html().trim().to_string())
        .filter(|html| !html.is_empty())
}

/// Clean text: trim and collapse runs of whitespace to a single space
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
