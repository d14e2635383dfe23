// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Douban catalog adapter
//!
//! Search uses the JSON suggestion endpoint; lookup scrapes the subject page
//! and reads its JSON-LD block. No API key required.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use super::adapter::{SourceAdapter, SourceError};
use super::registry::UrlPattern;
use super::types::{Candidate, NormalizedRecord};
use crate::fetch::{
    extract_structured_data, parse_document, select_html, select_text, PageFetcher,
    LD_JSON_SELECTOR,
};
use crate::format::html_to_bbcode;

/// Public Douban movie site
pub const DOUBAN_BASE_URL: &str = "https://movie.douban.com";

const SOURCE_NAME: &str = "douban";
const SUGGEST_PATH: &str = "/j/subject_suggest";
const SUBJECT_PATH_PATTERN: &str = r"subject/(\d+)";
const SUMMARY_SELECTOR: &str = r#"span[property="v:summary"]"#;

/// Douban adapter
pub struct DoubanAdapter {
    fetcher: Arc<PageFetcher>,
    base_url: String,
}

/// One entry of the suggestion endpoint response
#[derive(Debug, Deserialize)]
struct SuggestItem {
    id: String,
    title: String,
    #[serde(default)]
    year: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    img: Option<String>,
    #[serde(default)]
    sub_title: Option<String>,
    #[serde(default)]
    episode: Option<String>,
}

impl DoubanAdapter {
    /// Create an adapter against the public site
    pub fn new(fetcher: Arc<PageFetcher>) -> Self {
        Self::with_base_url(fetcher, DOUBAN_BASE_URL)
    }

    /// Create an adapter against another host serving the same routes
    pub fn with_base_url(fetcher: Arc<PageFetcher>, base_url: &str) -> Self {
        Self {
            fetcher,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Item URL pattern: any `*douban*` host with a `subject/<digits>` path
    pub fn url_pattern() -> Result<UrlPattern, SourceError> {
        UrlPattern::new(SOURCE_NAME, SUBJECT_PATH_PATTERN)
    }

    /// Canonical subject page URL
    pub fn subject_url(&self, id: &str) -> String {
        format!("{}/subject/{}/", self.base_url, id)
    }
}

#[async_trait]
impl SourceAdapter for DoubanAdapter {
    async fn search(&self, query: &str) -> Result<Vec<Candidate>, SourceError> {
        let url = format!("{}{}", self.base_url, SUGGEST_PATH);
        let body = self
            .fetcher
            .fetch_page_with_query(&url, &[("q", query)], None)
            .await?;

        let candidates = parse_suggestions(&body, &self.base_url)?;
        debug!("Douban search '{}': {} candidates", query, candidates.len());
        Ok(candidates)
    }

    async fn lookup(&self, id: &str) -> Result<NormalizedRecord, SourceError> {
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
            return Err(SourceError::extraction(
                SOURCE_NAME,
                format!("invalid subject id: {}", id),
            ));
        }

        let link = self.subject_url(id);
        let markup = self.fetcher.fetch_page(&link, None).await?;
        extract_subject(&markup, &link)
    }

    fn name(&self) -> &'static str {
        SOURCE_NAME
    }
}

/// Map the suggestion endpoint JSON to candidates
fn parse_suggestions(body: &str, base_url: &str) -> Result<Vec<Candidate>, SourceError> {
    let items: Vec<SuggestItem> = serde_json::from_str(body).map_err(|e| {
        SourceError::extraction(SOURCE_NAME, format!("unexpected search response: {}", e))
    })?;

    Ok(items
        .into_iter()
        .map(|item| {
            let mut candidate = Candidate::new(
                item.title,
                format!("{}/subject/{}/", base_url, item.id),
            );
            candidate.year = item.year.filter(|y| !y.is_empty());
            candidate.subtype = item.kind;
            candidate.extra.insert("id".to_string(), Value::from(item.id));
            for (key, value) in [
                ("img", item.img),
                ("sub_title", item.sub_title),
                ("episode", item.episode),
            ] {
                if let Some(v) = value.filter(|v| !v.is_empty()) {
                    candidate.extra.insert(key.to_string(), Value::from(v));
                }
            }
            candidate
        })
        .collect())
}

/// Extract the subject record from a page
///
/// Prefers the JSON-LD block; without one, falls back to the page heading so
/// the block still carries a title. A page offering neither is an error.
///
/// The JSON-LD description is plain text and is kept verbatim. Only the
/// on-page summary markup, used when JSON-LD has no description, is
/// converted to BBCode.
fn extract_subject(markup: &str, link: &str) -> Result<NormalizedRecord, SourceError> {
    let document = parse_document(markup);

    let Some(ld) = extract_structured_data(&document, LD_JSON_SELECTOR) else {
        let title = select_text(&document, r#"span[property="v:itemreviewed"]"#)
            .or_else(|| select_text(&document, "title").map(|t| t.trim_end_matches("(豆瓣)").trim().to_string()))
            .filter(|t| !t.is_empty())
            .ok_or_else(|| SourceError::extraction(SOURCE_NAME, "no structured data"))?;
        debug!("No JSON-LD on {}, using page title", link);
        return Ok(NormalizedRecord::builder(link).field("title", title).build());
    };

    let description = ld["description"]
        .as_str()
        .filter(|d| !d.trim().is_empty())
        .map(str::to_string)
        .or_else(|| select_html(&document, SUMMARY_SELECTOR).map(|html| html_to_bbcode(&html)));

    Ok(NormalizedRecord::builder(link)
        .maybe_field("title", ld["name"].as_str())
        .maybe_field("poster", ld["image"].as_str())
        .maybe_field("date_published", ld["datePublished"].as_str())
        .maybe_field("genre", joined(&ld["genre"], " / "))
        .maybe_field("rating", scalar_string(&ld["aggregateRating"]["ratingValue"]))
        .maybe_field("director", names(&ld["director"]))
        .maybe_field("actors", names(&ld["actor"]))
        .maybe_field("description", description)
        .build())
}

/// `[{"name": ..}, ..]` or `{"name": ..}` to a comma-separated list
fn names(value: &Value) -> Option<String> {
    let list: Vec<&str> = match value {
        Value::Array(items) => items.iter().filter_map(|i| i["name"].as_str()).collect(),
        Value::Object(_) => value["name"].as_str().into_iter().collect(),
        Value::String(s) => vec![s.as_str()],
        _ => Vec::new(),
    };
    (!list.is_empty()).then(|| list.join(", "))
}

fn joined(value: &Value, separator: &str) -> Option<String> {
    match value {
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            (!parts.is_empty()).then(|| parts.join(separator))
        }
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
