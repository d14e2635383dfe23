// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types produced by source adapters

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::format::render_text_block;

/// Envelope keys that extracted fields may never shadow
pub const RESERVED_FIELDS: &[&str] = &[
    "success",
    "error",
    "format",
    "data",
    "copyright",
    "version",
    "generate_at",
];

/// A single search result from a catalog site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Title as listed by the catalog
    pub title: String,
    /// Canonical item URL; the only identity a candidate has
    pub link: String,
    /// Release year if listed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    /// Catalog item type (e.g. "movie", "tv")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    /// Source-specific extra fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Candidate {
    /// Create a candidate with only the required fields
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            year: None,
            subtype: None,
            extra: Map::new(),
        }
    }
}

/// Fields extracted by a lookup plus the rendered text block
///
/// Built once through [`RecordBuilder`]; there are no mutators afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    link: String,
    fields: Map<String, Value>,
    text_block: String,
}

impl NormalizedRecord {
    /// Start building a record for the canonical item URL
    pub fn builder(link: impl Into<String>) -> RecordBuilder {
        RecordBuilder {
            link: link.into(),
            fields: Map::new(),
        }
    }

    /// Canonical item URL the record was extracted from
    pub fn link(&self) -> &str {
        &self.link
    }

    /// Extracted fields in insertion order
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Look up a single field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The standardized text block
    pub fn text_block(&self) -> &str {
        &self.text_block
    }

    /// Split into the text block and the field map
    pub fn into_parts(self) -> (String, Map<String, Value>) {
        (self.text_block, self.fields)
    }
}

/// Builder that drops empty values so absent data never reaches the block
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    link: String,
    fields: Map<String, Value>,
}

impl RecordBuilder {
    /// Set a field; null, empty strings and empty arrays are skipped
    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        let empty = match &value {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            Value::Array(items) => items.is_empty(),
            _ => false,
        };
        if !empty && !RESERVED_FIELDS.contains(&key) {
            self.fields.insert(key.to_string(), value);
        }
        self
    }

    /// Set a field only when a value is present
    pub fn maybe_field(self, key: &str, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(v) => self.field(key, v),
            None => self,
        }
    }

    /// Finish the record and render its text block
    pub fn build(self) -> NormalizedRecord {
        let mut record = NormalizedRecord {
            link: self.link,
            fields: self.fields,
            text_block: String::new(),
        };
        record.text_block = render_text_block(&record);
        record
    }
}
