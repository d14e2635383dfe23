// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Uniform response envelope

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::sources::{Candidate, NormalizedRecord};
use crate::version::{current_copyright, VERSION_NUMBER};

/// Message used when a failure is reported without one
const UNKNOWN_ERROR: &str = "Unknown error";

/// Success/error wrapper around a search list or a record
///
/// `success == false` always comes with an `error` and a default payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<P> {
    /// Whether the operation produced data
    pub success: bool,
    /// Human-readable failure, `null` on success
    pub error: Option<String>,
    /// Payload fields, flattened into the top level
    #[serde(flatten)]
    pub payload: P,
    /// Copyright line
    pub copyright: String,
    /// Service version
    pub version: String,
    /// Generation time in epoch milliseconds
    pub generate_at: i64,
}

/// Payload of a search response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchPayload {
    /// Candidates in catalog order
    pub data: Vec<Candidate>,
}

/// Payload of a lookup response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordPayload {
    /// Rendered text block, empty on failure
    pub format: String,
    /// Extracted fields, flattened into the top level
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Envelope returned by searches
pub type SearchEnvelope = Envelope<SearchPayload>;

/// Envelope returned by lookups
pub type RecordEnvelope = Envelope<RecordPayload>;

impl<P: Default> Envelope<P> {
    /// Stamp copyright, version and timestamp around a payload
    ///
    /// A failed envelope drops the payload and always carries an error.
    /// A successful one never does.
    pub fn build(payload: P, success: bool, error: Option<String>) -> Self {
        let (payload, error) = if success {
            (payload, None)
        } else {
            (
                P::default(),
                Some(error.unwrap_or_else(|| UNKNOWN_ERROR.to_string())),
            )
        };

        Self {
            success,
            error,
            payload,
            copyright: current_copyright(),
            version: VERSION_NUMBER.to_string(),
            generate_at: Utc::now().timestamp_millis(),
        }
    }

    /// Successful envelope
    pub fn ok(payload: P) -> Self {
        Self::build(payload, true, None)
    }

    /// Failed envelope with an empty payload
    pub fn failed(error: impl Into<String>) -> Self {
        Self::build(P::default(), false, Some(error.into()))
    }
}

impl From<Vec<Candidate>> for SearchPayload {
    fn from(data: Vec<Candidate>) -> Self {
        Self { data }
    }
}

impl From<NormalizedRecord> for RecordPayload {
    fn from(record: NormalizedRecord) -> Self {
        let (format, fields) = record.into_parts();
        Self { format, fields }
    }
}
