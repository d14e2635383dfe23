// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Response formatting
//!
//! Pure functions: envelope construction, the standardized BBCode text block,
//! `{{field}}` template substitution and HTML→BBCode conversion.

pub mod bbcode;
pub mod envelope;
pub mod text_block;

pub use bbcode::html_to_bbcode;
pub use envelope::{Envelope, RecordEnvelope, RecordPayload, SearchEnvelope, SearchPayload};
pub use text_block::{fill_template, render_text_block};
