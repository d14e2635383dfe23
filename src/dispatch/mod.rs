// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Request classification and dispatch
//!
//! Turns a query-parameter bag into a [`ResolvedIntent`] and runs it against
//! the registered adapters through the [`crate::cache::LookupService`].

pub mod dispatcher;
pub mod intent;

pub use dispatcher::{DispatchError, DispatchOutcome, Dispatcher};
pub use intent::{
    classify, classify_lookup, classify_search, QueryParams, ResolvedIntent, INVALID_COMBINATION,
    INVALID_LOOKUP, INVALID_SEARCH,
};
