// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

use super::errors::ApiError;
use super::http_server::AppState;
use crate::dispatch::{classify_lookup, classify_search, DispatchOutcome, QueryParams, ResolvedIntent};
use crate::format::{RecordEnvelope, SearchEnvelope};
use crate::version::{PRODUCT_NAME, VERSION_NUMBER};

/// Bundled web front-end served on a bare `GET /`
pub const INDEX_HTML: &str = include_str!("index.html");

/// GET / - generate endpoint
///
/// With no parameters serves the index page. Otherwise runs search or lookup
/// by the usual precedence and returns the envelope with HTTP 200.
///
/// # Errors
/// - 400 Bad Request: undecodable query string, invalid parameter
///   combination or unknown source
/// - 403 Forbidden: search request while search is disabled
pub async fn root_handler(
    State(state): State<AppState>,
    query: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = query?;
    let params = params.normalized();
    let intent = state.dispatcher.classify(&params);
    ensure_search_allowed(&state, &intent)?;

    Ok(match state.dispatcher.execute(intent).await? {
        DispatchOutcome::NoIntent => Html(INDEX_HTML).into_response(),
        DispatchOutcome::Search(envelope) => Json(envelope).into_response(),
        DispatchOutcome::Lookup(envelope) => Json(envelope).into_response(),
    })
}

/// GET /api/search - keyword search (`search` + `source`)
pub async fn search_handler(
    State(state): State<AppState>,
    query: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Json<SearchEnvelope>, ApiError> {
    if !state.config.search_enabled {
        return Err(ApiError::SearchDisabled);
    }
    let Query(params) = query?;

    let intent = classify_search(&params.normalized());
    match state.dispatcher.execute(intent).await? {
        DispatchOutcome::Search(envelope) => Ok(Json(envelope)),
        other => Err(unexpected(other)),
    }
}

/// GET /api/info - item lookup (`url`, or `site` + `sid`)
pub async fn info_handler(
    State(state): State<AppState>,
    query: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Json<RecordEnvelope>, ApiError> {
    let Query(params) = query?;
    let intent = classify_lookup(&params.normalized(), state.dispatcher.registry());
    match state.dispatcher.execute(intent).await? {
        DispatchOutcome::Lookup(envelope) => Ok(Json(envelope)),
        other => Err(unexpected(other)),
    }
}

/// GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": PRODUCT_NAME,
        "version": VERSION_NUMBER,
        "cache": state.dispatcher.service().backend_name(),
        "sources": state.dispatcher.registry().names(),
        "search_enabled": state.config.search_enabled,
    }))
}

fn ensure_search_allowed(state: &AppState, intent: &ResolvedIntent) -> Result<(), ApiError> {
    if matches!(intent, ResolvedIntent::Search { .. }) && !state.config.search_enabled {
        debug!("Search request refused: search disabled");
        return Err(ApiError::SearchDisabled);
    }
    Ok(())
}

fn unexpected(outcome: DispatchOutcome) -> ApiError {
    ApiError::Internal(format!("unexpected dispatch outcome: {:?}", outcome))
}
