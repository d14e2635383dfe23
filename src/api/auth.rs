// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! API-key check

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use super::errors::ApiError;
use super::http_server::AppState;

/// Header carrying the key when the query parameter is absent
pub const API_KEY_HEADER: &str = "x-api-key";

/// Query parameter carrying the key
pub const API_KEY_PARAM: &str = "apikey";

/// Reject requests whose key does not match the configured one
///
/// A no-op when no key is configured. The `apikey` query parameter wins over
/// the `x-api-key` header.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = state.config.api_key.as_deref() else {
        return next.run(request).await;
    };

    let provided = provided_key(request.uri().query(), request.headers());
    if provided.as_deref() != Some(expected) {
        warn!("Invalid API key attempt on {}", request.uri().path());
        return ApiError::Unauthorized.into_response();
    }

    next.run(request).await
}

/// Key supplied by the client, if any
pub fn provided_key(query: Option<&str>, headers: &HeaderMap) -> Option<String> {
    let from_query = query.and_then(|q| {
        url::form_urlencoded::parse(q.as_bytes())
            .find(|(key, _)| key == API_KEY_PARAM)
            .map(|(_, value)| value.into_owned())
    });

    from_query.filter(|k| !k.is_empty()).or_else(|| {
        headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    })
}
