// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! API-key enforcement and CORS

use axum::http::StatusCode;
use ptgen::config::ServerConfig;
use std::sync::Arc;

use crate::common::{app, catalog_registry, get_json, get_json_with, get_raw, CountingAdapter};

const KEY: &str = "s3cret";

fn keyed_app() -> axum::Router {
    let config = ServerConfig {
        api_key: Some(KEY.to_string()),
        ..Default::default()
    };
    app(catalog_registry(Arc::new(CountingAdapter::new("siteA"))), config)
}

#[tokio::test]
async fn test_missing_key_is_unauthorized() {
    let (status, json) = get_json(keyed_app(), "/?site=siteA&sid=1").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Invalid API key");

    let (status, _) = get_json(keyed_app(), "/").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_wrong_key_is_unauthorized() {
    let (status, _) = get_json(keyed_app(), "/?site=siteA&sid=1&apikey=nope").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) =
        get_json_with(keyed_app(), "/api/info?site=siteA&sid=1", &[("x-api-key", "nope")]).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_key_in_query_or_header() {
    let (status, json) = get_json(keyed_app(), "/?site=siteA&sid=1&apikey=s3cret").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "Fixture 1");

    let (status, json) =
        get_json_with(keyed_app(), "/api/info?site=siteA&sid=2", &[("x-api-key", KEY)]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "Fixture 2");
}

#[tokio::test]
async fn test_health_needs_no_key() {
    let (status, json) = get_json(keyed_app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let (_, headers, _) = get_raw(
        keyed_app(),
        "/health",
        &[("origin", "https://tracker.example")],
    )
    .await;
    assert_eq!(headers["access-control-allow-origin"], "*");
}
