// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared test helpers: mock catalog upstream, counting adapters, router calls
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{HeaderMap, Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use ptgen::{
    api::{create_app, AppState},
    cache::{LookupService, MemoryStore},
    config::ServerConfig,
    dispatch::Dispatcher,
    fetch::{FetchConfig, PageFetcher},
    sources::{
        Candidate, DoubanAdapter, NormalizedRecord, SourceAdapter, SourceError, SourceRegistry,
        UrlPattern,
    },
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;

/// Subject served with full structured data
pub const INCEPTION_ID: &str = "3541415";
/// Subject whose response outlasts any test fetch timeout
pub const SLOW_ID: &str = "9999999";
/// Subject answering 404
pub const MISSING_ID: &str = "4040404";
/// Subject page without any structured data or title
pub const EMPTY_ID: &str = "1111111";

pub const SUBJECT_HTML: &str = r#"<!DOCTYPE html>
<html><head>
<title>盗梦空间 (豆瓣)</title>
<script type="application/ld+json">
{
  "@context": "http://schema.org",
  "name": "盗梦空间 Inception",
  "url": "/subject/3541415/",
  "image": "https://img.example/p513344864.jpg",
  "director": [{"@type": "Person", "name": "克里斯托弗·诺兰 Christopher Nolan"}],
  "actor": [
    {"@type": "Person", "name": "莱昂纳多·迪卡普里奥 Leonardo DiCaprio"},
    {"@type": "Person", "name": "渡边谦 Ken Watanabe"}
  ],
  "datePublished": "2010-09-01",
  "genre": ["剧情", "科幻", "悬疑"],
  "description": "道姆·柯布与同事阿瑟和纳什在一次针对日本能源大亨齐藤的盗梦行动中失败。",
  "aggregateRating": {"@type": "AggregateRating", "ratingCount": "2000000", "ratingValue": "9.4"}
}
</script>
</head><body><h1>盗梦空间</h1></body></html>"#;

/// Running mock catalog site
pub struct Upstream {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl Upstream {
    /// Requests served so far
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Start a Douban-shaped catalog on 127.0.0.1 with an ephemeral port
pub async fn spawn_upstream() -> Upstream {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/j/subject_suggest", get(suggest))
        .route("/subject/:id/", get(subject))
        .with_state(hits.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Upstream {
        base_url: format!("http://{}", addr),
        hits,
    }
}

async fn suggest(
    State(hits): State<Arc<AtomicUsize>>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    match query.get("q").map(String::as_str) {
        Some("inception") => Json(json!([
            {"episode": "", "img": "https://img.example/s1.jpg", "title": "盗梦空间",
             "type": "movie", "year": "2010", "sub_title": "Inception", "id": "3541415"},
            {"episode": "", "img": "https://img.example/s2.jpg", "title": "盗梦特工队",
             "type": "movie", "year": "2010", "sub_title": "The Cobol Job", "id": "5143244"}
        ]))
        .into_response(),
        Some("blocked") => Html("<html>验证码</html>").into_response(),
        _ => Json(json!([])).into_response(),
    }
}

async fn subject(State(hits): State<Arc<AtomicUsize>>, Path(id): Path<String>) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    match id.as_str() {
        INCEPTION_ID => Html(SUBJECT_HTML).into_response(),
        SLOW_ID => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Html(SUBJECT_HTML).into_response()
        }
        MISSING_ID => StatusCode::NOT_FOUND.into_response(),
        _ => Html("<html><body><p>nothing here</p></body></html>").into_response(),
    }
}

/// Fetcher with a short timeout so slow routes fail fast
pub fn test_fetcher(timeout_ms: u64) -> Arc<PageFetcher> {
    let config = FetchConfig {
        timeout_ms,
        ..Default::default()
    };
    Arc::new(PageFetcher::new(config).unwrap())
}

/// Registry holding a Douban adapter pointed at the mock upstream
///
/// The URL pattern matches the mock's host so URL lookups resolve.
pub fn douban_registry(upstream: &Upstream, timeout_ms: u64) -> SourceRegistry {
    let mut registry = SourceRegistry::new();
    registry.register(
        Arc::new(DoubanAdapter::with_base_url(
            test_fetcher(timeout_ms),
            &upstream.base_url,
        )),
        vec![UrlPattern::new("127.0.0.1", r"subject/(\d+)").unwrap()],
    );
    registry
}

/// Lookup service over a fresh in-memory store
pub fn memory_service() -> Arc<LookupService> {
    Arc::new(LookupService::with_store(
        Arc::new(MemoryStore::new()),
        Duration::from_secs(60),
    ))
}

pub fn dispatcher(registry: SourceRegistry) -> Dispatcher {
    Dispatcher::new(Arc::new(registry), memory_service())
}

/// Adapter with canned results that counts its calls
pub struct CountingAdapter {
    name: &'static str,
    lookup_error: Option<SourceError>,
    panics: bool,
    search_calls: AtomicUsize,
    lookup_calls: AtomicUsize,
}

impl CountingAdapter {
    /// Returns two candidates per search and a record per lookup
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            lookup_error: None,
            panics: false,
            search_calls: AtomicUsize::new(0),
            lookup_calls: AtomicUsize::new(0),
        }
    }

    /// Every lookup fails with `error`
    pub fn failing_lookup(name: &'static str, error: SourceError) -> Self {
        Self {
            lookup_error: Some(error),
            ..Self::new(name)
        }
    }

    /// Every call panics
    pub fn panicking(name: &'static str) -> Self {
        Self {
            panics: true,
            ..Self::new(name)
        }
    }

    pub fn searches(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn lookups(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SourceAdapter for CountingAdapter {
    async fn search(&self, query: &str) -> Result<Vec<Candidate>, SourceError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.panics {
            panic!("adapter exploded on {}", query);
        }
        let mut first = Candidate::new(
            format!("{} (first)", query),
            "https://catalog.example/subject/1/",
        );
        first.year = Some("2010".to_string());
        first.subtype = Some("movie".to_string());
        Ok(vec![
            first,
            Candidate::new(
                format!("{} (second)", query),
                "https://catalog.example/subject/2/",
            ),
        ])
    }

    async fn lookup(&self, id: &str) -> Result<NormalizedRecord, SourceError> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        if self.panics {
            panic!("adapter exploded on {}", id);
        }
        if let Some(error) = &self.lookup_error {
            return Err(error.clone());
        }
        Ok(
            NormalizedRecord::builder(format!("https://catalog.example/subject/{}/", id))
                .field("title", format!("Fixture {}", id))
                .field("rating", "8.1")
                .build(),
        )
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// Registry with `adapter` matching `catalog.example` item URLs
pub fn catalog_registry(adapter: Arc<CountingAdapter>) -> SourceRegistry {
    let mut registry = SourceRegistry::new();
    registry.register(
        adapter,
        vec![UrlPattern::new("catalog.example", r"subject/(\d+)").unwrap()],
    );
    registry
}

/// Router over `registry` with the given boundary config
pub fn app(registry: SourceRegistry, config: ServerConfig) -> Router {
    create_app(AppState::new(dispatcher(registry), config))
}

/// GET `uri` with optional extra headers
pub async fn get_raw(
    app: Router,
    uri: &str,
    headers: &[(&str, &str)],
) -> (StatusCode, HeaderMap, Vec<u8>) {
    let mut request = Request::builder().uri(uri);
    for (name, value) in headers {
        request = request.header(*name, *value);
    }
    let response = app
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, body.to_vec())
}

/// GET `uri` and decode the JSON body
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    get_json_with(app, uri, &[]).await
}

/// GET `uri` with extra headers and decode the JSON body
pub async fn get_json_with(
    app: Router,
    uri: &str,
    headers: &[(&str, &str)],
) -> (StatusCode, Value) {
    let (status, _, body) = get_raw(app, uri, headers).await;
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}
