// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Douban adapter against the mock upstream: fetch, extract, format, cache

use ptgen::dispatch::{DispatchOutcome, QueryParams};
use ptgen::sources::{DoubanAdapter, SourceAdapter, SourceError};
use ptgen::fetch::FetchError;

use crate::common::{
    dispatcher, douban_registry, spawn_upstream, test_fetcher, EMPTY_ID, INCEPTION_ID, MISSING_ID,
    SLOW_ID,
};

fn lookup_params(id: &str) -> QueryParams {
    QueryParams {
        site: Some("douban".to_string()),
        sid: Some(id.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_search_maps_suggestions() {
    let upstream = spawn_upstream().await;
    let adapter = DoubanAdapter::with_base_url(test_fetcher(2_000), &upstream.base_url);

    let candidates = adapter.search("inception").await.unwrap();
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].title, "盗梦空间");
    assert_eq!(
        candidates[0].link,
        format!("{}/subject/3541415/", upstream.base_url)
    );
    assert_eq!(candidates[0].subtype.as_deref(), Some("movie"));
    assert_eq!(candidates[1].extra["sub_title"], "The Cobol Job");
}

#[tokio::test]
async fn test_search_without_matches_is_empty_success() {
    let upstream = spawn_upstream().await;
    let dispatcher = dispatcher(douban_registry(&upstream, 2_000));
    let params = QueryParams {
        search: Some("nothing-matches".to_string()),
        source: Some("douban".to_string()),
        ..Default::default()
    };

    match dispatcher.dispatch(&params).await.unwrap() {
        DispatchOutcome::Search(envelope) => {
            assert!(envelope.success);
            assert!(envelope.error.is_none());
            assert!(envelope.payload.data.is_empty());
        }
        other => panic!("expected search, got {:?}", other),
    }
}

#[tokio::test]
async fn test_search_with_non_json_body_fails_in_envelope() {
    let upstream = spawn_upstream().await;
    let dispatcher = dispatcher(douban_registry(&upstream, 2_000));
    let params = QueryParams {
        search: Some("blocked".to_string()),
        source: Some("douban".to_string()),
        ..Default::default()
    };

    match dispatcher.dispatch(&params).await.unwrap() {
        DispatchOutcome::Search(envelope) => {
            assert!(!envelope.success);
            assert!(envelope
                .error
                .unwrap()
                .starts_with("douban: failed to extract data: unexpected search response"));
        }
        other => panic!("expected search, got {:?}", other),
    }
}

#[tokio::test]
async fn test_lookup_renders_full_block() {
    let upstream = spawn_upstream().await;
    let dispatcher = dispatcher(douban_registry(&upstream, 2_000));

    let envelope = match dispatcher.dispatch(&lookup_params(INCEPTION_ID)).await.unwrap() {
        DispatchOutcome::Lookup(envelope) => envelope,
        other => panic!("expected lookup, got {:?}", other),
    };

    assert!(envelope.success);
    let link = format!("{}/subject/3541415/", upstream.base_url);
    let expected = format!(
        "[img]https://img.example/p513344864.jpg[/img]\n\n\
         【基本信息】\n\
         标题: 盗梦空间 Inception\n\
         上映日期: 2010-09-01\n\
         类型: 剧情 / 科幻 / 悬疑\n\
         评分: 9.4/10\n\
         导演: 克里斯托弗·诺兰 Christopher Nolan\n\
         演员: 莱昂纳多·迪卡普里奥 Leonardo DiCaprio, 渡边谦 Ken Watanabe\n\
         链接: [url={link}]{link}[/url]\n\
         \n【简介】\n道姆·柯布与同事阿瑟和纳什在一次针对日本能源大亨齐藤的盗梦行动中失败。\n",
        link = link
    );
    assert_eq!(envelope.payload.format, expected);
    assert_eq!(envelope.payload.fields["rating"], "9.4");

    let json = serde_json::to_value(&envelope).unwrap();
    assert_eq!(json["title"], "盗梦空间 Inception");
    assert!(json["error"].is_null());
}

#[tokio::test]
async fn test_url_lookup_goes_through_pattern_table() {
    let upstream = spawn_upstream().await;
    let dispatcher = dispatcher(douban_registry(&upstream, 2_000));
    let params = QueryParams {
        url: Some(format!("{}/subject/{}/?from=showing", upstream.base_url, INCEPTION_ID)),
        ..Default::default()
    };

    match dispatcher.dispatch(&params).await.unwrap() {
        DispatchOutcome::Lookup(envelope) => assert!(envelope.success),
        other => panic!("expected lookup, got {:?}", other),
    }
}

#[tokio::test]
async fn test_repeated_lookup_hits_upstream_once() {
    let upstream = spawn_upstream().await;
    let dispatcher = dispatcher(douban_registry(&upstream, 2_000));

    for _ in 0..3 {
        dispatcher.dispatch(&lookup_params(INCEPTION_ID)).await.unwrap();
    }
    assert_eq!(upstream.hits(), 1);
}

#[tokio::test]
async fn test_timeout_becomes_failed_envelope() {
    let upstream = spawn_upstream().await;
    let dispatcher = dispatcher(douban_registry(&upstream, 300));

    let envelope = match dispatcher.dispatch(&lookup_params(SLOW_ID)).await.unwrap() {
        DispatchOutcome::Lookup(envelope) => envelope,
        other => panic!("expected lookup, got {:?}", other),
    };

    assert!(!envelope.success);
    let error = envelope.error.clone().unwrap();
    assert!(error.starts_with("Timeout fetching"), "got {}", error);
    assert!(error.ends_with("after 300ms"));

    let json = serde_json::to_value(&envelope).unwrap();
    assert_eq!(json["format"], "");
}

#[tokio::test]
async fn test_failures_are_not_cached() {
    let upstream = spawn_upstream().await;
    let dispatcher = dispatcher(douban_registry(&upstream, 2_000));

    for _ in 0..2 {
        match dispatcher.dispatch(&lookup_params(MISSING_ID)).await.unwrap() {
            DispatchOutcome::Lookup(envelope) => {
                assert!(!envelope.success);
                assert!(envelope.error.unwrap().starts_with("HTTP 404 for:"));
            }
            other => panic!("expected lookup, got {:?}", other),
        }
    }
    assert_eq!(upstream.hits(), 2);
}

#[tokio::test]
async fn test_page_without_data_is_extraction_error() {
    let upstream = spawn_upstream().await;
    let adapter = DoubanAdapter::with_base_url(test_fetcher(2_000), &upstream.base_url);

    let err = adapter.lookup(EMPTY_ID).await.unwrap_err();
    assert_eq!(err, SourceError::extraction("douban", "no structured data"));
}

#[tokio::test]
async fn test_status_error_surfaces_as_fetch_error() {
    let upstream = spawn_upstream().await;
    let adapter = DoubanAdapter::with_base_url(test_fetcher(2_000), &upstream.base_url);

    let err = adapter.lookup(MISSING_ID).await.unwrap_err();
    assert!(matches!(
        err,
        SourceError::Fetch(FetchError::Status { status: 404, .. })
    ));
}
