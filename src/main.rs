// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use ptgen::{
    api::{serve, AppState},
    cache::LookupService,
    config::AppConfig,
    dispatch::Dispatcher,
    fetch::PageFetcher,
    sources::SourceRegistry,
    version,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting {}", version::get_version_string());

    let config = AppConfig::from_env();
    config.validate()?;

    let fetcher = Arc::new(PageFetcher::new(config.fetch.clone())?);
    let registry = Arc::new(SourceRegistry::with_defaults(fetcher)?);
    info!("Sources registered: {:?}", registry.names());

    let service = Arc::new(LookupService::open(&config.cache).await);
    let dispatcher = Dispatcher::new(registry, service.clone());

    if config.server.api_key.is_some() {
        info!("API key required for all routes except /health");
    }
    if !config.server.search_enabled {
        info!("Search is disabled");
    }

    let addr = config.server.bind_addr()?;
    let state = AppState::new(dispatcher, config.server);
    let result = serve(addr, state).await;

    service.close().await;
    result
}
