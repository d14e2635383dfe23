// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Command-line front-end running the same dispatcher as the HTTP service

use anyhow::{anyhow, Result};
use clap::{ArgGroup, Args, Parser, Subcommand};
use std::sync::Arc;

use crate::cache::{config::DEFAULT_CACHE_TTL_SECS, CacheConfig, LookupService};
use crate::dispatch::{DispatchOutcome, Dispatcher, QueryParams};
use crate::fetch::{FetchConfig, PageFetcher};
use crate::sources::SourceRegistry;

/// PT-Gen CLI
#[derive(Parser, Debug)]
#[command(name = "ptgen-cli")]
#[command(version = "1.0.0")]
#[command(about = "Search catalog sites and generate BBCode info blocks", long_about = None)]
pub struct Cli {
    /// Cache TTL in seconds
    #[arg(long, env = "CACHE_TTL", default_value_t = DEFAULT_CACHE_TTL_SECS, global = true)]
    pub cache_ttl: u64,

    /// Redis connection string; omitted means in-memory cache
    #[arg(long, env = "REDIS_URL", global = true)]
    pub redis_url: Option<String>,

    /// Upstream request timeout in milliseconds
    #[arg(long, env = "FETCH_TIMEOUT_MS", default_value_t = 10_000, global = true)]
    pub fetch_timeout_ms: u64,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Keyword search against one source
    Search(SearchArgs),

    /// Generate the info block for one item
    Info(InfoArgs),
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Source name, e.g. douban
    #[arg(long)]
    pub source: String,

    /// Search keyword
    pub query: String,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("target").required(true).args(["url", "site"])))]
pub struct InfoArgs {
    /// Item URL, e.g. https://movie.douban.com/subject/3541415/
    #[arg(long)]
    pub url: Option<String>,

    /// Source name
    #[arg(long, requires = "sid")]
    pub site: Option<String>,

    /// Item ID within the source
    #[arg(long, requires = "site")]
    pub sid: Option<String>,
}

impl Cli {
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            ttl_secs: self.cache_ttl,
            redis_url: self.redis_url.clone().filter(|u| !u.trim().is_empty()),
            ..CacheConfig::from_env()
        }
    }

    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            timeout_ms: self.fetch_timeout_ms,
            ..FetchConfig::from_env()
        }
    }

    /// Parameter bag equivalent to the HTTP query string
    pub fn query_params(&self) -> QueryParams {
        match &self.command {
            Commands::Search(args) => QueryParams {
                search: Some(args.query.clone()),
                source: Some(args.source.clone()),
                ..Default::default()
            },
            Commands::Info(args) => QueryParams {
                url: args.url.clone(),
                site: args.site.clone(),
                sid: args.sid.clone(),
                ..Default::default()
            },
        }
        .normalized()
    }
}

/// Execute CLI command and print the envelope as pretty JSON
pub async fn execute(cli: Cli) -> Result<()> {
    let cache_config = cli.cache_config();
    let fetch_config = cli.fetch_config();
    cache_config.validate().map_err(|e| anyhow!(e))?;
    fetch_config.validate().map_err(|e| anyhow!(e))?;

    let fetcher = Arc::new(PageFetcher::new(fetch_config)?);
    let registry = Arc::new(SourceRegistry::with_defaults(fetcher)?);
    let service = Arc::new(LookupService::open(&cache_config).await);
    let dispatcher = Dispatcher::new(registry, service.clone());

    let outcome = dispatcher.dispatch(&cli.query_params()).await;
    service.close().await;

    let json = match outcome? {
        DispatchOutcome::Search(envelope) => serde_json::to_string_pretty(&envelope)?,
        DispatchOutcome::Lookup(envelope) => serde_json::to_string_pretty(&envelope)?,
        DispatchOutcome::NoIntent => return Err(anyhow!("Nothing to do")),
    };
    println!("{}", json);
    Ok(())
}
