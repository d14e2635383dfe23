// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::{any::Any, net::SocketAddr, sync::Arc};
use tokio::signal;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

use super::auth::require_api_key;
use super::errors::ApiError;
use super::handlers::{health_handler, info_handler, root_handler, search_handler};
use crate::config::ServerConfig;
use crate::dispatch::Dispatcher;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher, config: ServerConfig) -> Self {
        Self {
            dispatcher,
            config: Arc::new(config),
        }
    }
}

/// Build the router
///
/// `/health` is outside the API-key check; every other route is behind it.
pub fn create_app(state: AppState) -> Router {
    let protected = Router::new()
        .route("/", get(root_handler))
        .route("/api/search", get(search_handler))
        .route("/api/info", get(info_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    Router::new()
        .route("/health", get(health_handler))
        .merge(protected)
        .layer(
            CorsLayer::new()
                .allow_origin(AnyOrigin)
                .allow_methods(AnyOrigin)
                .allow_headers(AnyOrigin),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

/// Serve until Ctrl-C or SIGTERM
pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("PT-Gen listening on http://{}", listener.local_addr()?);

    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

/// Resolves on the first Ctrl-C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Ctrl-C received, shutting down gracefully"),
        _ = terminate => info!("SIGTERM received, shutting down gracefully"),
    }
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    ApiError::Internal(format!("handler panicked: {}", detail)).into_response()
}
