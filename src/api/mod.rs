// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP boundary
//!
//! Routes, API-key check, search switch and error mapping around the
//! [`crate::dispatch::Dispatcher`].

pub mod auth;
pub mod errors;
pub mod handlers;
pub mod http_server;

pub use errors::{ApiError, ErrorResponse};
pub use http_server::{create_app, serve, shutdown_signal, AppState};
