//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::FromRef,
    http::{header::CACHE_CONTROL, HeaderValue},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::api;
use crate::models::AppConfig;
use crate::services::{HttpTimeSource, PageRenderer, TimeSource};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pages: Arc<PageRenderer>,
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<PageRenderer> {
    fn from_ref(state: &AppState) -> Self {
        state.pages.clone()
    }
}

/// Create application state whose pages fetch `/api/time` over HTTP.
pub fn create_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let source = HttpTimeSource::from_config(&config)
        .map_err(|e| anyhow::anyhow!("Failed to create time source: {e}"))?;

    tracing::info!(url = %source.url(), "Pages fetch data from time endpoint");

    Ok(create_app_state_with_source(config, Arc::new(source)))
}

/// Create application state with a custom time source.
pub fn create_app_state_with_source(config: AppConfig, source: Arc<dyn TimeSource>) -> AppState {
    let pages = Arc::new(PageRenderer::new(source, config.revalidate_window()));

    AppState {
        config: Arc::new(config),
        pages,
    }
}

/// Build the router with all endpoints and middleware.
///
/// Responses without their own `Cache-Control` are marked `no-store`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Mock data endpoint
        .route("/api/time", get(api::handle_time))
        // Strategy pages
        .route("/ssg", get(api::handle_ssg))
        .route("/isr", get(api::handle_isr))
        .route("/ssr", get(api::handle_ssr))
        .route("/rsc", get(api::handle_rsc))
        .route(
            "/server-actions",
            get(api::handle_server_actions).post(api::handle_submit_message),
        )
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}
