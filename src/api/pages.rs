use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::headers::{etag_for, HeaderMapExt};
use crate::error::ApiError;
use crate::models::{PageRender, Strategy};
use crate::services::PageRenderer;

/// Header reporting how the route cache answered
pub const RENDER_CACHE_HEADER: &str = "x-render-cache";

/// Render a strategy page and attach cache headers.
///
/// Answers `304 Not Modified` when the client already holds this render.
async fn render_page(
    renderer: &PageRenderer,
    strategy: Strategy,
    headers: &HeaderMap,
) -> Result<Response, ApiError> {
    let outcome = renderer.render(strategy).await?;

    let body = serde_json::to_vec(&outcome.page)
        .map_err(|e| ApiError::Internal(format!("Failed to serialize page: {e}")))?;
    let etag = etag_for(&body);

    let cache_control = HeaderValue::from_str(&outcome.policy.cache_control())
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    let etag_value =
        HeaderValue::from_str(&etag).map_err(|e| ApiError::Internal(e.to_string()))?;
    let response_headers = [
        (header::CACHE_CONTROL, cache_control),
        (header::ETAG, etag_value),
        (
            header::HeaderName::from_static(RENDER_CACHE_HEADER),
            HeaderValue::from_static(outcome.cache.as_str()),
        ),
    ];

    if headers.if_none_match(&etag) {
        tracing::debug!(strategy = %strategy, "Client copy is current");
        return Ok((StatusCode::NOT_MODIFIED, response_headers).into_response());
    }

    Ok((
        StatusCode::OK,
        response_headers,
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        )],
        body,
    )
        .into_response())
}

/// Static site generation
///
/// Data fetched once with `force-cache` and reused until restart.
#[utoipa::path(
    get,
    path = "/ssg",
    responses(
        (status = 200, description = "Page rendered at build time", body = PageRender),
        (status = 304, description = "Client copy is current"),
        (status = 502, description = "Failed to fetch data"),
    ),
    tag = "Pages"
)]
pub async fn handle_ssg(
    State(renderer): State<Arc<PageRenderer>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    render_page(&renderer, Strategy::Ssg, &headers).await
}

/// Incremental static regeneration
///
/// Cached for the revalidation window; the first request after the window
/// gets the stale page and triggers one background re-render.
#[utoipa::path(
    get,
    path = "/isr",
    responses(
        (status = 200, description = "Cached page, possibly stale", body = PageRender),
        (status = 304, description = "Client copy is current"),
        (status = 502, description = "Failed to fetch data"),
    ),
    tag = "Pages"
)]
pub async fn handle_isr(
    State(renderer): State<Arc<PageRenderer>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    render_page(&renderer, Strategy::Isr, &headers).await
}

/// Server-side rendering
///
/// Fresh data on every request (`no-store`).
#[utoipa::path(
    get,
    path = "/ssr",
    responses(
        (status = 200, description = "Page rendered for this request", body = PageRender),
        (status = 502, description = "Failed to fetch data"),
    ),
    tag = "Pages"
)]
pub async fn handle_ssr(
    State(renderer): State<Arc<PageRenderer>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    render_page(&renderer, Strategy::Ssr, &headers).await
}

/// Server components
///
/// Data fetched on the server during rendering, never cached.
#[utoipa::path(
    get,
    path = "/rsc",
    responses(
        (status = 200, description = "Page rendered on the server", body = PageRender),
        (status = 502, description = "Failed to fetch data"),
    ),
    tag = "Pages"
)]
pub async fn handle_rsc(
    State(renderer): State<Arc<PageRenderer>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    render_page(&renderer, Strategy::Rsc, &headers).await
}

/// Server actions page
///
/// Rendered once and kept until a form submission invalidates it.
#[utoipa::path(
    get,
    path = "/server-actions",
    responses(
        (status = 200, description = "Cached page", body = PageRender),
        (status = 304, description = "Client copy is current"),
    ),
    tag = "Pages"
)]
pub async fn handle_server_actions(
    State(renderer): State<Arc<PageRenderer>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    render_page(&renderer, Strategy::ServerActions, &headers).await
}
