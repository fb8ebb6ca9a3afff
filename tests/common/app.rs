//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use renderlab::models::AppConfig;
use renderlab::server::{build_router, create_app_state, create_app_state_with_source, AppState};
use renderlab::services::{LocalTimeSource, PageRenderer, TimeSource};

/// Test application with router and direct access to services
pub struct TestApp {
    router: axum::Router,
    pub pages: Arc<PageRenderer>,
}

impl TestApp {
    /// Create a test app whose pages generate samples in-process
    pub fn new() -> Self {
        Self::with_config(AppConfig {
            endpoint_delay_ms: 0,
            ..Default::default()
        })
    }

    /// Create a test app with custom config and an in-process time source
    pub fn with_config(config: AppConfig) -> Self {
        let source = Arc::new(LocalTimeSource::new(config.endpoint_delay()));
        Self::with_source(config, source)
    }

    /// Create a test app whose pages fetch from the given base URL over HTTP
    pub fn with_base_url(base_url: &str, revalidate_secs: u64) -> Self {
        let config = AppConfig {
            endpoint_delay_ms: 0,
            revalidate_secs,
            ..Default::default()
        }
        .with_api_base_url(Some(base_url.to_string()));
        let state = create_app_state(config).expect("Failed to create app state");
        Self::from_state(state)
    }

    pub fn with_source(config: AppConfig, source: Arc<dyn TimeSource>) -> Self {
        Self::from_state(create_app_state_with_source(config, source))
    }

    fn from_state(state: AppState) -> Self {
        let pages = state.pages.clone();
        let router = build_router(state);
        Self { router, pages }
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a GET request with custom headers
    pub async fn get_with_headers(&self, path: &str, headers: &[(&str, &str)]) -> TestResponse {
        let mut builder = Request::get(path);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        self.request(builder.body(Body::empty()).unwrap()).await
    }

    /// Make a POST request with a form-encoded body
    pub async fn post_form(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::post(path)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(request).await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Get a response header as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
