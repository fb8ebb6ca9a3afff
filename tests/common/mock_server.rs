//! Mock `/api/time` endpoint for HTTP time source tests.

use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use renderlab::models::TimeSample;

/// Wrapper around wiremock MockServer with convenience methods
pub struct MockTimeServer {
    pub server: MockServer,
}

impl MockTimeServer {
    /// Start a new mock HTTP server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Base URL of the mock server
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Full URL of the mocked time endpoint
    pub fn time_url(&self) -> String {
        format!("{}/api/time", self.server.uri())
    }

    /// Serve a freshly generated sample, expecting exactly `calls` requests
    pub async fn mock_sample(&self, calls: u64) -> TimeSample {
        let sample = TimeSample::generate();
        Mock::given(method("GET"))
            .and(path("/api/time"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&sample))
            .expect(calls)
            .mount(&self.server)
            .await;
        sample
    }

    /// Serve a sample for at most `calls` requests, then fall through
    pub async fn mock_sample_times(&self, sample: &TimeSample, calls: u64) {
        Mock::given(method("GET"))
            .and(path("/api/time"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample))
            .up_to_n_times(calls)
            .mount(&self.server)
            .await;
    }

    /// Answer the time endpoint with an error status
    pub async fn mock_error(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path("/api/time"))
            .respond_with(ResponseTemplate::new(status).set_body_string("upstream failure"))
            .mount(&self.server)
            .await;
    }

    /// Answer with a body that is not a sample
    pub async fn mock_garbage(&self) {
        Mock::given(method("GET"))
            .and(path("/api/time"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&self.server)
            .await;
    }

    /// Number of requests the mock has received so far
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }
}
