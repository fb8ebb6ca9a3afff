//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use renderlab::models::{RANDOM_BOUND, SAMPLE_MESSAGE};

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status,
        expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert a JSON value is a well-formed time sample with exactly three fields
pub fn assert_valid_sample(json: &serde_json::Value) {
    let object = json.as_object().expect("Expected a JSON object");

    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["message", "randomNumber", "timestamp"]);

    let timestamp = json["timestamp"].as_str().expect("timestamp should be a string");
    assert!(
        chrono::DateTime::parse_from_rfc3339(timestamp).is_ok(),
        "timestamp should be ISO-8601, got {timestamp}"
    );

    let random = json["randomNumber"]
        .as_u64()
        .expect("randomNumber should be a non-negative integer");
    assert!(random < RANDOM_BOUND as u64, "randomNumber out of range: {random}");

    assert_eq!(json["message"], SAMPLE_MESSAGE);
}

/// Assert the page response reports the expected cache outcome
pub fn assert_render_cache(response: &TestResponse, expected: &str) {
    assert_eq!(
        response.header("x-render-cache"),
        Some(expected),
        "Unexpected X-Render-Cache header"
    );
}

/// Assert an error response carries the JSON error body
pub fn assert_json_error(response: &TestResponse, status: StatusCode, message: &str) {
    assert_status(response, status);
    let json: serde_json::Value = response.json();
    assert_eq!(json["status"].as_u64(), Some(status.as_u16() as u64));
    assert_eq!(json["error"], message);
}
