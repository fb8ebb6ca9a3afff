use axum::{extract::State, response::Json};
use std::sync::Arc;

use crate::models::{AppConfig, TimeSample};
use crate::services::produce_sample;

/// Mock data endpoint
///
/// Waits out a fixed artificial latency (100 ms by default), then returns the
/// current time, a random integer in [0, 1000) and a fixed message.
#[utoipa::path(
    get,
    path = "/api/time",
    responses(
        (status = 200, description = "Freshly generated sample", body = TimeSample),
    ),
    tag = "Data"
)]
pub async fn handle_time(State(config): State<Arc<AppConfig>>) -> Json<TimeSample> {
    let sample = produce_sample(config.endpoint_delay()).await;

    tracing::debug!(
        timestamp = %sample.timestamp,
        random_number = sample.random_number,
        "Time sample generated"
    );

    Json(sample)
}
