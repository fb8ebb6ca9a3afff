use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Message attached to every sample
pub const SAMPLE_MESSAGE: &str = "This data is generated on the server";

/// Exclusive upper bound of `random_number`
pub const RANDOM_BOUND: u32 = 1000;

/// Format an instant the way browsers print `Date.toISOString()`
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current time as an ISO-8601 string
pub fn now_iso() -> String {
    iso_timestamp(Utc::now())
}

/// Response body of `/api/time`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeSample {
    /// Moment the sample was produced (ISO-8601, UTC)
    #[schema(example = "2026-10-19T08:15:30.123Z")]
    pub timestamp: String,
    /// Uniform random integer in [0, 1000)
    #[schema(minimum = 0, maximum = 999)]
    pub random_number: u32,
    /// Always "This data is generated on the server"
    pub message: String,
}

impl TimeSample {
    /// Produce a sample stamped with the current time
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::thread_rng())
    }

    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            timestamp: now_iso(),
            random_number: rng.gen_range(0..RANDOM_BOUND),
            message: SAMPLE_MESSAGE.to_string(),
        }
    }

    /// Parse `timestamp` back into a UTC instant
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}
