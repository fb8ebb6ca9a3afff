//! Sources of `TimeSample`s for page rendering.
//!
//! Pages reach the mock endpoint over HTTP just like any other upstream,
//! so the route cache sees real latency and real failures.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::FetchError;
use crate::models::{AppConfig, TimeSample};

/// Anything that can hand out a fresh sample
#[async_trait]
pub trait TimeSource: Send + Sync {
    async fn fetch(&self) -> Result<TimeSample, FetchError>;
}

/// Wait out the artificial latency, then produce a sample
pub async fn produce_sample(delay: Duration) -> TimeSample {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    TimeSample::generate()
}

/// Fetches samples from a running `/api/time` endpoint
pub struct HttpTimeSource {
    client: reqwest::Client,
    url: String,
}

impl HttpTimeSource {
    pub fn new(url: impl Into<String>) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("renderlab/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        Self::new(config.time_url())
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl TimeSource for HttpTimeSource {
    async fn fetch(&self) -> Result<TimeSample, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %self.url, status = status.as_u16(), "Time endpoint returned an error");
            return Err(FetchError::Status(status.as_u16()));
        }

        let sample = response
            .json::<TimeSample>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        tracing::debug!(
            url = %self.url,
            random_number = sample.random_number,
            "Fetched time sample"
        );
        Ok(sample)
    }
}

/// Produces samples in-process, without a network hop
pub struct LocalTimeSource {
    delay: Duration,
}

impl LocalTimeSource {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl TimeSource for LocalTimeSource {
    async fn fetch(&self) -> Result<TimeSample, FetchError> {
        Ok(produce_sample(self.delay).await)
    }
}
