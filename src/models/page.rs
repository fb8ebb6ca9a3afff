use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{CachePolicy, Strategy, TimeSample};

/// Values a page displays after one rendering pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageRender {
    pub strategy: Strategy,
    /// Cache policy name ("force-cache", "revalidate", "no-store")
    pub policy: String,
    /// Revalidation window, only for timed revalidation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revalidate_seconds: Option<u64>,
    /// When the rendering pass began (ISO-8601)
    pub rendered_at: String,
    /// Data fetched from `/api/time`, absent for pages without a fetch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<TimeSample>,
}

impl PageRender {
    pub fn new(
        strategy: Strategy,
        policy: CachePolicy,
        rendered_at: String,
        data: Option<TimeSample>,
    ) -> Self {
        Self {
            strategy,
            policy: policy.name().to_string(),
            revalidate_seconds: policy.window().map(|w| w.as_secs()),
            rendered_at,
            data,
        }
    }
}
