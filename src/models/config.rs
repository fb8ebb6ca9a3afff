use crate::assets::AssetLoader;
use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base address page routes use to reach `/api/time`
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Artificial latency of the mock endpoint in milliseconds
    #[serde(default = "default_endpoint_delay_ms")]
    pub endpoint_delay_ms: u64,

    /// Revalidation window for timed revalidation in seconds
    #[serde(default = "default_revalidate_secs")]
    pub revalidate_secs: u64,

    /// Render cacheable routes once at startup
    #[serde(default = "default_prerender")]
    pub prerender: bool,
}

fn default_api_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_endpoint_delay_ms() -> u64 {
    100
}

fn default_revalidate_secs() -> u64 {
    10
}

fn default_prerender() -> bool {
    true
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => Self::parse_or_default(&content),
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    fn parse_or_default(content: &str) -> Self {
        // An empty or comment-only document parses as null
        match serde_yaml::from_str::<Option<Self>>(content) {
            Ok(config) => {
                let config = config.unwrap_or_default();
                tracing::info!(
                    api_base_url = %config.api_base_url,
                    endpoint_delay_ms = config.endpoint_delay_ms,
                    revalidate_secs = config.revalidate_secs,
                    "Loaded configuration"
                );
                config
            }
            Err(e) => {
                tracing::warn!(%e, "Failed to parse config, using defaults");
                Self::default()
            }
        }
    }

    /// Apply `API_BASE_URL` from the environment
    pub fn with_env_overrides(self) -> Self {
        self.with_api_base_url(std::env::var("API_BASE_URL").ok())
    }

    /// Replace the base URL when an override is present
    pub fn with_api_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url;
        }
        self
    }

    /// Full URL of the mock endpoint
    pub fn time_url(&self) -> String {
        format!("{}/api/time", self.api_base_url.trim_end_matches('/'))
    }

    pub fn endpoint_delay(&self) -> Duration {
        Duration::from_millis(self.endpoint_delay_ms)
    }

    pub fn revalidate_window(&self) -> Duration {
        Duration::from_secs(self.revalidate_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            endpoint_delay_ms: default_endpoint_delay_ms(),
            revalidate_secs: default_revalidate_secs(),
            prerender: default_prerender(),
        }
    }
}
