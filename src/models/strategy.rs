use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use utoipa::ToSchema;

/// How long a build-time cached page may be kept by shared caches
const FOREVER_SECS: u64 = 31_536_000;

/// Caching directive applied when a page fetches its data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Fetched once, reused until restart or invalidation
    ForceCache,
    /// Reused for the window, then refreshed in the background
    Revalidate(Duration),
    /// Fetched on every evaluation
    NoStore,
}

impl CachePolicy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ForceCache => "force-cache",
            Self::Revalidate(_) => "revalidate",
            Self::NoStore => "no-store",
        }
    }

    /// Revalidation window, for timed policies
    pub fn window(&self) -> Option<Duration> {
        match self {
            Self::Revalidate(window) => Some(*window),
            _ => None,
        }
    }

    pub fn is_cacheable(&self) -> bool {
        !matches!(self, Self::NoStore)
    }

    /// `Cache-Control` value sent with pages rendered under this policy
    pub fn cache_control(&self) -> String {
        match self {
            Self::ForceCache => format!("s-maxage={FOREVER_SECS}, stale-while-revalidate"),
            Self::Revalidate(window) => {
                format!("s-maxage={}, stale-while-revalidate", window.as_secs())
            }
            Self::NoStore => "private, no-cache, no-store, max-age=0, must-revalidate".to_string(),
        }
    }
}

/// Rendering strategy served by a page route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Static site generation
    Ssg,
    /// Incremental static regeneration
    Isr,
    /// Server-side rendering
    Ssr,
    /// Server components
    Rsc,
    /// Form mutations handled on the server
    ServerActions,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Ssg,
        Strategy::Isr,
        Strategy::Ssr,
        Strategy::Rsc,
        Strategy::ServerActions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ssg => "ssg",
            Self::Isr => "isr",
            Self::Ssr => "ssr",
            Self::Rsc => "rsc",
            Self::ServerActions => "server-actions",
        }
    }

    /// Route path, also used as the cache scope
    pub fn path(&self) -> &'static str {
        match self {
            Self::Ssg => "/ssg",
            Self::Isr => "/isr",
            Self::Ssr => "/ssr",
            Self::Rsc => "/rsc",
            Self::ServerActions => "/server-actions",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Ssg => "Static Site Generation",
            Self::Isr => "Incremental Static Regeneration",
            Self::Ssr => "Server-Side Rendering",
            Self::Rsc => "Server Components",
            Self::ServerActions => "Server Actions",
        }
    }

    /// Policy for this strategy given the configured revalidation window
    pub fn policy(&self, revalidate: Duration) -> CachePolicy {
        match self {
            Self::Ssg | Self::ServerActions => CachePolicy::ForceCache,
            Self::Isr => CachePolicy::Revalidate(revalidate),
            Self::Ssr | Self::Rsc => CachePolicy::NoStore,
        }
    }

    /// Whether rendering this page calls `/api/time`
    pub fn fetches_data(&self) -> bool {
        !matches!(self, Self::ServerActions)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_matrix() {
        let window = Duration::from_secs(10);
        assert_eq!(Strategy::Ssg.policy(window), CachePolicy::ForceCache);
        assert_eq!(Strategy::Isr.policy(window), CachePolicy::Revalidate(window));
        assert_eq!(Strategy::Ssr.policy(window), CachePolicy::NoStore);
        assert_eq!(Strategy::Rsc.policy(window), CachePolicy::NoStore);
        assert_eq!(Strategy::ServerActions.policy(window), CachePolicy::ForceCache);
    }

    #[test]
    fn test_cache_control_values() {
        assert_eq!(
            CachePolicy::Revalidate(Duration::from_secs(10)).cache_control(),
            "s-maxage=10, stale-while-revalidate"
        );
        assert!(CachePolicy::NoStore.cache_control().contains("no-store"));
        assert!(CachePolicy::ForceCache.cache_control().starts_with("s-maxage=31536000"));
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Strategy::ServerActions).unwrap();
        assert_eq!(json, "\"server-actions\"");
        assert_eq!(Strategy::ServerActions.to_string(), "server-actions");
    }
}
