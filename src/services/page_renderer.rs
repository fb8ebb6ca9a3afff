use std::sync::Arc;
use std::time::Duration;

use crate::error::FetchError;
use crate::models::{now_iso, CachePolicy, PageRender, Strategy};
use crate::services::route_cache::{CacheStatus, RouteCache};
use crate::services::TimeSource;

/// A page render together with how the cache answered
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    pub page: PageRender,
    pub cache: CacheStatus,
    pub policy: CachePolicy,
}

/// Renders strategy pages through the route cache
pub struct PageRenderer {
    source: Arc<dyn TimeSource>,
    cache: RouteCache<PageRender>,
    revalidate: Duration,
}

impl PageRenderer {
    pub fn new(source: Arc<dyn TimeSource>, revalidate: Duration) -> Self {
        Self {
            source,
            cache: RouteCache::new(),
            revalidate,
        }
    }

    pub fn policy_for(&self, strategy: Strategy) -> CachePolicy {
        strategy.policy(self.revalidate)
    }

    /// Evaluate a strategy's page under its policy
    pub async fn render(&self, strategy: Strategy) -> Result<RenderOutcome, FetchError> {
        let policy = self.policy_for(strategy);
        let source = self.source.clone();

        let (page, cache) = self
            .cache
            .get_or_load(strategy.path(), policy, move || {
                render_pass(strategy, policy, source)
            })
            .await?;

        tracing::debug!(
            strategy = %strategy,
            policy = policy.name(),
            cache = cache.as_str(),
            rendered_at = %page.rendered_at,
            "Page rendered"
        );

        Ok(RenderOutcome {
            page,
            cache,
            policy,
        })
    }

    /// Drop cached renders for a route path
    pub async fn invalidate(&self, scope: &str) -> bool {
        self.cache.invalidate(scope).await
    }

    /// Whether a route path currently has a cached render
    pub async fn is_cached(&self, scope: &str) -> bool {
        self.cache.contains(scope).await
    }

    /// Render every cacheable page once, as a build step would.
    ///
    /// Returns how many pages were rendered; failures are logged and skipped.
    pub async fn prerender(&self) -> usize {
        let mut rendered = 0;
        for strategy in Strategy::ALL {
            if !self.policy_for(strategy).is_cacheable() {
                continue;
            }
            match self.render(strategy).await {
                Ok(_) => rendered += 1,
                Err(e) => {
                    tracing::warn!(strategy = %strategy, error = %e, "Prerender failed");
                }
            }
        }
        tracing::info!(pages = rendered, "Prerender complete");
        rendered
    }
}

/// One rendering pass: capture the render time, then fetch if the page needs data
async fn render_pass(
    strategy: Strategy,
    policy: CachePolicy,
    source: Arc<dyn TimeSource>,
) -> Result<PageRender, FetchError> {
    let rendered_at = now_iso();
    let data = if strategy.fetches_data() {
        Some(source.fetch().await?)
    } else {
        None
    };
    Ok(PageRender::new(strategy, policy, rendered_at, data))
}
