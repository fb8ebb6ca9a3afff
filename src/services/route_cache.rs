//! Per-scope render cache implementing the fetch policies.
//!
//! Each scope (a route path) owns a single slot. `ForceCache` fills the slot
//! once and keeps it; `Revalidate` serves the slot while fresh, and once the
//! window has elapsed serves the stale value while exactly one background
//! task refreshes it; `NoStore` never touches the slot.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;

use crate::error::FetchError;
use crate::models::CachePolicy;

/// How a lookup was answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Served from a fresh slot
    Hit,
    /// Served from an expired slot while a refresh runs
    Stale,
    /// Slot was empty and got filled by this lookup
    Miss,
    /// Policy does not cache
    Bypass,
}

impl CacheStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hit => "HIT",
            Self::Stale => "STALE",
            Self::Miss => "MISS",
            Self::Bypass => "BYPASS",
        }
    }
}

struct CachedValue<T> {
    value: T,
    stored_at: Instant,
}

impl<T> CachedValue<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            stored_at: Instant::now(),
        }
    }
}

struct Slot<T> {
    entry: Mutex<Option<CachedValue<T>>>,
    refreshing: AtomicBool,
}

impl<T> Slot<T> {
    fn new() -> Self {
        Self {
            entry: Mutex::new(None),
            refreshing: AtomicBool::new(false),
        }
    }
}

/// Clears the slot's refresh flag when the refresh task ends, even by panic
struct RefreshGuard<T>(Arc<Slot<T>>);

impl<T> Drop for RefreshGuard<T> {
    fn drop(&mut self) {
        self.0.refreshing.store(false, Ordering::Release);
    }
}

/// Cache of rendered values keyed by scope
pub struct RouteCache<T> {
    slots: RwLock<HashMap<String, Arc<Slot<T>>>>,
}

impl<T> RouteCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
        }
    }

    async fn slot(&self, scope: &str) -> Arc<Slot<T>> {
        if let Some(slot) = self.slots.read().await.get(scope) {
            return slot.clone();
        }
        self.slots
            .write()
            .await
            .entry(scope.to_string())
            .or_insert_with(|| Arc::new(Slot::new()))
            .clone()
    }

    /// Look up `scope` under `policy`, calling `load` when a value is needed.
    ///
    /// `load` runs at most once per call: inline on a miss or bypass, or in a
    /// spawned task when a stale slot needs refreshing.
    pub async fn get_or_load<F, Fut>(
        &self,
        scope: &str,
        policy: CachePolicy,
        load: F,
    ) -> Result<(T, CacheStatus), FetchError>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        let window = match policy {
            CachePolicy::NoStore => {
                tracing::debug!(scope, "Route cache bypass");
                return load().await.map(|value| (value, CacheStatus::Bypass));
            }
            CachePolicy::ForceCache => None,
            CachePolicy::Revalidate(window) => Some(window),
        };

        let slot = self.slot(scope).await;
        let mut entry = slot.entry.lock().await;

        let cached = entry.as_ref().map(|cached| {
            let expired = window.is_some_and(|w| cached.stored_at.elapsed() >= w);
            (cached.value.clone(), expired)
        });

        if let Some((value, expired)) = cached {
            if !expired {
                tracing::debug!(scope, "Route cache hit");
                return Ok((value, CacheStatus::Hit));
            }
            drop(entry);

            if slot
                .refreshing
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                tracing::debug!(scope, "Route cache stale, refreshing in background");
                let scope = scope.to_string();
                let slot = slot.clone();
                tokio::spawn(async move {
                    let _guard = RefreshGuard(slot.clone());
                    match load().await {
                        Ok(fresh) => {
                            *slot.entry.lock().await = Some(CachedValue::new(fresh));
                            tracing::debug!(scope = %scope, "Route cache refreshed");
                        }
                        Err(e) => {
                            tracing::warn!(scope = %scope, error = %e, "Background refresh failed, keeping stale value");
                        }
                    }
                });
            } else {
                tracing::debug!(scope, "Route cache stale, refresh already in flight");
            }
            return Ok((value, CacheStatus::Stale));
        }

        // Fill while holding the slot lock so concurrent lookups share one load
        let value = load().await?;
        *entry = Some(CachedValue::new(value.clone()));
        tracing::debug!(scope, "Route cache miss, stored");
        Ok((value, CacheStatus::Miss))
    }

    /// Discard the slot for `scope`; the next lookup recomputes it.
    ///
    /// Returns whether a slot existed.
    pub async fn invalidate(&self, scope: &str) -> bool {
        let removed = self.slots.write().await.remove(scope).is_some();
        tracing::debug!(scope, removed, "Route cache invalidated");
        removed
    }

    /// Whether `scope` currently holds a value
    pub async fn contains(&self, scope: &str) -> bool {
        let slot = match self.slots.read().await.get(scope) {
            Some(slot) => slot.clone(),
            None => return false,
        };
        let filled = slot.entry.lock().await.is_some();
        filled
    }
}

impl<T> Default for RouteCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
