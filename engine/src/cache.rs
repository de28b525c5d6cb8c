//! Expiring Cache
//!
//! Generic read-through cache with a fixed TTL, refreshed lazily on the
//! next access after expiry. Used for the PolicyEngine OAuth token and
//! income-limit lookups. There is no background refresh: a stale value is
//! replaced only when someone asks for it.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Single-value cache with lazy TTL-based refresh
#[derive(Debug)]
pub struct ExpiringCache<T> {
    ttl: Duration,
    slot: Mutex<Option<(T, Instant)>>,
}

impl<T: Clone> ExpiringCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// Return the cached value, refreshing via `fetch` on miss or expiry
    ///
    /// A failed refresh leaves the cache empty; the next access retries.
    pub fn get_or_refresh<E>(&self, fetch: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());

        if let Some((value, stored_at)) = slot.as_ref() {
            if stored_at.elapsed() < self.ttl {
                return Ok(value.clone());
            }
        }

        match fetch() {
            Ok(value) => {
                *slot = Some((value.clone(), Instant::now()));
                Ok(value)
            }
            Err(e) => {
                *slot = None;
                Err(e)
            }
        }
    }

    /// Drop any cached value, forcing a refresh on next access
    pub fn invalidate(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caches_until_ttl() {
        let cache: ExpiringCache<u32> = ExpiringCache::new(Duration::from_secs(60));
        let mut calls = 0;

        let first: Result<u32, ()> = cache.get_or_refresh(|| {
            calls += 1;
            Ok(7)
        });
        assert_eq!(first, Ok(7));

        let second: Result<u32, ()> = cache.get_or_refresh(|| {
            calls += 1;
            Ok(8)
        });
        // Still within TTL: fetch not called again
        assert_eq!(second, Ok(7));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_zero_ttl_always_refreshes() {
        let cache: ExpiringCache<u32> = ExpiringCache::new(Duration::from_secs(0));

        let first: Result<u32, ()> = cache.get_or_refresh(|| Ok(1));
        let second: Result<u32, ()> = cache.get_or_refresh(|| Ok(2));
        assert_eq!(first, Ok(1));
        assert_eq!(second, Ok(2));
    }

    #[test]
    fn test_failed_refresh_retries_next_access() {
        let cache: ExpiringCache<u32> = ExpiringCache::new(Duration::from_secs(60));

        let failed: Result<u32, &str> = cache.get_or_refresh(|| Err("down"));
        assert_eq!(failed, Err("down"));

        let ok: Result<u32, &str> = cache.get_or_refresh(|| Ok(3));
        assert_eq!(ok, Ok(3));
    }

    #[test]
    fn test_invalidate_forces_refresh() {
        let cache: ExpiringCache<u32> = ExpiringCache::new(Duration::from_secs(60));

        let _: Result<u32, ()> = cache.get_or_refresh(|| Ok(1));
        cache.invalidate();
        let refreshed: Result<u32, ()> = cache.get_or_refresh(|| Ok(2));
        assert_eq!(refreshed, Ok(2));
    }
}
