//! Response cache for `/query`.
//!
//! Keyed by SHA-256 of the lowercased `"<molecule>:<prompt>"`. Entries
//! carry their own expiry and are evicted lazily when read after it.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;
use tracing::{debug, info};

pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

pub fn cache_key(molecule: &str, prompt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{molecule}:{prompt}").to_lowercase().as_bytes());
    format!("{:x}", hasher.finalize())
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    expires_at: Instant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub cached_items: usize,
    pub ttl_seconds: u64,
}

#[derive(Debug)]
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
    enabled: bool,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self { entries: Mutex::new(HashMap::new()), ttl, enabled: true }
    }

    /// A cache that never stores anything.
    pub fn disabled() -> Self {
        Self { enabled: false, ..Self::default() }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn get(&self, molecule: &str, prompt: &str) -> Option<Value> {
        if !self.enabled {
            return None;
        }
        let key = cache_key(molecule, prompt);
        let mut entries = self.entries.lock().await;
        let entry = entries.get(&key)?;
        if Instant::now() < entry.expires_at {
            debug!(molecule, "Cache hit");
            return Some(entry.value.clone());
        }
        entries.remove(&key);
        debug!(molecule, "Cache entry expired");
        None
    }

    pub async fn set(&self, molecule: &str, prompt: &str, value: Value) {
        if !self.enabled {
            return;
        }
        let entry = CacheEntry { value, expires_at: Instant::now() + self.ttl };
        self.entries.lock().await.insert(cache_key(molecule, prompt), entry);
        debug!(molecule, "Cache set");
    }

    pub async fn clear(&self) -> usize {
        let mut entries = self.entries.lock().await;
        let n = entries.len();
        entries.clear();
        info!(removed = n, "Response cache cleared");
        n
    }

    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            cached_items: self.entries.lock().await.len(),
            ttl_seconds: self.ttl.as_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_is_case_insensitive_sha256_hex() {
        let a = cache_key("Aspirin", "Market Outlook");
        let b = cache_key("aspirin", "market outlook");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, cache_key("aspirin", "trials"));
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let cache = ResponseCache::default();
        cache.set("Aspirin", "p", json!({"score": 1})).await;
        assert_eq!(cache.get("ASPIRIN", "P").await, Some(json!({"score": 1})));
        assert_eq!(cache.stats().await, CacheStats { cached_items: 1, ttl_seconds: 3600 });
    }

    #[tokio::test]
    async fn test_expired_entry_is_evicted_on_read() {
        let cache = ResponseCache::new(Duration::from_millis(20));
        cache.set("Aspirin", "p", json!(1)).await;
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(cache.get("Aspirin", "p").await.is_none());
        assert_eq!(cache.stats().await.cached_items, 0);
    }

    #[tokio::test]
    async fn test_disabled_cache_stores_nothing() {
        let cache = ResponseCache::disabled();
        cache.set("Aspirin", "p", json!(1)).await;
        assert!(cache.get("Aspirin", "p").await.is_none());
        assert_eq!(cache.stats().await.cached_items, 0);
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = ResponseCache::default();
        cache.set("A", "p", json!(1)).await;
        cache.set("B", "p", json!(2)).await;
        assert_eq!(cache.clear().await, 2);
        assert_eq!(cache.stats().await.cached_items, 0);
    }
}
