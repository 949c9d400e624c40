//! In-memory store implementation using the moka crate.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use moka::future::Cache;
use tokio::sync::RwLock;
use tracing::debug;

use notesgpt_core::config::MemoryStoreConfig;
use notesgpt_core::result::AppResult;
use notesgpt_core::traits::KeyValueStore;

use crate::keys;

/// In-memory key-value store using moka.
///
/// Entries never expire. Once `max_capacity` is reached moka evicts the
/// least valuable entries; pinned keys (the session token) are kept apart
/// from the cache and are never evicted.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    /// Bounded cache for evictable entries.
    cache: Cache<String, String>,
    /// Entries exempt from eviction.
    pinned: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create a new in-memory store from configuration.
    pub fn new(config: &MemoryStoreConfig) -> Self {
        let cache = Cache::builder().max_capacity(config.max_capacity).build();
        Self {
            cache,
            pinned: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        if keys::is_pinned(key) {
            return Ok(self.pinned.read().await.get(key).cloned());
        }
        Ok(self.cache.get(key).await)
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        if keys::is_pinned(key) {
            self.pinned
                .write()
                .await
                .insert(key.to_string(), value.to_string());
        } else {
            self.cache.insert(key.to_string(), value.to_string()).await;
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        if keys::is_pinned(key) {
            self.pinned.write().await.remove(key);
        } else {
            self.cache.remove(key).await;
        }
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        if keys::is_pinned(key) {
            return Ok(self.pinned.read().await.contains_key(key));
        }
        Ok(self.cache.contains_key(key))
    }

    async fn delete_prefix(&self, prefix: &str) -> AppResult<u64> {
        // Moka doesn't support prefix scans, so collect first then remove.
        let keys_to_remove: Vec<String> = self
            .cache
            .iter()
            .filter(|entry| entry.0.starts_with(prefix))
            .map(|entry| entry.0.to_string())
            .collect();

        let mut count = 0u64;
        for key in keys_to_remove {
            self.cache.remove(&key).await;
            count += 1;
        }

        let mut pinned = self.pinned.write().await;
        let before = pinned.len();
        pinned.retain(|key, _| !key.starts_with(prefix));
        count += (before - pinned.len()) as u64;

        debug!(prefix, count, "Deleted keys matching prefix");
        Ok(count)
    }

    async fn clear(&self) -> AppResult<()> {
        self.cache.invalidate_all();
        self.pinned.write().await.clear();
        Ok(())
    }
}
