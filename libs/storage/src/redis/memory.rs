use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use super::KeyValueStore;
use crate::common::{StoreError, StoreResult};

struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| now >= deadline)
    }
}

/// In-process key-value backend with store-side expiry
///
/// Deadlines are measured with [`tokio::time::Instant`], so tests running
/// with paused time can advance the clock instead of sleeping. Expired keys
/// are dropped lazily on access.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) keys
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        entries.retain(|_, entry| !entry.is_expired(now));
        entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;

        match entries.get(key) {
            Some(entry) if entry.is_expired(now) => {
                entries.remove(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: String, expiry_secs: Option<u64>) -> StoreResult<()> {
        let expires_at = match expiry_secs {
            Some(secs) => Some(
                Instant::now()
                    .checked_add(Duration::from_secs(secs))
                    .ok_or_else(|| {
                        StoreError::Query(format!("invalid expire time in 'set' command: {secs}"))
                    })?,
            ),
            None => None,
        };
        self.entries
            .lock()
            .await
            .insert(key.to_string(), Entry { value, expires_at });
        Ok(())
    }

    async fn del(&self, key: &str) -> StoreResult<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }

    async fn ttl(&self, key: &str) -> StoreResult<Option<u64>> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;

        let Some(entry) = entries.get(key) else {
            return Ok(None);
        };
        if entry.is_expired(now) {
            entries.remove(key);
            return Ok(None);
        }

        // Rounded to the nearest second, as the server reports it
        Ok(entry
            .expires_at
            .map(|deadline| ((deadline - now).as_millis() as u64 + 500) / 1000))
    }

    async fn ping(&self) -> StoreResult<String> {
        Ok("PONG".to_string())
    }
}
