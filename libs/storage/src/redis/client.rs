use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{KeyValueStore, RedisConfig, RedisStore, StoreValue};
use crate::common::{ConnectionEvent, LinkState, Liveness, StoreError, StoreResult};

/// Owns the connection to the key-value store
///
/// The liveness flag starts optimistic (connected) and is then driven by
/// connection events. These come from the background connect attempt made at
/// construction, from transport errors returned by operations, from successful
/// operations after a reconnect, and (over RESP3) from the driver's own
/// disconnection notices. Query-level errors leave it untouched.
///
/// Cloning is cheap; clones share the backend and the flag.
#[derive(Clone)]
pub struct KeyValueClient {
    store: Arc<dyn KeyValueStore>,
    liveness: Liveness,
}

impl KeyValueClient {
    /// Open a Redis-backed client.
    ///
    /// Only the URL is validated here. When called inside a tokio runtime, a
    /// connection attempt is started in the background so that the first
    /// connect or error event fires without waiting for a caller.
    pub fn new(config: &RedisConfig) -> StoreResult<Self> {
        info!(url = %config.url(), "Creating Redis client");

        let liveness = Liveness::new("redis", LinkState::Connected);
        let store = RedisStore::open(config.url())?.with_liveness(liveness.clone());
        let client = Self {
            store: Arc::new(store),
            liveness,
        };

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let probe = client.clone();
            handle.spawn(async move {
                // Failures are recorded as an error event by `connect`.
                let _ = probe.connect().await;
            });
        }

        Ok(client)
    }

    /// Build a client over any backend, e.g. a [`super::MemoryStore`] in tests
    pub fn with_store(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            liveness: Liveness::new("redis", LinkState::Connected),
        }
    }

    /// Last observed connection state. Non-blocking and advisory.
    pub fn is_alive(&self) -> bool {
        self.liveness.is_alive()
    }

    /// Feed a connection event into the liveness state machine
    pub fn record(&self, event: ConnectionEvent) {
        self.liveness.apply(event);
    }

    /// Establish the backend connection now instead of on first use
    pub async fn connect(&self) -> StoreResult<()> {
        let result = self.store.connect().await;
        self.observe(result)
    }

    /// Value stored under `key`, or `None` if it does not exist
    #[instrument(skip(self))]
    pub async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let result = self.store.get(key).await;
        let value = self.observe(result)?;
        debug!(hit = value.is_some(), "GET");
        Ok(value)
    }

    /// Store `value` under `key`.
    ///
    /// With `expiry_secs`, the store drops the entry after that many seconds.
    /// `Some(0)` means no expiry, not immediate expiry.
    #[instrument(skip(self, value))]
    pub async fn set(
        &self,
        key: &str,
        value: impl Into<StoreValue>,
        expiry_secs: Option<u64>,
    ) -> StoreResult<()> {
        let value = value.into().to_string();
        let expiry_secs = expiry_secs.filter(|secs| *secs > 0);

        let result = self.store.set(key, value, expiry_secs).await;
        self.observe(result)?;
        debug!(?expiry_secs, "SET");
        Ok(())
    }

    /// Remove `key`. Removing a missing key is not an error.
    #[instrument(skip(self))]
    pub async fn del(&self, key: &str) -> StoreResult<()> {
        let result = self.store.del(key).await;
        self.observe(result)?;
        debug!("DEL");
        Ok(())
    }

    /// Store-reported remaining lifetime of `key` in seconds
    #[instrument(skip(self))]
    pub async fn ttl(&self, key: &str) -> StoreResult<Option<u64>> {
        let result = self.store.ttl(key).await;
        self.observe(result)
    }

    pub(crate) async fn ping(&self) -> StoreResult<String> {
        let result = self.store.ping().await;
        self.observe(result)
    }

    /// Translate an operation outcome into a connection event
    fn observe<T>(&self, result: StoreResult<T>) -> StoreResult<T> {
        match &result {
            Ok(_) => {
                if !self.liveness.is_alive() {
                    self.liveness.apply(ConnectionEvent::Connected);
                }
            }
            Err(StoreError::Connection(message)) => {
                self.liveness.apply(ConnectionEvent::Error(message.clone()));
            }
            Err(_) => {}
        }
        result
    }
}

impl fmt::Debug for KeyValueClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyValueClient")
            .field("liveness", &self.liveness)
            .finish_non_exhaustive()
    }
}
