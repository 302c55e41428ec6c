//! The per-process pair of store clients

use std::sync::Arc;
use tracing::info;

use crate::common::StoreResult;
use crate::mongodb::{DocumentStoreClient, MongoConfig};
use crate::redis::{KeyValueClient, RedisConfig};

/// Both store clients, built once at startup and passed to whoever needs them
///
/// There is no global accessor. Construct this in `main`, keep it in
/// application state, and give tests a bundle built over fakes with
/// [`StorageClients::from_parts`].
#[derive(Clone, Debug)]
pub struct StorageClients {
    pub documents: Arc<DocumentStoreClient>,
    pub key_value: Arc<KeyValueClient>,
}

impl StorageClients {
    /// Create both clients. Neither waits for its server.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(mongo: &MongoConfig, redis: &RedisConfig) -> StoreResult<Self> {
        let clients = Self::from_parts(
            DocumentStoreClient::new(mongo)?,
            KeyValueClient::new(redis)?,
        );
        info!("Storage clients created");
        Ok(clients)
    }

    pub fn from_parts(documents: DocumentStoreClient, key_value: KeyValueClient) -> Self {
        Self {
            documents: Arc::new(documents),
            key_value: Arc::new(key_value),
        }
    }

    /// Create both clients from `DB_*` and `REDIS_URL` environment variables
    #[cfg(feature = "config")]
    pub fn from_env() -> StoreResult<Self> {
        use core_config::FromEnv;

        let mongo = MongoConfig::from_env()?;
        let redis = RedisConfig::from_env()?;
        Self::new(&mongo, &redis)
    }
}
