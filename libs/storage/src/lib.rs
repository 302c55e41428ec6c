//! Storage clients for the files-manager backend
//!
//! Two independent wrappers, each owning one connection to an external store:
//!
//! - [`mongodb::DocumentStoreClient`] mediates access to the `users` and `files`
//!   collections of the document database.
//! - [`redis::KeyValueClient`] gets, sets (optionally with a TTL) and deletes
//!   keys in the key-value store.
//!
//! Both expose an advisory `is_alive()` flag driven by connection events rather
//! than by polling. Build them once per process (see [`clients::StorageClients`])
//! and hand clones to whatever needs them.
//!
//! # Features
//!
//! - `mongodb` (default) - document store client
//! - `redis` (default) - key-value store client
//! - `config` (default) - `core_config::FromEnv` impls for the client configs
//!
//! # Examples
//!
//! ## Document store
//!
//! ```ignore
//! use storage::mongodb::{DocumentStoreClient, MongoConfig};
//!
//! let client = DocumentStoreClient::new(&MongoConfig::default())?;
//! let users = client.count_users().await?;
//! ```
//!
//! ## Key-value store
//!
//! ```ignore
//! use storage::redis::{KeyValueClient, RedisConfig};
//!
//! let client = KeyValueClient::new(&RedisConfig::default())?;
//! client.set("auth_token", "user-id", Some(86_400)).await?;
//! let value = client.get("auth_token").await?;
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

#[cfg(feature = "redis")]
pub mod redis;

#[cfg(all(feature = "mongodb", feature = "redis"))]
pub mod clients;

pub use common::{ConnectionEvent, HealthStatus, LinkState, Liveness, StoreError, StoreResult};

#[cfg(all(feature = "mongodb", feature = "redis"))]
pub use clients::StorageClients;
