//! Key-value store (Redis) client
//!
//! [`KeyValueClient`] is the entry point. It talks to a [`KeyValueStore`]
//! backend: [`RedisStore`] in production, [`MemoryStore`] for tests and local
//! tooling.

mod client;
mod config;
mod health;
mod memory;
mod store;
mod value;

pub use client::KeyValueClient;
pub use config::RedisConfig;
pub use health::{check_health, check_health_detailed};
pub use memory::MemoryStore;
pub use store::{KeyValueStore, RedisStore};
pub use value::StoreValue;

#[cfg(test)]
pub use store::MockKeyValueStore;

// Re-export redis types for convenience
pub use redis::aio::ConnectionManager;
pub use redis::{Client, RedisError};
