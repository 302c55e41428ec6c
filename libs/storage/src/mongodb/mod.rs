//! Document store (MongoDB) client
//!
//! Provides the `users`/`files` view of the files-manager database.

mod client;
mod config;
mod health;

pub use client::{DocumentStoreClient, FILES_COLLECTION, USERS_COLLECTION};
pub use config::MongoConfig;
pub use health::{check_health, check_health_detailed};

// Re-export MongoDB types for convenience
pub use mongodb::bson::{Document, doc};
pub use mongodb::{Client, Collection, Database};
