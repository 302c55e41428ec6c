//! Shared test utilities for the storage clients
//!
//! - `TestMongo`: MongoDB container with automatic cleanup (feature: "mongo")
//! - `TestRedis`: Redis container with automatic cleanup (feature: "redis")
//! - `TestDataBuilder`: Deterministic key and document naming (always available)
//! - `assertions`: Custom assertion helpers (always available)
//!
//! # Features
//!
//! - `mongo`: Enables MongoDB test infrastructure
//! - `redis`: Enables Redis test infrastructure
//! - `all`: Enables both
//!
//! # Usage
//!
//! Add the features you need to your dev-dependencies:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { workspace = true, features = ["mongo", "redis"] }
//! ```
//!
//! Container-backed tests need a Docker daemon, so they are usually marked
//! `#[ignore]` and run with `cargo test -- --ignored`:
//!
//! ```rust,ignore
//! use test_utils::{TestDataBuilder, TestRedis};
//!
//! #[tokio::test]
//! #[ignore = "requires Docker"]
//! async fn my_redis_test() {
//!     let redis = TestRedis::new().await;
//!     let data = TestDataBuilder::from_test_name("my_redis_test");
//!
//!     let key = data.key("auth", "token");
//!     // point a client at redis.connection_string()
//! }
//! ```

#[cfg(feature = "mongo")]
mod mongo;

#[cfg(feature = "redis")]
mod redis;

#[cfg(feature = "mongo")]
pub use mongo::TestMongo;

#[cfg(feature = "redis")]
pub use redis::TestRedis;

/// Builder for test data with deterministic naming
///
/// Keys and names derive from a seed, so reruns of the same test touch the
/// same keys while different tests never collide.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_set_then_get");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Key-value key scoped to this test, e.g. `test:auth:12345:token`
    pub fn key(&self, namespace: &str, suffix: &str) -> String {
        format!("test:{}:{}:{}", namespace, self.seed, suffix)
    }

    /// Resource name scoped to this test
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("my_test");
    /// let name = builder.name("db", "counts");
    /// // Returns: "test-db-12345-counts"
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Email address for the n-th seeded user
    pub fn email(&self, n: usize) -> String {
        format!("user{}-{}@test.local", n, self.seed)
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that an optional string value equals `expected`
    pub fn assert_value(actual: Option<String>, expected: &str, context: &str) {
        let actual = assert_some(actual, context);
        assert_eq!(
            actual, expected,
            "{}: expected value {:?}, got {:?}",
            context, expected, actual
        );
    }
}
