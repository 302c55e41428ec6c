//! Redis test infrastructure

use redis::aio::MultiplexedConnection;
use redis::{Client, cmd};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::redis::Redis;

const REDIS_PORT: u16 = 6379;

/// Test Redis wrapper that ensures proper cleanup
///
/// The container is stopped and removed when this struct is dropped. Besides
/// the URL for the client under test, it keeps a raw connection so a test
/// can inspect what actually landed on the server.
///
/// # Example
///
/// ```no_run
/// use test_utils::TestRedis;
/// use redis::AsyncCommands;
///
/// # async fn example() {
/// let redis = TestRedis::new().await;
/// let mut raw = redis.connection();
///
/// let ttl: i64 = raw.ttl("auth_abc").await.unwrap();
/// # }
/// ```
pub struct TestRedis {
    container: ContainerAsync<Redis>,
    connection: MultiplexedConnection,
    pub connection_string: String,
}

impl TestRedis {
    /// Start a Redis 8 Alpine instance
    pub async fn new() -> Self {
        let container = Redis::default()
            .with_tag("8-alpine")
            .start()
            .await
            .expect("Failed to start Redis container");

        let host_port = container
            .get_host_port_ipv4(REDIS_PORT)
            .await
            .expect("Failed to get Redis port");

        let connection_string = format!("redis://127.0.0.1:{}", host_port);

        let connection = Client::open(connection_string.as_str())
            .expect("Failed to create Redis client")
            .get_multiplexed_async_connection()
            .await
            .expect("Failed to connect to Redis");

        tracing::info!(port = host_port, "Test Redis ready (Redis 8-alpine)");

        Self {
            container,
            connection,
            connection_string,
        }
    }

    /// Raw connection for inspecting server state
    pub fn connection(&self) -> MultiplexedConnection {
        self.connection.clone()
    }

    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }

    /// Kill the server, leaving open client connections to notice on their own
    pub async fn stop(&self) {
        self.container
            .stop_with_timeout(Some(0))
            .await
            .expect("Failed to stop Redis container");
    }

    /// Drop every key, for tests sharing one container
    pub async fn flush(&self) {
        let mut conn = self.connection();
        cmd("FLUSHDB")
            .query_async::<()>(&mut conn)
            .await
            .expect("Failed to flush Redis");
    }
}

impl Drop for TestRedis {
    fn drop(&mut self) {
        tracing::debug!("Cleaning up test Redis container");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redis::AsyncCommands;

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_redis_set_get() {
        let redis = TestRedis::new().await;
        let mut conn = redis.connection();

        conn.set::<_, _, ()>("test_key", "test_value")
            .await
            .unwrap();

        let value: String = conn.get("test_key").await.unwrap();
        assert_eq!(value, "test_value");
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_redis_expiry_is_reported() {
        let redis = TestRedis::new().await;
        let mut conn = redis.connection();

        conn.set_ex::<_, _, ()>("expiring_key", "value", 30)
            .await
            .unwrap();

        let ttl: i64 = conn.ttl("expiring_key").await.unwrap();
        assert!((1..=30).contains(&ttl));
    }
}
