//! Key-value client against a real Redis server
//!
//! Run with `cargo test -p storage -- --ignored` on a machine with Docker.

use redis::AsyncCommands;
use storage::StoreError;
use storage::redis::{KeyValueClient, RedisConfig, check_health};
use test_utils::{TestDataBuilder, TestRedis, assertions};

async fn connected_client(redis: &TestRedis) -> KeyValueClient {
    let client = KeyValueClient::new(&RedisConfig::new(redis.connection_string())).unwrap();
    client.connect().await.unwrap();
    client
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_set_get_del_round_trip() {
    let redis = TestRedis::new().await;
    let client = connected_client(&redis).await;
    let data = TestDataBuilder::from_test_name("test_set_get_del_round_trip");
    let key = data.key("auth", "token");

    client.set(&key, "user-1", None).await.unwrap();
    assertions::assert_value(client.get(&key).await.unwrap(), "user-1", "after set");

    client.del(&key).await.unwrap();
    assert_eq!(client.get(&key).await.unwrap(), None);
    client.del(&key).await.unwrap();

    assert!(client.is_alive());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_expiry_is_applied_by_server() {
    let redis = TestRedis::new().await;
    let client = connected_client(&redis).await;
    let mut raw = redis.connection();

    client.set("auth_abc", "user-1", Some(86_400)).await.unwrap();
    client.set("plain", 7i64, None).await.unwrap();

    let ttl: i64 = raw.ttl("auth_abc").await.unwrap();
    assert!((86_300..=86_400).contains(&ttl), "unexpected TTL {ttl}");
    let ttl = client.ttl("auth_abc").await.unwrap().unwrap();
    assert!(ttl <= 86_400);

    let stored: String = raw.get("plain").await.unwrap();
    assert_eq!(stored, "7");
    assert_eq!(client.ttl("plain").await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_key_is_gone_after_expiry() {
    let redis = TestRedis::new().await;
    let client = connected_client(&redis).await;

    client.set("foo", "bar", Some(1)).await.unwrap();
    assertions::assert_value(client.get("foo").await.unwrap(), "bar", "before expiry");

    tokio::time::sleep(std::time::Duration::from_millis(1_500)).await;
    assert_eq!(client.get("foo").await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_wrong_type_is_query_error() {
    let redis = TestRedis::new().await;
    let client = connected_client(&redis).await;
    let mut raw = redis.connection();

    raw.rpush::<_, _, ()>("a_list", "item").await.unwrap();

    let err = client.get("a_list").await.unwrap_err();
    assert!(matches!(err, StoreError::Query(_)), "got {err:?}");
    assert!(client.is_alive());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_health_check_passes() {
    let redis = TestRedis::new().await;
    let client = connected_client(&redis).await;

    check_health(&client).await.unwrap();
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_idle_resp3_client_notices_server_loss() {
    let redis = TestRedis::new().await;
    let url = format!("{}/?protocol=resp3", redis.connection_string());
    let client = KeyValueClient::new(&RedisConfig::new(url)).unwrap();
    client.connect().await.unwrap();
    assert!(client.is_alive());

    redis.stop().await;

    // No operation is issued; only the driver's disconnection notice can flip the flag.
    for _ in 0..50 {
        if !client.is_alive() {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }
    assert!(!client.is_alive());
}

#[tokio::test]
async fn test_unreachable_server_reports_connection_error() {
    let client = KeyValueClient::new(&RedisConfig::new("redis://127.0.0.1:1")).unwrap();

    let err = client.get("foo").await.unwrap_err();
    assert!(err.is_connection(), "got {err:?}");
    assert!(!client.is_alive());
}
