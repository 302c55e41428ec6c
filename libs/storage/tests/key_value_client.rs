//! Key-value client behaviour against the in-memory backend

use std::sync::Arc;
use std::time::Duration;

use storage::{ConnectionEvent, StoreError};
use storage::redis::{KeyValueClient, MemoryStore};
use test_utils::TestDataBuilder;

fn client() -> KeyValueClient {
    KeyValueClient::with_store(Arc::new(MemoryStore::new()))
}

#[tokio::test]
async fn test_set_then_get_returns_value() {
    let client = client();
    let data = TestDataBuilder::from_test_name("test_set_then_get_returns_value");

    let cases = [
        (data.key("text", "1"), "bar".to_string()),
        (data.key("empty", "1"), String::new()),
        (data.key("unicode", "1"), "fichier-é".to_string()),
    ];

    for (key, value) in cases {
        client.set(&key, value.as_str(), None).await.unwrap();
        assert_eq!(client.get(&key).await.unwrap(), Some(value));
    }
}

#[tokio::test]
async fn test_scalar_values_read_back_as_strings() {
    let client = client();

    client.set("n", 42i64, None).await.unwrap();
    client.set("b", false, None).await.unwrap();
    client.set("f", 0.25f64, None).await.unwrap();

    assert_eq!(client.get("n").await.unwrap().as_deref(), Some("42"));
    assert_eq!(client.get("b").await.unwrap().as_deref(), Some("false"));
    assert_eq!(client.get("f").await.unwrap().as_deref(), Some("0.25"));
}

#[tokio::test]
async fn test_get_missing_key_is_none() {
    assert_eq!(client().get("never-set").await.unwrap(), None);
}

#[tokio::test]
async fn test_del_then_get_is_none() {
    let client = client();

    client.set("auth_token", "user-1", None).await.unwrap();
    client.del("auth_token").await.unwrap();
    assert_eq!(client.get("auth_token").await.unwrap(), None);

    // Deleting again, or deleting a key that never existed, is fine.
    client.del("auth_token").await.unwrap();
    client.del("never-set").await.unwrap();
    assert_eq!(client.get("never-set").await.unwrap(), None);
}

#[tokio::test(start_paused = true)]
async fn test_foo_bar_expires_after_one_second() {
    let client = client();

    client.set("foo", "bar", Some(1)).await.unwrap();
    assert_eq!(client.get("foo").await.unwrap().as_deref(), Some("bar"));
    assert_eq!(client.ttl("foo").await.unwrap(), Some(1));

    tokio::time::advance(Duration::from_secs(1)).await;
    assert_eq!(client.get("foo").await.unwrap(), None);
}

#[tokio::test(start_paused = true)]
async fn test_expiry_holds_for_various_ttls() {
    let client = client();

    for secs in [1u64, 5, 60, 3_600] {
        let key = format!("ttl-{secs}");
        client.set(&key, "v", Some(secs)).await.unwrap();
        assert_eq!(client.get(&key).await.unwrap().as_deref(), Some("v"));
        assert_eq!(client.ttl(&key).await.unwrap(), Some(secs));

        tokio::time::advance(Duration::from_secs(secs)).await;
        assert_eq!(client.get(&key).await.unwrap(), None, "key {key} outlived its TTL");
    }
}

#[tokio::test(start_paused = true)]
async fn test_zero_expiry_keeps_key() {
    let client = client();

    client.set("sticky", "v", Some(0)).await.unwrap();
    tokio::time::advance(Duration::from_secs(86_400)).await;

    assert_eq!(client.get("sticky").await.unwrap().as_deref(), Some("v"));
    assert_eq!(client.ttl("sticky").await.unwrap(), None);
}

#[tokio::test]
async fn test_huge_expiry_is_rejected_not_fatal() {
    let client = client();

    let err = client.set("k", "v", Some(u64::MAX)).await.unwrap_err();
    assert!(matches!(err, StoreError::Query(_)), "got {err:?}");
    assert!(client.is_alive());
    assert_eq!(client.get("k").await.unwrap(), None);
}

#[tokio::test]
async fn test_liveness_follows_last_event() {
    let client = client();
    assert!(client.is_alive());

    client.record(ConnectionEvent::Error("connect ECONNREFUSED".to_string()));
    assert!(!client.is_alive());

    client.record(ConnectionEvent::Connected);
    assert!(client.is_alive());
}

#[tokio::test]
async fn test_concurrent_callers_share_one_client() {
    let client = client();

    let tasks: Vec<_> = (0..16i64)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move {
                let key = format!("k{i}");
                client.set(&key, i, None).await.unwrap();
                client.get(&key).await.unwrap()
            })
        })
        .collect();

    for (i, task) in tasks.into_iter().enumerate() {
        assert_eq!(task.await.unwrap(), Some(i.to_string()));
    }
}
