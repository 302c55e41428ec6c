use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, Client, PushInfo, PushKind};
use tokio::sync::OnceCell;
use tracing::info;

use crate::common::{ConnectionEvent, Liveness, StoreError, StoreResult};

/// Backend operations the [`super::KeyValueClient`] forwards to
///
/// Implementations report transport failures as [`StoreError::Connection`];
/// the client uses that distinction to drive its liveness flag.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Establish the underlying connection if it is not up yet
    async fn connect(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Store `value`, expiring it after `expiry_secs` seconds when given
    async fn set(&self, key: &str, value: String, expiry_secs: Option<u64>) -> StoreResult<()>;

    async fn del(&self, key: &str) -> StoreResult<()>;

    /// Remaining lifetime in seconds; `None` for missing or persistent keys
    async fn ttl(&self, key: &str) -> StoreResult<Option<u64>>;

    async fn ping(&self) -> StoreResult<String>;
}

/// Redis backend built on a lazily established [`ConnectionManager`]
///
/// Opening the store only parses the URL. The connection is made on first use
/// (or by an explicit [`KeyValueStore::connect`]); if that fails, the next
/// operation tries again. Once up, the manager reconnects on its own.
///
/// With a RESP3 URL (`?protocol=resp3`) and a [`Liveness`] attached, the
/// driver's disconnection notices are fed into that flag, so an idle client
/// notices a dead server without a caller. Over RESP2 the driver has no push
/// channel and only failed operations report the loss.
pub struct RedisStore {
    client: Client,
    manager: OnceCell<ConnectionManager>,
    liveness: Option<Liveness>,
}

impl RedisStore {
    pub fn open(url: &str) -> StoreResult<Self> {
        let client = Client::open(url)
            .map_err(|e| StoreError::Config(format!("invalid Redis URL: {}", e)))?;

        Ok(Self {
            client,
            manager: OnceCell::new(),
            liveness: None,
        })
    }

    /// Report driver disconnection notices to `liveness`
    pub fn with_liveness(mut self, liveness: Liveness) -> Self {
        self.liveness = Some(liveness);
        self
    }

    /// Whether the driver can push disconnection notices on this URL
    fn receives_pushes(&self) -> bool {
        self.client
            .get_connection_info()
            .redis_settings()
            .protocol()
            .supports_resp3()
    }

    fn manager_config(&self) -> ConnectionManagerConfig {
        let config = ConnectionManagerConfig::new();
        match &self.liveness {
            Some(liveness) if self.receives_pushes() => {
                config.set_push_sender(disconnect_notifier(liveness.clone()))
            }
            _ => config,
        }
    }

    async fn connection(&self) -> StoreResult<ConnectionManager> {
        let manager = self
            .manager
            .get_or_try_init(|| async {
                info!("Attempting to connect to Redis");
                let manager =
                    ConnectionManager::new_with_config(self.client.clone(), self.manager_config())
                        .await?;
                info!("Successfully connected to Redis");
                Ok::<_, StoreError>(manager)
            })
            .await?;

        Ok(manager.clone())
    }
}

/// Push handler that turns a dropped connection into an error event
fn disconnect_notifier(
    liveness: Liveness,
) -> impl Fn(PushInfo) -> Result<(), ()> + Send + Sync + 'static {
    move |push: PushInfo| {
        if push.kind == PushKind::Disconnection {
            liveness.apply(ConnectionEvent::Error(
                "connection to Redis closed".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn connect(&self) -> StoreResult<()> {
        self.connection().await.map(|_| ())
    }

    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: String, expiry_secs: Option<u64>) -> StoreResult<()> {
        let mut conn = self.connection().await?;
        match expiry_secs {
            Some(secs) => conn.set_ex::<_, _, ()>(key, value, secs).await?,
            None => conn.set::<_, _, ()>(key, value).await?,
        }
        Ok(())
    }

    async fn del(&self, key: &str) -> StoreResult<()> {
        let mut conn = self.connection().await?;
        conn.del::<_, ()>(key).await?;
        Ok(())
    }

    async fn ttl(&self, key: &str) -> StoreResult<Option<u64>> {
        let mut conn = self.connection().await?;
        // -2: no such key, -1: no expiry
        let ttl: i64 = conn.ttl(key).await?;
        Ok(u64::try_from(ttl).ok())
    }

    async fn ping(&self) -> StoreResult<String> {
        let mut conn = self.connection().await?;
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(pong)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::LinkState;

    #[test]
    fn test_open_rejects_bad_url() {
        let Err(err) = RedisStore::open("not a redis url") else {
            panic!("expected an invalid URL to be rejected");
        };
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[test]
    fn test_push_notices_need_resp3() {
        assert!(!RedisStore::open("redis://127.0.0.1:6379").unwrap().receives_pushes());
        assert!(
            RedisStore::open("redis://127.0.0.1:6379/?protocol=resp3")
                .unwrap()
                .receives_pushes()
        );
    }

    #[test]
    fn test_disconnection_notice_marks_dead() {
        let liveness = Liveness::new("redis", LinkState::Connected);
        let notify = disconnect_notifier(liveness.clone());

        notify(PushInfo {
            kind: PushKind::Invalidate,
            data: vec![],
        })
        .unwrap();
        assert!(liveness.is_alive());

        notify(PushInfo {
            kind: PushKind::Disconnection,
            data: vec![],
        })
        .unwrap();
        assert!(!liveness.is_alive());
    }

    #[test]
    fn test_open_does_not_connect() {
        // Parsing succeeds even though nothing listens on this port.
        assert!(RedisStore::open("redis://127.0.0.1:1").is_ok());
    }
}
