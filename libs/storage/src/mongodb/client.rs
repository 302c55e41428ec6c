use mongodb::bson::{Document, doc};
use mongodb::event::EventHandler;
use mongodb::event::sdam::SdamEvent;
use mongodb::options::{ClientOptions, ServerAddress};
use mongodb::{Client, Collection, Database};
use std::time::Duration;
use tracing::{debug, info, instrument};

use super::MongoConfig;
use crate::common::{ConnectionEvent, LinkState, Liveness, StoreResult};

pub const USERS_COLLECTION: &str = "users";
pub const FILES_COLLECTION: &str = "files";

/// Owns the connection to the document database
///
/// Construction is synchronous and never waits for the server: the driver
/// connects in the background and reports progress through SDAM events,
/// which drive [`DocumentStoreClient::is_alive`]. Until the first successful
/// heartbeat the client reports itself as not alive.
///
/// Cloning is cheap and shares the driver's connection pool.
#[derive(Clone, Debug)]
pub struct DocumentStoreClient {
    client: Client,
    database: Database,
    liveness: Liveness,
}

impl DocumentStoreClient {
    /// Create the client and start connecting in the background.
    ///
    /// Must be called from within a tokio runtime; the driver spawns its
    /// monitoring tasks here.
    pub fn new(config: &MongoConfig) -> StoreResult<Self> {
        info!(url = %config.url(), "Creating MongoDB client");

        let liveness = Liveness::new("mongodb", LinkState::Disconnected);
        let options = client_options(config, liveness.clone());
        let client = Client::with_options(options)?;
        let database = client.database(config.database());

        Ok(Self {
            client,
            database,
            liveness,
        })
    }

    /// Whether the driver last reported the server as reachable.
    ///
    /// Advisory only: a `true` here does not guarantee the next call succeeds.
    pub fn is_alive(&self) -> bool {
        self.liveness.is_alive()
    }

    /// Number of documents in the `users` collection
    #[instrument(skip(self))]
    pub async fn count_users(&self) -> StoreResult<u64> {
        self.count(USERS_COLLECTION).await
    }

    /// Number of documents in the `files` collection
    #[instrument(skip(self))]
    pub async fn count_files(&self) -> StoreResult<u64> {
        self.count(FILES_COLLECTION).await
    }

    pub fn users_collection(&self) -> Collection<Document> {
        self.database.collection(USERS_COLLECTION)
    }

    pub fn files_collection(&self) -> Collection<Document> {
        self.database.collection(FILES_COLLECTION)
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    async fn count(&self, collection: &str) -> StoreResult<u64> {
        let count = self
            .database
            .collection::<Document>(collection)
            .count_documents(doc! {})
            .await?;

        debug!(collection, count, "Counted documents");
        Ok(count)
    }
}

fn client_options(config: &MongoConfig, liveness: Liveness) -> ClientOptions {
    let mut options = ClientOptions::default();

    options.hosts = vec![ServerAddress::Tcp {
        host: config.host.clone(),
        port: Some(config.port),
    }];
    options.default_database = Some(config.database.clone());
    options.app_name = config.app_name.clone();
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));
    options.sdam_event_handler = Some(EventHandler::callback(move |event: SdamEvent| {
        if let Some(event) = connection_event(&event) {
            liveness.apply(event);
        }
    }));

    options
}

/// Map a topology notification onto the liveness state machine
fn connection_event(event: &SdamEvent) -> Option<ConnectionEvent> {
    match event {
        SdamEvent::ServerHeartbeatSucceeded(_) => Some(ConnectionEvent::Connected),
        SdamEvent::ServerHeartbeatFailed(failed) => Some(ConnectionEvent::Error(format!(
            "heartbeat to {} failed: {}",
            failed.server_address, failed.failure
        ))),
        SdamEvent::ServerClosed(closed) => Some(ConnectionEvent::Error(format!(
            "server {} removed from topology",
            closed.address
        ))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StoreError;

    fn unreachable_config() -> MongoConfig {
        // Nothing listens on port 1; selection gives up after a second.
        MongoConfig::with_database("127.0.0.1", 1, "files_manager_test")
            .with_server_selection_timeout(1)
    }

    #[test]
    fn test_client_options_from_config() {
        let config = MongoConfig::with_database("mongo.internal", 27018, "fm")
            .with_app_name("status-api");
        let options = client_options(&config, Liveness::new("mongodb", LinkState::Disconnected));

        assert_eq!(
            options.hosts,
            vec![ServerAddress::Tcp {
                host: "mongo.internal".to_string(),
                port: Some(27018),
            }]
        );
        assert_eq!(options.default_database.as_deref(), Some("fm"));
        assert_eq!(options.app_name.as_deref(), Some("status-api"));
        assert_eq!(options.server_selection_timeout, Some(Duration::from_secs(30)));
        assert!(options.sdam_event_handler.is_some());
    }

    #[tokio::test]
    async fn test_construction_does_not_block_or_fail() {
        let client = DocumentStoreClient::new(&unreachable_config()).unwrap();

        assert!(!client.is_alive());
        assert_eq!(client.database().name(), "files_manager_test");
        assert_eq!(client.users_collection().name(), "users");
        assert_eq!(client.files_collection().name(), "files");
    }

    #[tokio::test]
    async fn test_count_on_unreachable_server_is_connection_error() {
        let client = DocumentStoreClient::new(&unreachable_config()).unwrap();

        let err = client.count_users().await.unwrap_err();
        assert!(matches!(err, StoreError::Connection(_)), "got {err:?}");

        let err = client.count_files().await.unwrap_err();
        assert!(err.is_connection());
        assert!(!client.is_alive());
    }
}
