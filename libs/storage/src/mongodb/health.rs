use mongodb::bson::doc;
use std::time::Instant;

use super::DocumentStoreClient;
use crate::common::HealthStatus;

/// Check MongoDB health with a `ping` round-trip
///
/// Unlike [`DocumentStoreClient::is_alive`], this actually talks to the
/// server and waits up to the configured server selection timeout.
///
/// # Example
/// ```ignore
/// use storage::mongodb::{DocumentStoreClient, MongoConfig, check_health};
///
/// let client = DocumentStoreClient::new(&MongoConfig::default())?;
/// let healthy = check_health(&client).await;
/// ```
pub async fn check_health(client: &DocumentStoreClient) -> bool {
    client
        .database()
        .run_command(doc! { "ping": 1 })
        .await
        .is_ok()
}

/// Check MongoDB health with timing information and the error message, if any
pub async fn check_health_detailed(client: &DocumentStoreClient) -> HealthStatus {
    let start = Instant::now();
    let result = client.database().run_command(doc! { "ping": 1 }).await;
    let elapsed = start.elapsed().as_millis() as u64;

    match result {
        Ok(_) => HealthStatus::healthy(elapsed),
        Err(e) => HealthStatus::unhealthy(e.to_string(), elapsed),
    }
}
