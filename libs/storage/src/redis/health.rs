use std::time::Instant;
use tracing::debug;

use super::KeyValueClient;
use crate::common::{HealthStatus, StoreError, StoreResult};

/// Check Redis health with a `PING` round-trip
///
/// The outcome also feeds the client's liveness flag, like any other
/// operation.
///
/// # Example
/// ```ignore
/// use storage::redis::{KeyValueClient, RedisConfig, check_health};
///
/// let client = KeyValueClient::new(&RedisConfig::default())?;
/// check_health(&client).await?;
/// ```
pub async fn check_health(client: &KeyValueClient) -> StoreResult<()> {
    debug!("Running Redis health check");

    let response = client.ping().await?;
    if response != "PONG" {
        return Err(StoreError::HealthCheckFailed(format!(
            "Redis PING returned unexpected response: {}",
            response
        )));
    }

    debug!("Redis health check passed");
    Ok(())
}

/// Check Redis health with timing information
pub async fn check_health_detailed(client: &KeyValueClient) -> HealthStatus {
    let start = Instant::now();
    let result = check_health(client).await;
    let elapsed = start.elapsed().as_millis() as u64;

    match result {
        Ok(_) => HealthStatus::healthy(elapsed),
        Err(e) => HealthStatus::unhealthy(e.to_string(), elapsed),
    }
}
