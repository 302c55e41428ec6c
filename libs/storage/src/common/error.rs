/// Error type shared by the document and key-value clients
///
/// Driver errors are sorted into two buckets: transport failures
/// ([`StoreError::Connection`]) and everything the server or driver rejected
/// for any other reason ([`StoreError::Query`]). Nothing is retried; the
/// caller gets the failure as-is.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached, or the connection broke mid-request
    #[error("Connection error: {0}")]
    Connection(String),

    /// The store answered, but the operation was rejected
    #[error("Query error: {0}")]
    Query(String),

    /// Client configuration could not be turned into a driver client
    #[error("Configuration error: {0}")]
    Config(String),

    /// A health probe got an unexpected answer
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),
}

impl StoreError {
    /// Whether this error came from the transport rather than the query
    pub fn is_connection(&self) -> bool {
        matches!(self, StoreError::Connection(_))
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(feature = "config")]
impl From<core_config::ConfigError> for StoreError {
    fn from(err: core_config::ConfigError) -> Self {
        StoreError::Config(err.to_string())
    }
}

#[cfg(feature = "redis")]
impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_io_error()
            || err.is_connection_refusal()
            || err.is_connection_dropped()
            || err.is_timeout()
        {
            StoreError::Connection(err.to_string())
        } else {
            StoreError::Query(err.to_string())
        }
    }
}

#[cfg(feature = "mongodb")]
impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;

        match err.kind.as_ref() {
            ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::ConnectionPoolCleared { .. } => StoreError::Connection(err.to_string()),
            _ => StoreError::Query(err.to_string()),
        }
    }
}
