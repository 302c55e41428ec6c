#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_optional, env_or_default, env_parse_or_default};

/// MongoDB connection settings for the document store
///
/// # Example
///
/// ```ignore
/// use storage::mongodb::MongoConfig;
///
/// // localhost:27017, database `files_manager`
/// let config = MongoConfig::default();
///
/// // Explicit host and database
/// let config = MongoConfig::with_database("mongo.internal", 27017, "files_manager_test");
///
/// // From DB_HOST / DB_PORT / DB_DATABASE (requires `config` feature)
/// let config = MongoConfig::from_env()?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoConfig {
    pub host: String,

    pub port: u16,

    /// Database that holds the `users` and `files` collections
    pub database: String,

    /// Optional application name for server logs
    pub app_name: Option<String>,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// How long an operation waits for a usable server before failing
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    pub const DEFAULT_HOST: &'static str = "localhost";
    pub const DEFAULT_PORT: u16 = 27017;
    pub const DEFAULT_DATABASE: &'static str = "files_manager";

    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    pub fn with_database(host: impl Into<String>, port: u16, database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            ..Self::new(host, port)
        }
    }

    /// Set the application name for server logs
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn with_server_selection_timeout(mut self, secs: u64) -> Self {
        self.server_selection_timeout_secs = secs;
        self
    }

    /// Connection string in the form `mongodb://host:port/database`
    pub fn url(&self) -> String {
        format!("mongodb://{}:{}/{}", self.host, self.port, self.database)
    }

    pub fn database(&self) -> &str {
        &self.database
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            host: Self::DEFAULT_HOST.to_string(),
            port: Self::DEFAULT_PORT,
            database: Self::DEFAULT_DATABASE.to_string(),
            app_name: None,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
        }
    }
}

/// Load MongoConfig from environment variables
///
/// Environment variables (all optional):
/// - `DB_HOST` (default: localhost)
/// - `DB_PORT` (default: 27017)
/// - `DB_DATABASE` (default: files_manager)
/// - `DB_APP_NAME` - Application name for server logs
/// - `DB_CONNECT_TIMEOUT_SECS` (default: 10)
/// - `DB_SERVER_SELECTION_TIMEOUT_SECS` (default: 30)
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            host: env_or_default("DB_HOST", Self::DEFAULT_HOST),
            port: env_parse_or_default("DB_PORT", Self::DEFAULT_PORT)?,
            database: env_or_default("DB_DATABASE", Self::DEFAULT_DATABASE),
            app_name: env_optional("DB_APP_NAME"),
            connect_timeout_secs: env_parse_or_default(
                "DB_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
            server_selection_timeout_secs: env_parse_or_default(
                "DB_SERVER_SELECTION_TIMEOUT_SECS",
                defaults.server_selection_timeout_secs,
            )?,
        })
    }
}
