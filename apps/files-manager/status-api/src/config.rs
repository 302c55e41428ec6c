use core_config::{FromEnv, server::ServerConfig};
use storage::mongodb::MongoConfig;
use storage::redis::RedisConfig;

pub use core_config::Environment;

/// Application configuration, composed from the shared config pieces
#[derive(Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub mongodb: MongoConfig,
    pub redis: RedisConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            mongodb: MongoConfig::from_env()?,
            redis: RedisConfig::from_env()?,
            environment: Environment::from_env(),
        })
    }
}
