//! # Config
//!
//! Define and implement config options for module

use anyhow::Result;
use config::{ConfigError, Environment};
use dotenv::dotenv;
use serde::Deserialize;

/// struct holding configuration options
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// port to be used for the REST server
    pub docker_port_rest: u16,

    /// config to be used for the Redis server, in-memory cache if no url is set
    #[serde(default)]
    pub redis: deadpool_redis::Config,

    /// path to log configuration YAML file
    pub log_config: String,

    /// path to the airport CSV file, bundled UK airports if unset
    #[serde(default)]
    pub airport_data: Option<String>,

    /// time-to-live of cached nearest airport results
    pub nearest_cache_ttl_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        log::warn!("(default) Creating Config object with default values.");
        Self::new()
    }
}

impl Config {
    /// Default values for Config
    pub fn new() -> Self {
        Config {
            docker_port_rest: 8000,
            redis: deadpool_redis::Config {
                url: None,
                pool: None,
                connection: None,
            },
            log_config: String::from("log4rs.yaml"),
            airport_data: None,
            nearest_cache_ttl_seconds: crate::nearest::NEAREST_CACHE_TTL_SECONDS,
        }
    }

    /// Create a new `Config` object using environment variables
    pub fn try_from_env() -> Result<Self, ConfigError> {
        // read .env file if present
        dotenv().ok();
        let default_config = Config::default();

        config::Config::builder()
            .set_default("docker_port_rest", default_config.docker_port_rest)?
            .set_default("log_config", default_config.log_config)?
            .set_default(
                "nearest_cache_ttl_seconds",
                default_config.nearest_cache_ttl_seconds,
            )?
            .add_source(Environment::default().separator("__"))
            .build()?
            .try_deserialize()
    }
}
