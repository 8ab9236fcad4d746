//! Service configuration
//!
//! Settings come from environment variables with built-in defaults; the
//! command line overrides them field by field.
//!
//! - `WEBSHEET_STORAGE_DIR`: where exports are written (default: `./exports`)
//! - `WEBSHEET_FETCH_TIMEOUT_SECS`: fetch timeout (default: 10)
//! - `WEBSHEET_USER_AGENT`: User-Agent header (default: `Mozilla/5.0`)
//! - `WEBSHEET_BIND`: address the HTTP server binds to (default: 127.0.0.1)
//! - `WEBSHEET_PORT`: HTTP port (default: 8051)

use crate::fetch::{FetchOptions, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Storage directory environment variable
pub const STORAGE_DIR_ENV: &str = "WEBSHEET_STORAGE_DIR";
/// Fetch timeout environment variable
pub const TIMEOUT_ENV: &str = "WEBSHEET_FETCH_TIMEOUT_SECS";
/// User-Agent environment variable
pub const USER_AGENT_ENV: &str = "WEBSHEET_USER_AGENT";
/// Bind address environment variable
pub const BIND_ENV: &str = "WEBSHEET_BIND";
/// Port environment variable
pub const PORT_ENV: &str = "WEBSHEET_PORT";

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 8051;

/// Configuration errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set to something unparsable
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue {
        /// Variable name
        name: &'static str,
        /// Offending value
        value: String,
    },
}

/// Runtime configuration for the export service and server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Export storage root
    pub storage_dir: PathBuf,
    /// Fetch timeout
    pub fetch_timeout: Duration,
    /// User-Agent for fetches
    pub user_agent: String,
    /// Server bind address
    pub bind_addr: IpAddr,
    /// Server port
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from("exports"),
            fetch_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            bind_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(dir) = get(STORAGE_DIR_ENV) {
            config.storage_dir = PathBuf::from(dir);
        }
        if let Some(secs) = get(TIMEOUT_ENV) {
            let secs: u64 = parse_var(TIMEOUT_ENV, &secs)?;
            config.fetch_timeout = Duration::from_secs(secs);
        }
        if let Some(agent) = get(USER_AGENT_ENV) {
            config.user_agent = agent;
        }
        if let Some(bind) = get(BIND_ENV) {
            config.bind_addr = parse_var(BIND_ENV, &bind)?;
        }
        if let Some(port) = get(PORT_ENV) {
            config.port = parse_var(PORT_ENV, &port)?;
        }

        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Fetch options derived from this configuration
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions::default()
            .with_timeout(self.fetch_timeout)
            .with_user_agent(self.user_agent.clone())
    }

    /// Socket address for the HTTP server
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
    })
}
