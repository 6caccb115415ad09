//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `STITCH_HOST` - Bind address (default: 127.0.0.1)
//! - `STITCH_PORT` - Listen port (default: 8080)
//! - `STITCH_SEED` - Path to a JSON file of products to load at startup

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Optional path to a JSON product seed file.
    pub seed_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = match std::env::var("STITCH_HOST") {
            Ok(raw) => raw
                .parse()
                .map_err(|e: std::net::AddrParseError| {
                    ConfigError::InvalidEnvVar("STITCH_HOST".to_string(), e.to_string())
                })?,
            Err(_) => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };

        let port = match std::env::var("STITCH_PORT") {
            Ok(raw) => raw.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidEnvVar("STITCH_PORT".to_string(), e.to_string())
            })?,
            Err(_) => DEFAULT_PORT,
        };

        let seed_path = std::env::var("STITCH_SEED").ok().map(PathBuf::from);

        Ok(Self {
            host,
            port,
            seed_path,
        })
    }

    /// The socket address to bind to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
