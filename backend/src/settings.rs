//! Server settings loaded via OrthoConfig.
//!
//! Values layer CLI arguments over `HOTEL_*` environment variables over an
//! optional configuration file. Every field is optional; the accessors apply
//! the defaults.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::DEFAULT_STORE_TIMEOUT;
use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The bind address is not a `host:port` socket address.
    #[error("invalid bind address `{value}`: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// The store timeout must be positive.
    #[error("store timeout must be greater than zero")]
    ZeroStoreTimeout,
}

/// Runtime configuration for the hotel booking server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HOTEL")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Upper bound for a single store call, in milliseconds.
    pub store_timeout_ms: Option<u64>,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Start without applying pending migrations.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
}

impl AppSettings {
    /// Parsed listen address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Timeout applied to every store call.
    pub fn store_timeout(&self) -> Result<Duration, SettingsError> {
        match self.store_timeout_ms {
            Some(0) => Err(SettingsError::ZeroStoreTimeout),
            Some(ms) => Ok(Duration::from_millis(ms)),
            None => Ok(DEFAULT_STORE_TIMEOUT),
        }
    }

    /// Pool settings when a database URL is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?;
        let config = PoolConfig::new(url);
        Some(match self.pool_max_size {
            Some(size) => config.with_max_size(size),
            None => config,
        })
    }

    /// Whether migrations run at startup; on unless skipped.
    #[must_use]
    pub const fn run_migrations(&self) -> bool {
        !self.skip_migrations
    }
}
