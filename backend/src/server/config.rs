//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;
use hotel_backend::domain::DEFAULT_STORE_TIMEOUT;
use hotel_backend::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) store_timeout: Duration,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: PrometheusMetrics,
}

impl ServerConfig {
    /// Configuration backed by the in-memory store.
    #[cfg(not(feature = "metrics"))]
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Configuration backed by the in-memory store, recording request
    /// metrics into `prometheus`.
    #[cfg(feature = "metrics")]
    #[must_use]
    pub fn new(bind_addr: SocketAddr, prometheus: PrometheusMetrics) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            store_timeout: DEFAULT_STORE_TIMEOUT,
            prometheus,
        }
    }

    /// Serve from PostgreSQL through the given pool.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Bound every store call by `timeout`.
    #[must_use]
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }
}
