//! Backend entry-point: loads settings, wires the stores, and serves the API.

mod server;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use hotel_backend::inbound::http::health::HealthState;
use hotel_backend::outbound::persistence::{DbPool, run_pending_migrations};
use hotel_backend::settings::AppSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|e| std::io::Error::other(e.to_string()))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let store_timeout = settings.store_timeout().map_err(std::io::Error::other)?;

    #[cfg(feature = "metrics")]
    let config = ServerConfig::new(bind_addr, make_metrics()?);
    #[cfg(not(feature = "metrics"))]
    let config = ServerConfig::new(bind_addr);
    let config = config.with_store_timeout(store_timeout);

    let config = match settings.pool_config() {
        Some(pool_config) => {
            if settings.run_migrations() {
                run_pending_migrations(pool_config.database_url())
                    .await
                    .map_err(std::io::Error::other)?;
            }
            let pool = DbPool::new(pool_config)
                .await
                .map_err(std::io::Error::other)?;
            config.with_db_pool(pool)
        }
        None => {
            info!("no database URL configured; using the in-memory store");
            config
        }
    };

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}

#[cfg(feature = "metrics")]
fn make_metrics() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("hotel")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::other(format!("configure Prometheus metrics: {e}")))
}
