//! Wire the driving ports over the configured stores.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use hotel_backend::domain::Stores;
use hotel_backend::inbound::http::state::HttpState;
use hotel_backend::outbound::memory::InMemoryStore;
use hotel_backend::outbound::persistence::{
    DieselHotelRepository, DieselRoomRepository, DieselUserRepository,
};

use super::ServerConfig;

/// PostgreSQL repositories when a pool is configured, otherwise one shared
/// in-memory store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            info!(store = "postgres", "wiring store adapters");
            HttpState::from_stores(
                Stores::new(
                    Arc::new(DieselUserRepository::new(pool.clone())),
                    Arc::new(DieselHotelRepository::new(pool.clone())),
                    Arc::new(DieselRoomRepository::new(pool.clone())),
                )
                .with_timeout(config.store_timeout),
            )
        }
        None => {
            info!(store = "memory", "wiring store adapters");
            let store = Arc::new(InMemoryStore::new());
            HttpState::from_stores(
                Stores::new(store.clone(), store.clone(), store)
                    .with_timeout(config.store_timeout),
            )
        }
    };
    web::Data::new(state)
}
