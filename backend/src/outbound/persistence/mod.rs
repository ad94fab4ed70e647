//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. Booking rules live in the domain services.
//! - **Internal models**: row structs (`models.rs`) and the schema
//!   (`schema.rs`) never leak into the domain.
//! - **Guarded writes**: booking transitions and deletions compare the room
//!   revision in the same statement that writes.
//! - **Strongly typed errors**: database failures become port error variants.
//!
//! # Example
//!
//! ```no_run
//! use hotel_backend::outbound::persistence::{DbPool, DieselRoomRepository, PoolConfig};
//!
//! # async fn demo() -> Result<(), hotel_backend::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/hotel")).await?;
//! let rooms = DieselRoomRepository::new(pool);
//! # let _ = rooms;
//! # Ok(())
//! # }
//! ```

mod diesel_helpers;
mod diesel_hotel_repository;
mod diesel_room_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_hotel_repository::DieselHotelRepository;
pub use diesel_room_repository::DieselRoomRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
