//! Port for hotel persistence.

use async_trait::async_trait;

use crate::domain::{Hotel, HotelId, NewHotel, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by hotel repository adapters.
    pub enum HotelRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "hotel repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "hotel repository query failed: {message}",
        /// The landlord referenced by a new hotel does not exist.
        LandlordNotFound { landlord_id: i64 } => "landlord not found: {landlord_id}",
    }
}

/// Hotel store.
///
/// Hotels never carry their rooms; callers fetch rooms through
/// [`super::RoomRepository`] and combine them on read.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HotelRepository: Send + Sync {
    /// Insert a hotel and return it with its assigned id.
    async fn insert(&self, hotel: &NewHotel) -> Result<Hotel, HotelRepositoryError>;

    /// Fetch a hotel by identifier.
    async fn find_by_id(&self, id: HotelId) -> Result<Option<Hotel>, HotelRepositoryError>;

    /// List all hotels ordered by id.
    async fn list(&self) -> Result<Vec<Hotel>, HotelRepositoryError>;

    /// List hotels owned by `landlord`, ordered by id.
    async fn list_by_landlord(&self, landlord: UserId) -> Result<Vec<Hotel>, HotelRepositoryError>;
}
