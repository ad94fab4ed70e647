//! Driving port for hotel reads with availability.

use async_trait::async_trait;

use crate::domain::{Error, HotelAvailability, HotelId, UserId};

/// Hotel catalogue reads. Availability is computed fresh on every call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HotelsQuery: Send + Sync {
    /// Public listing; hotels without a free room are left out.
    async fn list_hotels(&self) -> Result<Vec<HotelAvailability>, Error>;

    /// One hotel with all of its rooms.
    async fn get_hotel(&self, hotel_id: HotelId) -> Result<HotelAvailability, Error>;

    /// Every hotel owned by `landlord`, including fully booked ones.
    async fn list_landlord_hotels(&self, landlord: UserId)
    -> Result<Vec<HotelAvailability>, Error>;
}
