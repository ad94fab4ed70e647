//! Driving port for hotel creation.

use async_trait::async_trait;

use crate::domain::{Error, Hotel, HotelDetailsDraft, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HotelsCommand: Send + Sync {
    /// Register a hotel owned by `actor`, who must be a landlord.
    async fn add_hotel(&self, actor: UserId, details: HotelDetailsDraft) -> Result<Hotel, Error>;
}
