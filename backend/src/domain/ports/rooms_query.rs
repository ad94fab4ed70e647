//! Driving port for room reads.

use async_trait::async_trait;

use crate::domain::{Error, Room, RoomId, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomsQuery: Send + Sync {
    /// Every room, booked or not.
    async fn list_rooms(&self) -> Result<Vec<Room>, Error>;

    /// Rooms currently booked by `user`.
    async fn list_my_rooms(&self, user: UserId) -> Result<Vec<Room>, Error>;

    /// One room by id.
    async fn get_room(&self, room_id: RoomId) -> Result<Room, Error>;
}
